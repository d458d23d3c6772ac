//! # Hierarchical container storage
//!
//! An IPASC file is a ZIP archive that encodes a tree of named groups and
//! datasets:
//!
//! ```text
//! record.ipasc
//! ├── mimetype                          # "application/vnd.ipasc+zip" (stored, first entry)
//! ├── manifest.json                     # format revision, writer, creation time
//! ├── binary_time_series_data           # dataset
//! ├── meta_data/                        # group
//! │   ├── version                       # dataset
//! │   └── regions_of_interest/...       # nested group
//! └── meta_data_device/
//!     ├── general/...
//!     ├── illuminators/<id>/...
//!     └── detectors/<id>/...
//! ```
//!
//! Groups are directory entries, datasets are file entries holding a
//! [`Dataset`] record (see [`codec`]). The whole tree is held in memory as a
//! [`Container`]; [`save`] and [`load`] move it to and from disk.

pub mod codec;
mod archive;
mod error;
mod manifest;
mod tree;

pub use archive::{load, read_archive, save, write_archive, Archive, ArchiveOptions};
pub use codec::{CodecError, Dataset, Scalar};
pub use error::StorageError;
pub use manifest::{Manifest, FORMAT_VERSION};
pub use tree::{validate_name, Container, Group, Node};

/// MIME type stored in the first archive entry
pub const IPASC_MIMETYPE: &str = "application/vnd.ipasc+zip";

/// Conventional file extension
pub const IPASC_EXTENSION: &str = "ipasc";

/// Name of the mimetype entry
pub const MIMETYPE_ENTRY: &str = "mimetype";

/// Name of the manifest entry
pub const MANIFEST_ENTRY: &str = "manifest.json";
