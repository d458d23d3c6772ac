//! # Reading and writing IPASC files
//!
//! A [`PaData`] record maps onto the container tree as follows:
//!
//! | Record part               | Container node                          |
//! |---------------------------|-----------------------------------------|
//! | `binary_time_series_data` | dataset `binary_time_series_data`       |
//! | `meta_data_acquisition`   | group `meta_data`                       |
//! | `meta_data_device`        | group `meta_data_device`                |
//!
//! Inside the metadata groups every map becomes a group, every list becomes
//! a group holding a `list` group whose children are named by zero-padded
//! index (`000`, `001`, ...), and every other value becomes a dataset.
//! Null is stored as the text `"None"`, so a string holding exactly that
//! text reads back as null.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ipasc_data::data::{sample_pa_data, SampleShape};
//! use ipasc_data::io::{load_data, write_data, WriterConfig};
//!
//! let pa_data = sample_pa_data(SampleShape::default());
//! write_data("record.ipasc", &pa_data, &WriterConfig::default())?;
//!
//! let loaded = load_data("record.ipasc")?;
//! assert_eq!(loaded, pa_data);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Files written before the combined wavelength axis are migrated by
//! [`load_data`]; see [`migration`].

mod config;
mod error;
pub mod migration;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

use std::path::Path;

use log::info;

pub use config::{CompressionType, WriterConfig};
pub use error::{ReadError, WriteError};
pub use migration::{migrate, Migration};
pub use reader::{read_dataset, read_group, read_pa_data, read_value};
pub use writer::{write_map, write_pa_data, write_value};

use crate::data::PaData;
use crate::metadata::acquisition_tags;
use crate::storage::{self, ArchiveOptions, Manifest};
use crate::value::Value;

/// Dataset holding the time series tensor
pub const BINARY_TIME_SERIES_DATA: &str = "binary_time_series_data";

/// Group holding the acquisition metadata
pub const META_DATA: &str = "meta_data";

/// Group holding the device metadata
pub const META_DATA_DEVICE: &str = "meta_data_device";

/// Group name reserved for sequence elements
pub const LIST_GROUP: &str = "list";

/// Text stored in place of a null value
pub const NULL_SENTINEL: &str = "None";

/// Archive options for writing `pa_data` with `config`
fn archive_options(pa_data: &PaData, config: &WriterConfig) -> ArchiveOptions {
    let manifest = config.manifest.then(|| {
        Manifest::new(
            pa_data.version().map(str::to_string),
            pa_data
                .get_acquisition_meta_datum(&acquisition_tags::UUID)
                .and_then(Value::as_str)
                .map(str::to_string),
        )
    });
    ArchiveOptions {
        deflate_level: config.compression.deflate_level(),
        manifest,
    }
}

/// Write `pa_data` to `path`, replacing any existing file.
///
/// The file is staged next to `path` and moved into place once complete.
pub fn write_data<P: AsRef<Path>>(
    path: P,
    pa_data: &PaData,
    config: &WriterConfig,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(WriteError::EmptyPath);
    }
    let container = write_pa_data(pa_data)?;
    storage::save(&container, path, &archive_options(pa_data, config))?;
    info!("Wrote PA data to {}", path.display());
    Ok(())
}

/// Read the record stored at `path` as written, without migration
pub fn load_data_raw<P: AsRef<Path>>(path: P) -> Result<PaData, ReadError> {
    let archive = storage::load(path)?;
    read_pa_data(&archive.container)
}

/// Read the record stored at `path`, migrating legacy layouts
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<PaData, ReadError> {
    let path = path.as_ref();
    let mut pa_data = load_data_raw(path)?;
    let migration = migrate(&mut pa_data)?;
    if migration.changed() {
        info!("Migrated {} ({:?})", path.display(), migration);
    }
    Ok(pa_data)
}
