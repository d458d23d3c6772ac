//! # ipasc-data - IPASC photoacoustic data format
//!
//! `ipasc_data` reads, writes, and checks photoacoustic raw time series in
//! the IPASC data format: one binary tensor of shape
//! `[detectors, samples, wavelengths * measurements]` together with
//! acquisition metadata and a device description.
//!
//! ## Key Features
//!
//! - **Typed metadata registry**: every known field is a [`metadata::MetaDatum`]
//!   with its unit, accepted value kinds, and value range.
//!
//! - **Quality control**: completeness and consistency checkers that report
//!   deficient fields instead of failing.
//!
//! - **Self-contained container**: a single ZIP archive with a leading
//!   `mimetype` entry, a JSON manifest, and one entry per group or dataset.
//!
//! - **Layout migration**: legacy four-axis tensors are reshaped on load.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ipasc_data::data::{sample_pa_data, SampleShape};
//! use ipasc_data::io::{load_data, write_data, WriterConfig};
//! use ipasc_data::quality::{quality_check_pa_data, CheckerConfig};
//!
//! let pa_data = sample_pa_data(SampleShape::default());
//! write_data("record.ipasc", &pa_data, &WriterConfig::default())?;
//!
//! let loaded = load_data("record.ipasc")?;
//! assert!(quality_check_pa_data(&loaded, &CheckerConfig::default())?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`value`]: the dynamic value tree and numeric arrays
//! - [`metadata`]: tag registries, constraints, and units
//! - [`data`]: the [`data::PaData`] record, accessors, device builders
//! - [`quality`]: completeness and consistency checkers
//! - [`storage`]: the ZIP container and its dataset record codec
//! - [`io`]: mapping between records and containers, migration
//! - [`validator`]: deep validation of files on disk

pub mod data;
pub mod io;
pub mod metadata;
pub mod quality;
pub mod storage;
pub mod validator;
pub mod value;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::data::{
        sample_pa_data, Adapter, DetectionElementCreator, DeviceMetaDataCreator,
        IlluminationElementCreator, PaData, SampleShape,
    };
    pub use crate::io::{
        load_data, load_data_raw, migrate, write_data, CompressionType, Migration, ReadError,
        WriteError, WriterConfig,
    };
    pub use crate::metadata::{acquisition_tags, device_tags, MetaDatum};
    pub use crate::quality::{
        quality_check_pa_data, CheckerConfig, CompletenessChecker, ConsistencyChecker,
        QualityReport,
    };
    pub use crate::validator::{validate_ipasc_file, ValidationReport};
    pub use crate::value::{DType, MetadataMap, NumericArray, Value};
}
