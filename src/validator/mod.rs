//! # IPASC file validation
//!
//! Deep integrity validation for `.ipasc` containers.
//!
//! ## Validation Checklist
//!
//! 1. **Structure Check**: ZIP readable, mimetype first and stored, manifest
//!    parseable, every dataset record decodes, required nodes present
//! 2. **Metadata Integrity**: completeness and consistency of the acquisition
//!    and device metadata
//! 3. **Data Sanity**: tensor layout and values, `sizes` against the tensor
//!    shape, element counts against `num_detectors` / `num_illuminators`
//!
//! Checks are run on the record as stored, before any migration.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ipasc_data::validator::validate_ipasc_file;
//! use std::path::Path;
//!
//! match validate_ipasc_file(Path::new("record.ipasc")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;
use log::debug;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod data;
mod metadata;
mod report;
mod structure;

/// Validate the IPASC file at `path`.
///
/// Problems with the file are reported as failed checks; `Err` is reserved
/// for I/O errors while reading it.
pub fn validate_ipasc_file(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure Check
    let Some(pa_data) = structure::check_structure(path, &mut report)? else {
        debug!("Structure check failed, skipping content checks");
        return Ok(report);
    };

    // 2. Metadata Integrity Check
    metadata::check_metadata(&pa_data, &mut report);

    // 3. Data Sanity Check
    data::check_data_sanity(&pa_data, &mut report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;
    use crate::data::{sample_pa_data, SampleShape};
    use crate::io::{write_data, WriterConfig};
    use crate::metadata::{acquisition_tags, device_tags};
    use crate::value::{NumericArray, Value};

    fn failed_names(report: &ValidationReport) -> Vec<&str> {
        report
            .checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
            .map(|c| c.name.as_str())
            .collect()
    }

    #[test]
    fn test_sample_file_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.ipasc");
        write_data(&path, &sample_pa_data(SampleShape::default()), &WriterConfig::default()).unwrap();

        let report = validate_ipasc_file(&path).unwrap();
        assert!(!report.has_failures(), "{report}");
        assert!(!report.has_warnings(), "{report}");
        assert!(report.check("mimetype is first entry").is_some());
        assert!(report.check("sizes matches tensor shape").is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let report = validate_ipasc_file(&dir.path().join("absent.ipasc")).unwrap();
        assert_eq!(failed_names(&report), vec!["File exists"]);
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.ipasc");
        std::fs::write(&path, "hello").unwrap();
        let report = validate_ipasc_file(&path).unwrap();
        assert_eq!(failed_names(&report), vec!["Format: ZIP container"]);
    }

    #[test]
    fn test_missing_required_group() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.ipasc");
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("mimetype", options).unwrap();
        zip.write_all(crate::storage::IPASC_MIMETYPE.as_bytes()).unwrap();
        zip.add_directory("meta_data/", options).unwrap();
        zip.finish().unwrap();

        let report = validate_ipasc_file(&path).unwrap();
        let failed = failed_names(&report);
        assert!(failed.contains(&"binary_time_series_data exists"));
        assert!(failed.contains(&"meta_data_device exists"));
        assert!(!failed.contains(&"meta_data exists"));
        assert!(report.check("manifest.json exists").is_some());
    }

    #[test]
    fn test_inconsistent_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.ipasc");

        let mut pa_data = sample_pa_data(SampleShape::default());
        pa_data.set_acquisition_meta_datum(
            &acquisition_tags::SIZES,
            NumericArray::from_vec(vec![1i64, 2, 3]),
        );
        pa_data
            .meta_data_device
            .get_mut("general")
            .and_then(Value::as_map_mut)
            .unwrap()
            .insert(device_tags::NUMBER_OF_DETECTION_ELEMENTS.tag().to_string(), Value::Int(9));
        write_data(&path, &pa_data, &WriterConfig::default()).unwrap();

        let report = validate_ipasc_file(&path).unwrap();
        let failed = failed_names(&report);
        assert!(failed.contains(&"sizes matches tensor shape"));
        assert!(failed.contains(&"num_detectors matches element count"));
        assert!(!failed.contains(&"Acquisition metadata complete"));
    }
}
