//! # Quality control
//!
//! Two checkers judge a [`PaData`] record against the metadata registries:
//!
//! 1. [`CompletenessChecker`]: are the mandatory entries present, non-null,
//!    and of a declared kind?
//! 2. [`ConsistencyChecker`]: do the present entries satisfy their value
//!    range constraints, and is the binary tensor a numeric array?
//!
//! Findings are never errors. Each check produces a [`QualityReport`] that is
//! optionally printed to stdout and appended to a Markdown log file.

mod completeness;
mod consistency;
mod report;


use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::info;
use serde::Deserialize;

pub use completeness::CompletenessChecker;
pub use consistency::ConsistencyChecker;
pub use report::{Finding, Issue, QualityReport, ReportSection};

use crate::data::PaData;
use crate::value::{MetadataMap, Value};

/// Errors raised by the checkers themselves (never by the data they judge)
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// The checker input is null or not a map
    #[error("Invalid checker input: {0}")]
    Argument(String),

    /// Appending the report to the log file failed
    #[error("Failed to append report to log file: {0}")]
    Io(#[from] std::io::Error),
}

/// Reporting options shared by both checkers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckerConfig {
    /// Print every report to stdout
    #[serde(default)]
    pub verbose: bool,

    /// Append every report to this Markdown file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl CheckerConfig {
    /// Print and/or append `report` as configured
    pub(crate) fn emit(&self, report: &QualityReport) -> Result<(), CheckerError> {
        let markdown = report.to_markdown();
        if self.verbose {
            println!("{markdown}");
        }
        if let Some(path) = &self.log_file {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{markdown}")?;
        }
        info!("{}: {} finding(s)", report.title, report.count());
        Ok(())
    }
}

/// Borrow the map behind a checker argument
pub(crate) fn checker_input<'a>(value: &'a Value, what: &str) -> Result<&'a MetadataMap, CheckerError> {
    match value {
        Value::Map(map) => Ok(map),
        Value::Null => Err(CheckerError::Argument(format!("{what} must not be null"))),
        other => Err(CheckerError::Argument(format!(
            "{what} must be a map, found {}",
            other.kind_name()
        ))),
    }
}

/// Run all five checks on a record.
///
/// Acquisition completeness and consistency, device completeness and
/// consistency, and binary tensor sanity must all pass.
pub fn quality_check_pa_data(pa_data: &PaData, config: &CheckerConfig) -> Result<bool, CheckerError> {
    let completeness = CompletenessChecker::new(config.clone());
    let consistency = ConsistencyChecker::new(config.clone());

    let acquisition_complete = completeness.check_acquisition_map(&pa_data.meta_data_acquisition)?;
    let device_complete = completeness.check_device_map(&pa_data.meta_data_device)?;
    let binary_consistent = pa_data
        .binary_time_series_data
        .as_ref()
        .is_some_and(|array| consistency.check_binary_array(array));
    let acquisition_consistent = consistency.check_acquisition_map(&pa_data.meta_data_acquisition)?;
    let device_consistent = consistency.check_device_map(&pa_data.meta_data_device)?;

    Ok(acquisition_complete
        && device_complete
        && binary_consistent
        && acquisition_consistent
        && device_consistent)
}
