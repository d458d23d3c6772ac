use log::warn;

use crate::data::{DETECTORS, GENERAL, ILLUMINATORS};
use crate::metadata::{acquisition_tags, device_tags, MetaDatum};
use crate::value::{MetadataMap, NumericArray, Value};

use super::report::{Finding, Issue, QualityReport, ReportSection};
use super::{checker_input, CheckerConfig, CheckerError};

/// Evaluates the value range constraint of every present entry.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyChecker {
    config: CheckerConfig,
}

fn entry_findings(subset: &[&MetaDatum], map: &MetadataMap, element: Option<&str>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for datum in subset {
        let Some(value) = map.get(datum.tag()) else {
            continue;
        };
        let issue = match datum.evaluate_value_range(Some(value)) {
            Ok(true) => continue,
            Ok(false) if value.is_null() => Issue::Null,
            Ok(false) => Issue::OutOfRange {
                constraint: datum.constraint().name(),
            },
            Err(mismatch) => Issue::TypeMismatch(mismatch.to_string()),
        };
        findings.push(Finding {
            element: element.map(str::to_string),
            tag: datum.tag().to_string(),
            issue,
        });
    }
    findings
}

fn element_section(
    heading: &str,
    device: &MetadataMap,
    group: &str,
    subset: &[&MetaDatum],
) -> ReportSection {
    let mut section = ReportSection::new(heading);
    let Some(elements) = device.get(group).and_then(Value::as_map) else {
        section.notes.push(format!("No {} group to check.", group));
        return section;
    };
    for (id, element) in elements {
        match element.as_map() {
            Some(map) => section.findings.extend(entry_findings(subset, map, Some(id))),
            None => section
                .notes
                .push(format!("Element \"{id}\" is not a map and was skipped.")),
        }
    }
    section
}

impl ConsistencyChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Judge the present entries of `subset` within one map
    pub fn check(subset: &[&MetaDatum], map: &MetadataMap) -> QualityReport {
        let mut section = ReportSection::new("Meta Data");
        section.findings = entry_findings(subset, map, None);
        let mut report = QualityReport::new("Consistency Report");
        report.sections.push(section);
        report
    }

    pub fn acquisition_report(map: &MetadataMap) -> QualityReport {
        let mut report = QualityReport::new("Consistency Report for Acquisition Meta Data");
        let all: Vec<&MetaDatum> = acquisition_tags::all().collect();
        let mut section = ReportSection::new("Acquisition Meta Data");
        section.findings = entry_findings(&all, map, None);
        report.sections.push(section);
        report
    }

    /// Absent groups are skipped; completeness reports them
    pub fn device_report(device: &MetadataMap) -> QualityReport {
        let mut report = QualityReport::new("Consistency Report for Device Meta Data");

        let mut general = ReportSection::new("General Tags");
        if let Some(map) = device.get(GENERAL).and_then(Value::as_map) {
            general.findings = entry_findings(&device_tags::CHECKED_GENERAL, map, None);
        }
        report.sections.push(general);

        report.sections.push(element_section(
            "Detection Elements",
            device,
            DETECTORS,
            &device_tags::CHECKED_DETECTOR,
        ));
        report.sections.push(element_section(
            "Illumination Elements",
            device,
            ILLUMINATORS,
            &device_tags::CHECKED_ILLUMINATOR,
        ));
        report
    }

    /// True iff `value` is a numeric array with at least one axis
    pub fn check_binary(&self, value: &Value) -> bool {
        match value {
            Value::Array(array) => self.check_binary_array(array),
            other => {
                warn!("Binary data is not a numeric array but {}", other.kind_name());
                false
            }
        }
    }

    pub fn check_binary_array(&self, array: &NumericArray) -> bool {
        if array.ndim() == 0 {
            warn!("Binary data is a scalar, expected at least one axis");
            return false;
        }
        true
    }

    pub fn check_acquisition_map(&self, map: &MetadataMap) -> Result<bool, CheckerError> {
        let report = Self::acquisition_report(map);
        self.config.emit(&report)?;
        Ok(report.passed())
    }

    pub fn check_device_map(&self, device: &MetadataMap) -> Result<bool, CheckerError> {
        let report = Self::device_report(device);
        self.config.emit(&report)?;
        Ok(report.passed())
    }

    /// Like [`Self::check_acquisition_map`], rejecting null or non-map input
    pub fn check_acquisition_meta_data(&self, value: &Value) -> Result<bool, CheckerError> {
        self.check_acquisition_map(checker_input(value, "acquisition meta data")?)
    }

    /// Like [`Self::check_device_map`], rejecting null or non-map input
    pub fn check_device_meta_data(&self, value: &Value) -> Result<bool, CheckerError> {
        self.check_device_map(checker_input(value, "device meta data")?)
    }
}
