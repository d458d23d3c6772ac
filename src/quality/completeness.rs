use crate::data::{DETECTORS, GENERAL, ILLUMINATORS};
use crate::metadata::{acquisition_tags, device_tags, MetaDatum};
use crate::value::{MetadataMap, Value};

use super::report::{Finding, Issue, QualityReport, ReportSection};
use super::{checker_input, CheckerConfig, CheckerError};

/// Reports mandatory entries that are missing, null, or of an undeclared
/// kind, and optional entries of an undeclared kind.
#[derive(Debug, Clone, Default)]
pub struct CompletenessChecker {
    config: CheckerConfig,
}

/// Findings for `subset` within one map
fn entry_findings(subset: &[&MetaDatum], map: &MetadataMap, element: Option<&str>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for datum in subset {
        let issue = match map.get(datum.tag()) {
            None if datum.mandatory() => Some(Issue::Missing),
            Some(Value::Null) if datum.mandatory() => Some(Issue::Null),
            None | Some(Value::Null) => None,
            Some(value) if !datum.accepts_kind(value) => Some(Issue::WrongType {
                expected: datum
                    .dtype()
                    .iter()
                    .map(|kind| kind.name())
                    .collect::<Vec<_>>()
                    .join(" | "),
                found: value.kind_name(),
            }),
            Some(_) => None,
        };
        if let Some(issue) = issue {
            findings.push(Finding {
                element: element.map(str::to_string),
                tag: datum.tag().to_string(),
                issue,
            });
        }
    }
    findings
}

/// One finding per covered tag, for a group or element that is not a map
fn group_missing(subset: &[&MetaDatum], element: Option<&str>) -> Vec<Finding> {
    subset
        .iter()
        .map(|datum| Finding {
            element: element.map(str::to_string),
            tag: datum.tag().to_string(),
            issue: Issue::GroupMissing,
        })
        .collect()
}

/// Section covering every element of one device group
fn element_section(
    heading: &str,
    noun: &str,
    device: &MetadataMap,
    group: &str,
    subset: &[&MetaDatum],
) -> ReportSection {
    let mut section = ReportSection::new(heading);
    match device.get(group).and_then(Value::as_map) {
        None => {
            section.notes.push(format!("{heading} data is missing!"));
            section.findings = group_missing(subset, None);
        }
        Some(elements) => {
            section
                .notes
                .push(format!("Found {} {noun} elements.", elements.len()));
            for (id, element) in elements {
                match element.as_map() {
                    Some(map) => section.findings.extend(entry_findings(subset, map, Some(id))),
                    None => section.findings.extend(group_missing(subset, Some(id))),
                }
            }
        }
    }
    section
}

impl CompletenessChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Judge `subset` against one map
    pub fn check(subset: &[&MetaDatum], map: &MetadataMap) -> QualityReport {
        let mut section = ReportSection::new("Meta Data");
        section.findings = entry_findings(subset, map, None);
        let mut report = QualityReport::new("Completeness Report");
        report.sections.push(section);
        report
    }

    /// Report over every acquisition tag
    pub fn acquisition_report(map: &MetadataMap) -> QualityReport {
        let mut report = QualityReport::new("Completeness Report for Acquisition Meta Data");
        for (heading, subset) in [
            ("Binary Data", &acquisition_tags::TAGS_BINARY[..]),
            ("Acquisition", &acquisition_tags::TAGS_ACQUISITION[..]),
            ("Container", &acquisition_tags::TAGS_CONTAINER[..]),
        ] {
            let mut section = ReportSection::new(heading);
            section.findings = entry_findings(subset, map, None);
            report.sections.push(section);
        }
        report
    }

    /// Report over the general group and every illumination and detection element
    pub fn device_report(device: &MetadataMap) -> QualityReport {
        let mut report = QualityReport::new("Completeness Report for Device Meta Data");

        let mut general = ReportSection::new("General Information");
        match device.get(GENERAL).and_then(Value::as_map) {
            Some(map) => general.findings = entry_findings(&device_tags::CHECKED_GENERAL, map, None),
            None => {
                general.notes.push("General device meta data is missing!".to_string());
                general.findings = group_missing(&device_tags::CHECKED_GENERAL, None);
            }
        }
        report.sections.push(general);

        report.sections.push(element_section(
            "Detection Elements",
            "detection",
            device,
            DETECTORS,
            &device_tags::CHECKED_DETECTOR,
        ));
        report.sections.push(element_section(
            "Illumination Elements",
            "illumination",
            device,
            ILLUMINATORS,
            &device_tags::CHECKED_ILLUMINATOR,
        ));
        report
    }

    /// Check an acquisition map, emitting the report; `Ok(true)` if complete
    pub fn check_acquisition_map(&self, map: &MetadataMap) -> Result<bool, CheckerError> {
        let report = Self::acquisition_report(map);
        self.config.emit(&report)?;
        Ok(report.passed())
    }

    /// Check a device map, emitting the report; `Ok(true)` if complete
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
