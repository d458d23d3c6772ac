use crate::data::PaData;
use crate::metadata::{CURRENT_VERSION, LEGACY_VERSION};
use crate::quality::{CompletenessChecker, ConsistencyChecker, QualityReport};

use super::{ValidationCheck, ValidationReport};

/// Findings listed by name before the rest are summarized
const LISTED_FINDINGS: usize = 5;

fn summarize(name: &str, quality: &QualityReport) -> ValidationCheck {
    if quality.passed() {
        return ValidationCheck::ok(name);
    }
    let mut listed: Vec<String> = quality
        .findings()
        .take(LISTED_FINDINGS)
        .map(|finding| match &finding.element {
            Some(element) => format!("{}.{}", element, finding.tag),
            None => finding.tag.clone(),
        })
        .collect();
    if quality.count() > LISTED_FINDINGS {
        listed.push(format!("and {} more", quality.count() - LISTED_FINDINGS));
    }
    ValidationCheck::failed(
        name,
        format!("{} deficient field(s): {}", quality.count(), listed.join(", ")),
    )
}

/// Step 2: Metadata completeness and consistency
pub(crate) fn check_metadata(pa_data: &PaData, report: &mut ValidationReport) {
    match pa_data.version() {
        Some(CURRENT_VERSION) => {
            report.add_check(ValidationCheck::ok(format!("Data version {CURRENT_VERSION}")))
        }
        Some(LEGACY_VERSION) | None => report.add_check(ValidationCheck::warning(
            "Data version",
            format!("Legacy layout, migrated to {CURRENT_VERSION} on load"),
        )),
        Some(other) => report.add_check(ValidationCheck::warning(
            "Data version",
            format!("Unknown data version \"{other}\""),
        )),
    }

    let acquisition = &pa_data.meta_data_acquisition;
    let device = &pa_data.meta_data_device;
    report.add_check(summarize(
        "Acquisition metadata complete",
        &CompletenessChecker::acquisition_report(acquisition),
    ));
    report.add_check(summarize(
        "Device metadata complete",
        &CompletenessChecker::device_report(device),
    ));
    report.add_check(summarize(
        "Acquisition metadata consistent",
        &ConsistencyChecker::acquisition_report(acquisition),
    ));
    report.add_check(summarize(
        "Device metadata consistent",
        &ConsistencyChecker::device_report(device),
    ));
}
