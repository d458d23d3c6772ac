use crate::data::PaData;
use crate::quality::ConsistencyChecker;
use crate::value::Value;

use super::{ValidationCheck, ValidationReport};

/// Step 3: Data sanity validation
pub(crate) fn check_data_sanity(pa_data: &PaData, report: &mut ValidationReport) {
    let Some(tensor) = &pa_data.binary_time_series_data else {
        report.add_check(ValidationCheck::failed(
            "Tensor present",
            "Record has no binary time series data",
        ));
        return;
    };

    if !ConsistencyChecker::default().check_binary_array(tensor) {
        report.add_check(ValidationCheck::failed(
            "Tensor is an array",
            format!("Tensor {tensor} has no axes"),
        ));
        return;
    }
    report.add_check(ValidationCheck::ok(format!("Tensor: {tensor}")));

    match tensor.ndim() {
        3 => report.add_check(ValidationCheck::ok(
            "Tensor axes [detector, sample, wavelength * measurement]",
        )),
        4 => report.add_check(ValidationCheck::warning(
            "Tensor axes",
            "Legacy four-axis layout [detector, sample, wavelength, measurement]",
        )),
        rank => report.add_check(ValidationCheck::failed(
            "Tensor axes",
            format!("Expected 3 axes, found {rank}"),
        )),
    }

    if tensor.is_empty() {
        report.add_check(ValidationCheck::warning("Tensor values", "Tensor holds no samples"));
    } else {
        let non_finite = tensor.iter_f64().filter(|v| !v.is_finite()).count();
        if non_finite == 0 {
            report.add_check(ValidationCheck::ok("Tensor values are finite"));
        } else {
            report.add_check(ValidationCheck::warning(
                "Tensor values",
                format!("{non_finite} of {} samples are NaN or infinite", tensor.len()),
            ));
        }
    }

    if let Some(data_type) = pa_data.get_data_type().and_then(Value::as_str) {
        let dtype = tensor.dtype().name();
        if data_type == dtype {
            report.add_check(ValidationCheck::ok(format!("data_type matches ({dtype})")));
        } else {
            report.add_check(ValidationCheck::warning(
                "data_type",
                format!("Declared {data_type}, tensor holds {dtype}"),
            ));
        }
    }

    if let Some(sizes) = pa_data.get_sizes().and_then(Value::as_array) {
        let declared: Vec<f64> = sizes.iter_f64().collect();
        let actual: Vec<f64> = tensor.shape().iter().map(|&len| len as f64).collect();
        report.add_check(ValidationCheck::require(
            "sizes matches tensor shape",
            declared == actual,
            format!("sizes declares {declared:?}, tensor shape is {:?}", tensor.shape()),
        ));
    }

    check_element_count(
        report,
        "num_detectors",
        pa_data.get_number_of_detectors(),
        pa_data.get_detector_ids().len(),
    );
    check_element_count(
        report,
        "num_illuminators",
        pa_data.get_number_of_illuminators(),
        pa_data.get_illuminator_ids().len(),
    );

    let detectors = pa_data.get_detector_ids().len();
    if detectors > 0 && tensor.shape()[0] != detectors {
        report.add_check(ValidationCheck::warning(
            "Detector axis",
            format!(
                "Tensor has {} detector rows, device declares {detectors} detection elements",
                tensor.shape()[0]
            ),
        ));
    }

    if tensor.ndim() == 3 {
        if let Some(wavelengths) = pa_data.get_acquisition_wavelengths().and_then(Value::as_array) {
            let frames = tensor.shape()[2];
            if wavelengths.len() == frames {
                report.add_check(ValidationCheck::ok("One wavelength per frame"));
            } else {
                report.add_check(ValidationCheck::warning(
                    "Wavelengths per frame",
                    format!(
                        "{} acquisition wavelengths for {frames} frames",
                        wavelengths.len()
                    ),
                ));
            }
        }
    }
}

fn check_element_count(report: &mut ValidationReport, tag: &str, declared: Option<i64>, found: usize) {
    let Some(declared) = declared else {
        return;
    };
    report.add_check(ValidationCheck::require(
        format!("{tag} matches element count"),
        usize::try_from(declared).is_ok_and(|declared| declared == found),
        format!("{tag} declares {declared}, found {found} elements"),
    ));
}
