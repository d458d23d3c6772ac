//! Quality control on records that went through a file.

use ipasc_data::data::{
    sample_pa_data, DetectionElementCreator, DeviceMetaDataCreator, IlluminationElementCreator,
    SampleShape,
};
use ipasc_data::io::{load_data, write_data, WriterConfig};
use ipasc_data::metadata::device_tags;
use ipasc_data::quality::{
    quality_check_pa_data, CheckerConfig, CompletenessChecker, ConsistencyChecker, Issue,
};
use ipasc_data::value::{MetadataMap, NumericArray, Value};
use tempfile::tempdir;

fn vector(values: &[f64]) -> NumericArray {
    NumericArray::from_vec(values.to_vec())
}

fn detector(x: f64) -> MetadataMap {
    let mut detector = DetectionElementCreator::new();
    detector
        .set_detector_position(vector(&[x, 0.0, 0.0]))
        .set_detector_orientation(vector(&[0.0, 0.0, 1.0]))
        .set_detector_geometry(vector(&[2.5e-4, 5e-3, 0.0]))
        .set_detector_geometry_type("CUBOID")
        .set_frequency_response(NumericArray::from_elem(&[2, 5], 1.0f64))
        .set_angular_response(NumericArray::from_elem(&[2, 5], 1.0f64));
    detector.get_dictionary()
}

fn illuminator(x: f64) -> MetadataMap {
    let mut illuminator = IlluminationElementCreator::new();
    illuminator
        .set_illuminator_position(vector(&[x, 0.0, -0.01]))
        .set_illuminator_orientation(vector(&[0.0, 0.0, 1.0]))
        .set_illuminator_geometry(vector(&[0.01, 0.002, 0.0]))
        .set_illuminator_geometry_type("CUBOID")
        .set_wavelength_range(vector(&[7e-7, 9e-7, 1e-9]))
        .set_beam_energy_profile(NumericArray::from_elem(&[2, 4], 1e-3f64))
        .set_beam_stability_profile(NumericArray::from_elem(&[2, 4], 1e-4f64))
        .set_pulse_width(7e-9)
        .set_beam_intensity_profile(NumericArray::from_elem(&[3, 3], 0.1f64))
        .set_intensity_profile_distance(0.05)
        .set_beam_divergence_angles(0.2);
    illuminator.get_dictionary()
}

fn device() -> (MetadataMap, Vec<String>) {
    let mut device = DeviceMetaDataCreator::new();
    device.set_general_information("scanner-0001", vector(&[0.0, 0.04, 0.0, 0.0, 0.0, 0.04]));
    for i in 0..2 {
        device.add_illumination_element(illuminator(0.005 * i as f64));
    }
    let detector_ids = (0..4)
        .map(|i| device.add_detection_element(detector(3e-4 * i as f64)))
        .collect();
    (device.finalize_device_meta_data(), detector_ids)
}

#[test]
fn test_assembled_device_is_complete_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("device.ipasc");

    let (device, detector_ids) = device();
    let mut pa_data = sample_pa_data(SampleShape::default());
    pa_data.meta_data_device = device;
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();

    let loaded = load_data(&path).unwrap();
    assert_eq!(loaded.get_number_of_illuminators(), Some(2));
    assert_eq!(loaded.get_number_of_detectors(), Some(4));
    assert_eq!(loaded.get_detector_ids(), detector_ids);
    assert!(CompletenessChecker::device_report(&loaded.meta_data_device).passed());
    assert!(ConsistencyChecker::device_report(&loaded.meta_data_device).passed());
}

#[test]
fn test_missing_detector_position_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("device.ipasc");

    let (mut device, detector_ids) = device();
    device
        .get_mut("detectors")
        .and_then(Value::as_map_mut)
        .and_then(|detectors| detectors.get_mut(&detector_ids[2]))
        .and_then(Value::as_map_mut)
        .unwrap()
        .shift_remove(device_tags::DETECTOR_POSITION.tag());

    let mut pa_data = sample_pa_data(SampleShape::default());
    pa_data.meta_data_device = device;
    write_data(&path, &pa_data, &WriterConfig::default()).unwrap();

    let loaded = load_data(&path).unwrap();
    let report = CompletenessChecker::device_report(&loaded.meta_data_device);
    assert_eq!(report.count(), 1);
    let finding = report.findings().next().unwrap();
    assert_eq!(finding.element.as_deref(), Some(detector_ids[2].as_str()));
    assert_eq!(finding.tag, device_tags::DETECTOR_POSITION.tag());
    assert_eq!(finding.issue, Issue::Missing);

    assert!(!quality_check_pa_data(&loaded, &CheckerConfig::default()).unwrap());
}

#[test]
fn test_reports_are_logged_as_markdown() {
    let dir = tempdir().unwrap();
    let log_file = dir.path().join("qc.md");

    let mut pa_data = sample_pa_data(SampleShape::default());
    pa_data
        .meta_data_acquisition
        .insert("ad_sampling_rate".to_string(), Value::Float(-1.0));

    let config = CheckerConfig {
        verbose: false,
        log_file: Some(log_file.clone()),
    };
    assert!(!quality_check_pa_data(&pa_data, &config).unwrap());

    let log = std::fs::read_to_string(&log_file).unwrap();
    for title in [
        "# Completeness Report for Acquisition Meta Data",
        "# Completeness Report for Device Meta Data",
        "# Consistency Report for Acquisition Meta Data",
        "# Consistency Report for Device Meta Data",
    ] {
        assert!(log.contains(title), "{title} not logged");
    }
    assert!(log.contains("ad_sampling_rate"));
}
