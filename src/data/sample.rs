//! Synthetic records for demos, benchmarks, and tests.

use uuid::Uuid;

use crate::metadata::{acquisition_tags as acq, CURRENT_VERSION};
use crate::value::{MetadataMap, NumericArray, Value};

use super::{DetectionElementCreator, DeviceMetaDataCreator, IlluminationElementCreator, PaData};

/// Shape parameters of a synthetic recording
#[derive(Debug, Clone, Copy)]
pub struct SampleShape {
    pub illuminators: usize,
    pub detectors: usize,
    pub samples: usize,
    pub wavelengths: usize,
    pub measurements: usize,
}

impl Default for SampleShape {
    fn default() -> Self {
        Self {
            illuminators: 2,
            detectors: 4,
            samples: 64,
            wavelengths: 2,
            measurements: 3,
        }
    }
}

fn vector(values: &[f64]) -> NumericArray {
    NumericArray::from_vec(values.to_vec())
}

fn table(rows: usize, cols: usize, scale: f64) -> NumericArray {
    let data: Vec<f64> = (0..rows * cols).map(|i| i as f64 * scale).collect();
    NumericArray::from_shape_vec(&[rows, cols], data).unwrap_or_else(|_| NumericArray::from_vec(Vec::<f64>::new()))
}

/// Build a complete, consistent record with every registry tag filled in.
///
/// Element ids are `illuminator_<n>` and `detector_<n>`; the device and
/// dataset identifiers are random v4 UUIDs.
pub fn sample_pa_data(shape: SampleShape) -> PaData {
    let device_id = Uuid::new_v4().to_string();
    let frames = shape.wavelengths * shape.measurements;

    let mut device = DeviceMetaDataCreator::new();
    device.set_general_information(
        device_id.clone(),
        vector(&[0.0, 0.04, 0.0, 0.0, 0.0, 0.04]),
    );

    for i in 0..shape.illuminators {
        let mut illuminator = IlluminationElementCreator::new();
        illuminator
            .set_illuminator_position(vector(&[0.005 * i as f64, 0.0, -0.01]))
            .set_illuminator_orientation(vector(&[0.0, 0.0, 1.0]))
            .set_illuminator_geometry(vector(&[0.01, 0.002, 0.0]))
            .set_illuminator_geometry_type("CUBOID")
            .set_wavelength_range(vector(&[6.8e-7, 9.8e-7, 1e-9]))
            .set_beam_energy_profile(table(2, 4, 1e-3))
            .set_beam_stability_profile(table(2, 4, 1e-4))
            .set_pulse_width(7e-9)
            .set_beam_intensity_profile(table(3, 3, 0.1))
            .set_intensity_profile_distance(0.05)
            .set_beam_divergence_angles(0.2);
        device.insert_illumination_element(format!("illuminator_{i}"), illuminator.get_dictionary());
    }

    for i in 0..shape.detectors {
        let mut detector = DetectionElementCreator::new();
        detector
            .set_detector_position(vector(&[3e-4 * i as f64, 0.0, 0.0]))
            .set_detector_orientation(vector(&[0.0, 0.0, 1.0]))
            .set_detector_geometry(vector(&[2.5e-4, 5e-3, 0.0]))
            .set_detector_geometry_type("CUBOID")
            .set_frequency_response(table(2, 5, 1e6))
            .set_angular_response(table(2, 5, 0.1));
        device.insert_detection_element(format!("detector_{i}"), detector.get_dictionary());
    }

    let data: Vec<f32> = (0..shape.detectors * shape.samples * frames)
        .map(|i| ((i % 97) as f32 - 48.0) / 48.0)
        .collect();
    let binary = NumericArray::from_shape_vec(&[shape.detectors, shape.samples, frames], data)
        .unwrap_or_else(|_| NumericArray::from_vec(Vec::<f32>::new()));

    let wavelengths: Vec<f64> = (0..shape.wavelengths).map(|w| 7.0e-7 + w as f64 * 1.0e-7).collect();
    let mut rois = MetadataMap::new();
    rois.insert("roi_1".into(), Value::Array(vector(&[0.0, 0.01, 0.0, 0.0, 0.0, 0.01])));

    let mut pa_data = PaData::new();
    pa_data.meta_data_device = device.finalize_device_meta_data();
    pa_data.set_binary_time_series_data(binary);

    pa_data.set_acquisition_meta_datum(&acq::UUID, Uuid::new_v4().to_string());
    pa_data.set_acquisition_meta_datum(&acq::ENCODING, "raw");
    pa_data.set_acquisition_meta_datum(&acq::COMPRESSION, "none");
    pa_data.set_acquisition_meta_datum(&acq::VERSION, CURRENT_VERSION);
    pa_data.set_acquisition_meta_datum(&acq::DATA_TYPE, "float32");
    pa_data.set_acquisition_meta_datum(&acq::DIMENSIONALITY, "time");
    pa_data.set_acquisition_meta_datum(&acq::PHOTOACOUSTIC_IMAGING_DEVICE_REFERENCE, device_id);
    pa_data.set_acquisition_meta_datum(&acq::PULSE_ENERGY, NumericArray::from_elem(&[frames], 0.02f64));
    pa_data.set_acquisition_meta_datum(
        &acq::MEASUREMENT_TIMESTAMPS,
        NumericArray::from_vec((0..frames).map(|i| i as f64 * 0.1).collect::<Vec<_>>()),
    );
    pa_data.set_acquisition_meta_datum(
        &acq::ACQUISITION_WAVELENGTHS,
        NumericArray::from_vec(wavelengths).tile(shape.measurements),
    );
    pa_data.set_acquisition_meta_datum(
        &acq::TIME_GAIN_COMPENSATION,
        NumericArray::from_elem(&[shape.samples], 1.0f64),
    );
    pa_data.set_acquisition_meta_datum(&acq::OVERALL_GAIN, 1.0);
    pa_data.set_acquisition_meta_datum(
        &acq::ELEMENT_DEPENDENT_GAIN,
        NumericArray::from_elem(&[shape.detectors], 1.0f64),
    );
    pa_data.set_acquisition_meta_datum(&acq::TEMPERATURE_CONTROL, vector(&[310.15]));
    pa_data.set_acquisition_meta_datum(&acq::ACOUSTIC_COUPLING_AGENT, "water");
    pa_data.set_acquisition_meta_datum(&acq::SCANNING_METHOD, "full_scan");
    pa_data.set_acquisition_meta_datum(&acq::AD_SAMPLING_RATE, 4.0e7);
    pa_data.set_acquisition_meta_datum(&acq::FREQUENCY_DOMAIN_FILTER, vector(&[1.0e5, 1.0e7]));
    pa_data.set_acquisition_meta_datum(&acq::SPEED_OF_SOUND, 1540.0);
    pa_data.set_acquisition_meta_datum(
        &acq::MEASUREMENTS_PER_IMAGE,
        i64::try_from(shape.measurements).unwrap_or(i64::MAX),
    );
    pa_data.set_acquisition_meta_datum(&acq::REGIONS_OF_INTEREST, rois);
    pa_data.set_acquisition_meta_datum(&acq::MEASUREMENT_SPATIAL_POSES, table(frames, 6, 0.0));
    pa_data.set_acquisition_meta_datum(&acq::ULTRASOUND_IMAGE_DATA, table(4, 4, 1.0));
    pa_data.set_acquisition_meta_datum(&acq::ULTRASOUND_IMAGE_TIMESTAMPS, vector(&[0.0]));
    pa_data
}
