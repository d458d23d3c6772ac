//! # Photoacoustic data model
//!
//! [`PaData`] bundles one binary time series tensor with its acquisition and
//! device metadata maps. Device maps are usually assembled with
//! [`DeviceMetaDataCreator`]; vendor converters implement [`Adapter`].

mod accessors;
mod adapter;
mod device;
mod sample;


pub use accessors::{AccessError, ElementId};
pub use adapter::{Adapter, AdapterError};
pub use device::{DetectionElementCreator, DeviceMetaDataCreator, IlluminationElementCreator};
pub use sample::{sample_pa_data, SampleShape};

use crate::metadata::{acquisition_tags, device_tags, MetaDatum};
use crate::value::{MetadataMap, NumericArray, Value};

/// Key of the `general` group in the device map
pub const GENERAL: &str = "general";
/// Key of the illumination element group in the device map
pub const ILLUMINATORS: &str = "illuminators";
/// Key of the detection element group in the device map
pub const DETECTORS: &str = "detectors";

/// A photoacoustic measurement: time series data plus metadata.
///
/// The tensor axes are `[detector, sample, wavelength * measurement]`.
/// Files written before the combined axis existed carry a four-axis tensor
/// and are migrated on load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaData {
    /// Raw time series samples
    pub binary_time_series_data: Option<NumericArray>,
    /// Acquisition metadata, keyed by acquisition tag (custom keys allowed)
    pub meta_data_acquisition: MetadataMap,
    /// Device metadata: `general`, `illuminators`, `detectors`
    pub meta_data_device: MetadataMap,
}

impl PaData {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from its three parts
    pub fn from_parts(
        binary_time_series_data: NumericArray,
        meta_data_acquisition: MetadataMap,
        meta_data_device: MetadataMap,
    ) -> Self {
        Self {
            binary_time_series_data: Some(binary_time_series_data),
            meta_data_acquisition,
            meta_data_device,
        }
    }

    /// Replace the tensor and record its shape under `sizes`
    pub fn set_binary_time_series_data(&mut self, data: NumericArray) {
        let sizes: Vec<i64> = data
            .shape()
            .iter()
            .map(|&len| i64::try_from(len).unwrap_or(i64::MAX))
            .collect();
        self.meta_data_acquisition.insert(
            acquisition_tags::SIZES.tag().to_string(),
            Value::Array(NumericArray::from_vec(sizes)),
        );
        self.binary_time_series_data = Some(data);
    }

    /// Set an acquisition entry
    pub fn set_acquisition_meta_datum(&mut self, datum: &MetaDatum, value: impl Into<Value>) {
        self.meta_data_acquisition
            .insert(datum.tag().to_string(), value.into());
    }

    /// Add a field that is not part of the acquisition registry.
    ///
    /// Empty keys and null values are rejected.
    pub fn add_custom_meta_datum(
        &mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), AdapterError> {
        if key.is_empty() {
            return Err(AdapterError::EmptyKey);
        }
        let value = value.into();
        if value.is_null() {
            return Err(AdapterError::NullValue(key.to_string()));
        }
        self.meta_data_acquisition.insert(key.to_string(), value);
        Ok(())
    }

    /// Ids of all illumination elements, in insertion order
    pub fn get_illuminator_ids(&self) -> Vec<String> {
        self.element_ids(ILLUMINATORS)
    }

    /// Ids of all detection elements, in insertion order
    pub fn get_detector_ids(&self) -> Vec<String> {
        self.element_ids(DETECTORS)
    }

    fn element_ids(&self, group: &str) -> Vec<String> {
        self.device_group(group)
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn device_group(&self, group: &str) -> Option<&MetadataMap> {
        self.meta_data_device.get(group).and_then(Value::as_map)
    }

    /// Acquisition entry for a registry tag
    pub fn get_acquisition_meta_datum(&self, datum: &MetaDatum) -> Option<&Value> {
        self.meta_data_acquisition.get(datum.tag())
    }

    /// Acquisition entry for an arbitrary key
    pub fn get_custom_meta_datum(&self, key: &str) -> Option<&Value> {
        self.meta_data_acquisition.get(key)
    }

    /// Entry of the device `general` group
    pub fn get_general_meta_datum(&self, datum: &MetaDatum) -> Option<&Value> {
        self.device_group(GENERAL)?.get(datum.tag())
    }

    /// Revision tag of the tensor layout, if recorded
    pub fn version(&self) -> Option<&str> {
        self.get_acquisition_meta_datum(&acquisition_tags::VERSION)
            .and_then(Value::as_str)
    }

    /// Number of illumination elements declared in `general`
    pub fn get_number_of_illuminators(&self) -> Option<i64> {
        self.get_general_meta_datum(&device_tags::NUMBER_OF_ILLUMINATION_ELEMENTS)
            .and_then(Value::as_i64)
    }

    /// Number of detection elements declared in `general`
    pub fn get_number_of_detectors(&self) -> Option<i64> {
        self.get_general_meta_datum(&device_tags::NUMBER_OF_DETECTION_ELEMENTS)
            .and_then(Value::as_i64)
    }
}
