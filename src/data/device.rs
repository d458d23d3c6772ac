//! Builders for the device metadata map.

use log::debug;
use uuid::Uuid;

use crate::metadata::{device_tags, MetaDatum};
use crate::value::{MetadataMap, NumericArray, Value};

use super::{DETECTORS, GENERAL, ILLUMINATORS};

/// Assembles the `general`, `illuminators`, and `detectors` groups of a
/// device description.
///
/// # Example
///
/// ```
/// use ipasc_data::data::{DetectionElementCreator, DeviceMetaDataCreator};
/// use ipasc_data::value::NumericArray;
///
/// let mut device = DeviceMetaDataCreator::new();
/// device.set_general_information(
///     "scanner-0001",
///     NumericArray::from_vec(vec![0.0, 0.04, 0.0, 0.0, 0.0, 0.04]),
/// );
///
/// let mut detector = DetectionElementCreator::new();
/// detector.set_detector_position(NumericArray::from_vec(vec![0.0, 0.0, 0.0]));
/// device.add_detection_element(detector.get_dictionary());
///
/// let device_map = device.finalize_device_meta_data();
/// assert!(device_map.contains_key("detectors"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeviceMetaDataCreator {
    general: MetadataMap,
    illuminators: MetadataMap,
    detectors: MetadataMap,
}

impl DeviceMetaDataCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device identifier and field of view
    pub fn set_general_information(
        &mut self,
        unique_identifier: impl Into<String>,
        field_of_view: NumericArray,
    ) -> &mut Self {
        self.general.insert(
            device_tags::UNIQUE_IDENTIFIER.tag().to_string(),
            Value::Str(unique_identifier.into()),
        );
        self.general.insert(
            device_tags::FIELD_OF_VIEW.tag().to_string(),
            Value::Array(field_of_view),
        );
        self
    }

    /// Add a detection element under a fresh random id, returning the id
    pub fn add_detection_element(&mut self, element: MetadataMap) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_detection_element(id.clone(), element);
        id
    }

    /// Add (or replace) a detection element under a caller-chosen id
    pub fn insert_detection_element(&mut self, id: impl Into<String>, element: MetadataMap) {
        let id = id.into();
        debug!("Adding detection element {}", id);
        self.detectors.insert(id, Value::Map(element));
    }

    /// Add an illumination element under a fresh random id, returning the id
    pub fn add_illumination_element(&mut self, element: MetadataMap) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_illumination_element(id.clone(), element);
        id
    }

    /// Add (or replace) an illumination element under a caller-chosen id
    pub fn insert_illumination_element(&mut self, id: impl Into<String>, element: MetadataMap) {
        let id = id.into();
        debug!("Adding illumination element {}", id);
        self.illuminators.insert(id, Value::Map(element));
    }

    /// Record the element counts in `general` and return a copy of the
    /// assembled device map.
    pub fn finalize_device_meta_data(&mut self) -> MetadataMap {
        self.general.insert(
            device_tags::NUMBER_OF_ILLUMINATION_ELEMENTS.tag().to_string(),
            Value::from(self.illuminators.len()),
        );
        self.general.insert(
            device_tags::NUMBER_OF_DETECTION_ELEMENTS.tag().to_string(),
            Value::from(self.detectors.len()),
        );

        let mut device = MetadataMap::with_capacity(3);
        device.insert(GENERAL.to_string(), Value::Map(self.general.clone()));
        device.insert(ILLUMINATORS.to_string(), Value::Map(self.illuminators.clone()));
        device.insert(DETECTORS.to_string(), Value::Map(self.detectors.clone()));
        device
    }
}

fn set(element: &mut MetadataMap, datum: &MetaDatum, value: Value) {
    element.insert(datum.tag().to_string(), value);
}

/// Builds the map describing one detection element
#[derive(Debug, Clone, Default)]
pub struct DetectionElementCreator {
    element: MetadataMap,
}

impl DetectionElementCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the element centre `[x, y, z]` (m)
    pub fn set_detector_position(&mut self, position: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::DETECTOR_POSITION, position.into());
        self
    }

    /// Unit vector normal to the element surface
    pub fn set_detector_orientation(&mut self, orientation: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::DETECTOR_ORIENTATION, orientation.into());
        self
    }

    /// Geometry description; its meaning depends on the geometry type
    pub fn set_detector_geometry(&mut self, geometry: impl Into<Value>) -> &mut Self {
        set(&mut self.element, &device_tags::DETECTOR_GEOMETRY, geometry.into());
        self
    }

    /// One of `CUBOID`, `SPHERE`, `CIRCLE`, `MESH`
    pub fn set_detector_geometry_type(&mut self, geometry_type: &str) -> &mut Self {
        set(&mut self.element, &device_tags::DETECTOR_GEOMETRY_TYPE, geometry_type.into());
        self
    }

    pub fn set_frequency_response(&mut self, response: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::FREQUENCY_RESPONSE, response.into());
        self
    }

    pub fn set_angular_response(&mut self, response: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::ANGULAR_RESPONSE, response.into());
        self
    }

    /// Copy of the element map built so far
    pub fn get_dictionary(&self) -> MetadataMap {
        self.element.clone()
    }
}

/// Builds the map describing one illumination element
#[derive(Debug, Clone, Default)]
pub struct IlluminationElementCreator {
    element: MetadataMap,
}

impl IlluminationElementCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the element centre `[x, y, z]` (m)
    pub fn set_illuminator_position(&mut self, position: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::ILLUMINATOR_POSITION, position.into());
        self
    }

    /// Direction of the emitted beam
    pub fn set_illuminator_orientation(&mut self, orientation: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::ILLUMINATOR_ORIENTATION, orientation.into());
        self
    }

    pub fn set_illuminator_geometry(&mut self, geometry: impl Into<Value>) -> &mut Self {
        set(&mut self.element, &device_tags::ILLUMINATOR_GEOMETRY, geometry.into());
        self
    }

    /// One of `CUBOID`, `SPHERE`, `CIRCLE`, `MESH`
    pub fn set_illuminator_geometry_type(&mut self, geometry_type: &str) -> &mut Self {
        set(&mut self.element, &device_tags::ILLUMINATOR_GEOMETRY_TYPE, geometry_type.into());
        self
    }

    /// `[min, max, accuracy]` of the emitted wavelengths (m)
    pub fn set_wavelength_range(&mut self, range: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::WAVELENGTH_RANGE, range.into());
        self
    }

    pub fn set_beam_energy_profile(&mut self, profile: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::BEAM_ENERGY_PROFILE, profile.into());
        self
    }

    pub fn set_beam_stability_profile(&mut self, profile: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::BEAM_STABILITY_PROFILE, profile.into());
        self
    }

    /// Pulse duration (s)
    pub fn set_pulse_width(&mut self, pulse_width: f64) -> &mut Self {
        set(&mut self.element, &device_tags::PULSE_WIDTH, pulse_width.into());
        self
    }

    pub fn set_beam_intensity_profile(&mut self, profile: NumericArray) -> &mut Self {
        set(&mut self.element, &device_tags::BEAM_INTENSITY_PROFILE, profile.into());
        self
    }

    /// Distance from the element at which the intensity profile was taken (m)
    pub fn set_intensity_profile_distance(&mut self, distance: f64) -> &mut Self {
        set(&mut self.element, &device_tags::INTENSITY_PROFILE_DISTANCE, distance.into());
        self
    }

    /// Beam divergence (rad)
    pub fn set_beam_divergence_angles(&mut self, angle: f64) -> &mut Self {
        set(&mut self.element, &device_tags::BEAM_DIVERGENCE_ANGLES, angle.into());
        self
    }

    /// Copy of the element map built so far
    pub fn get_dictionary(&self) -> MetadataMap {
        self.element.clone()
    }
}
