//! Typed accessors over the metadata maps of [`PaData`].
//!
//! Acquisition and `general` accessors borrow from the record. Element
//! accessors return owned values, since a query without an element id
//! assembles a new value from every element of the group.

use crate::metadata::{acquisition_tags, device_tags, MetaDatum};
use crate::value::{NumericArray, Value, ValueKind};

use super::{PaData, DETECTORS, ILLUMINATORS};

/// Errors raised by element accessors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
    /// Position beyond the number of elements in the group
    #[error("{group} position {position} is out of range ({len} elements)")]
    PositionOutOfRange {
        /// Element group queried
        group: &'static str,
        /// Requested position
        position: usize,
        /// Number of elements present
        len: usize,
    },

    /// No element with this id in the group
    #[error("{group} id '{id}' is not valid")]
    UnknownId {
        /// Element group queried
        group: &'static str,
        /// Requested id
        id: String,
    },
}

/// Selects one illumination or detection element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId<'a> {
    /// Element id (map key)
    Id(&'a str),
    /// Zero-based position in insertion order
    Position(usize),
}

impl<'a> From<&'a str> for ElementId<'a> {
    fn from(id: &'a str) -> Self {
        ElementId::Id(id)
    }
}

impl<'a> From<&'a String> for ElementId<'a> {
    fn from(id: &'a String) -> Self {
        ElementId::Id(id)
    }
}

impl From<usize> for ElementId<'_> {
    fn from(position: usize) -> Self {
        ElementId::Position(position)
    }
}

macro_rules! acquisition_accessors {
    ($($(#[$doc:meta])* $name:ident => $datum:path;)*) => {
        impl PaData {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> Option<&Value> {
                    self.get_acquisition_meta_datum(&$datum)
                }
            )*
        }
    };
}

macro_rules! element_accessors {
    ($group:expr; $($(#[$doc:meta])* $name:ident => $datum:path;)*) => {
        impl PaData {
            $(
                $(#[$doc])*
                pub fn $name<'a>(
                    &self,
                    id: Option<ElementId<'a>>,
                ) -> Result<Option<Value>, AccessError> {
                    self.element_attribute($group, &$datum, id)
                }
            )*
        }
    };
}

acquisition_accessors! {
    /// Container encoding
    get_encoding => acquisition_tags::ENCODING;
    /// Container compression
    get_compression => acquisition_tags::COMPRESSION;
    /// UUID of this dataset
    get_data_uuid => acquisition_tags::UUID;
    /// Element data type of the binary tensor
    get_data_type => acquisition_tags::DATA_TYPE;
    /// One of `time`, `space`, `time and space`
    get_dimensionality => acquisition_tags::DIMENSIONALITY;
    /// Shape of the binary tensor
    get_sizes => acquisition_tags::SIZES;
    get_photoacoustic_imaging_device_reference => acquisition_tags::PHOTOACOUSTIC_IMAGING_DEVICE_REFERENCE;
    get_pulse_energy => acquisition_tags::PULSE_ENERGY;
    get_measurement_time_stamps => acquisition_tags::MEASUREMENT_TIMESTAMPS;
    get_acquisition_wavelengths => acquisition_tags::ACQUISITION_WAVELENGTHS;
    get_time_gain_compensation => acquisition_tags::TIME_GAIN_COMPENSATION;
    get_overall_gain => acquisition_tags::OVERALL_GAIN;
    get_element_dependent_gain => acquisition_tags::ELEMENT_DEPENDENT_GAIN;
    /// Temperature of the coupling medium over time (K)
    get_temperature => acquisition_tags::TEMPERATURE_CONTROL;
    get_acoustic_coupling_agent => acquisition_tags::ACOUSTIC_COUPLING_AGENT;
    /// Speed of sound, either global or per region
    get_speed_of_sound => acquisition_tags::SPEED_OF_SOUND;
    get_scanning_method => acquisition_tags::SCANNING_METHOD;
    /// Analogue-to-digital sampling rate (Hz)
    get_sampling_rate => acquisition_tags::AD_SAMPLING_RATE;
    get_frequency_domain_filter => acquisition_tags::FREQUENCY_DOMAIN_FILTER;
    get_measurement_spatial_pose => acquisition_tags::MEASUREMENT_SPATIAL_POSES;
    get_measurements_per_image => acquisition_tags::MEASUREMENTS_PER_IMAGE;
    get_regions_of_interest => acquisition_tags::REGIONS_OF_INTEREST;
    get_ultrasound_image_data => acquisition_tags::ULTRASOUND_IMAGE_DATA;
    get_ultrasound_image_timestamps => acquisition_tags::ULTRASOUND_IMAGE_TIMESTAMPS;
}

element_accessors! { ILLUMINATORS;
    get_illuminator_position => device_tags::ILLUMINATOR_POSITION;
    get_illuminator_orientation => device_tags::ILLUMINATOR_ORIENTATION;
    get_illuminator_geometry => device_tags::ILLUMINATOR_GEOMETRY;
    /// One of `CUBOID`, `SPHERE`, `CIRCLE`, `MESH`
    get_illuminator_geometry_type => device_tags::ILLUMINATOR_GEOMETRY_TYPE;
    /// Minimum, maximum, and accuracy of the emitted wavelengths (m)
    get_wavelength_range => device_tags::WAVELENGTH_RANGE;
    get_beam_energy_profile => device_tags::BEAM_ENERGY_PROFILE;
    get_beam_stability_profile => device_tags::BEAM_STABILITY_PROFILE;
    /// Pulse duration (s)
    get_pulse_width => device_tags::PULSE_WIDTH;
    get_beam_profile => device_tags::BEAM_INTENSITY_PROFILE;
    get_beam_profile_distance => device_tags::INTENSITY_PROFILE_DISTANCE;
    /// Beam divergence (rad)
    get_beam_divergence => device_tags::BEAM_DIVERGENCE_ANGLES;
}

element_accessors! { DETECTORS;
    get_detector_position => device_tags::DETECTOR_POSITION;
    get_detector_orientation => device_tags::DETECTOR_ORIENTATION;
    get_detector_geometry => device_tags::DETECTOR_GEOMETRY;
    /// One of `CUBOID`, `SPHERE`, `CIRCLE`, `MESH`
    get_detector_geometry_type => device_tags::DETECTOR_GEOMETRY_TYPE;
    get_frequency_response => device_tags::FREQUENCY_RESPONSE;
    get_angular_response => device_tags::ANGULAR_RESPONSE;
}

impl PaData {
    /// Unique identifier of the device
    pub fn get_device_uuid(&self) -> Option<&str> {
        self.get_general_meta_datum(&device_tags::UNIQUE_IDENTIFIER)
            .and_then(Value::as_str)
    }

    /// Field of view `[x1, x2, y1, y2, z1, z2]` (m)
    pub fn get_field_of_view(&self) -> Option<&NumericArray> {
        self.get_general_meta_datum(&device_tags::FIELD_OF_VIEW)
            .and_then(Value::as_array)
    }

    /// Look up `datum` on one element of `group`, or on all of them.
    ///
    /// With an id, an absent tag is `Ok(None)`. Without one, the values of all
    /// elements are collected in insertion order: array-typed tags whose
    /// values share one shape are stacked along a new leading axis, anything
    /// else becomes a list (`Null` where an element lacks the tag).
    pub fn element_attribute(
        &self,
        group: &'static str,
        datum: &MetaDatum,
        id: Option<ElementId<'_>>,
    ) -> Result<Option<Value>, AccessError> {
        let elements = self.device_group(group);

        let Some(id) = id else {
            let Some(elements) = elements else {
                return Ok(None);
            };
            let values: Vec<Value> = elements
                .values()
                .map(|element| {
                    element
                        .as_map()
                        .and_then(|map| map.get(datum.tag()))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            if datum.dtype() == [ValueKind::Array] {
                if let Some(stacked) = stack_arrays(&values) {
                    return Ok(Some(Value::Array(stacked)));
                }
            }
            return Ok(Some(Value::List(values)));
        };

        let element = match id {
            ElementId::Position(position) => {
                let len = elements.map_or(0, |map| map.len());
                elements
                    .and_then(|map| map.get_index(position))
                    .map(|(_, element)| element)
                    .ok_or(AccessError::PositionOutOfRange {
                        group,
                        position,
                        len,
                    })?
            }
            ElementId::Id(key) => elements.and_then(|map| map.get(key)).ok_or_else(|| {
                AccessError::UnknownId {
                    group,
                    id: key.to_string(),
                }
            })?,
        };

        Ok(element
            .as_map()
            .and_then(|map| map.get(datum.tag()))
            .cloned())
    }
}

/// Stack equally shaped arrays along a leading element axis
fn stack_arrays(values: &[Value]) -> Option<NumericArray> {
    let arrays: Option<Vec<&NumericArray>> = values.iter().map(Value::as_array).collect();
    NumericArray::stack(&arrays?)
}
