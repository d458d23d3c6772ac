//! Acquisition metadata registry.
//!
//! Everything needed to describe the measurement circumstances of one
//! photoacoustic time series recording, grouped into the binary-data,
//! container, and acquisition groups.

use crate::value::ValueKind::{self, Array, Float, Int, Map, Str};

use super::constraint::Constraint;
use super::datum::MetaDatum;
use super::units;

/// Permitted values of [`DIMENSIONALITY`]
pub const DIMENSIONALITY_STRINGS: &[&str] = &["time", "space", "time and space"];

const STR: &[ValueKind] = &[Str];
const ARRAY: &[ValueKind] = &[Array];

// Container group
pub static UUID: MetaDatum =
    MetaDatum::declare("uuid", true, STR, units::NO_UNIT, Constraint::Unconstrained);
pub static ENCODING: MetaDatum =
    MetaDatum::declare("encoding", true, STR, units::NO_UNIT, Constraint::Unconstrained);
pub static COMPRESSION: MetaDatum =
    MetaDatum::declare("compression", true, STR, units::NO_UNIT, Constraint::Unconstrained);

// Binary data group
pub static VERSION: MetaDatum =
    MetaDatum::declare("version", true, STR, units::NO_UNIT, Constraint::Unconstrained);
pub static DATA_TYPE: MetaDatum =
    MetaDatum::declare("data_type", true, STR, units::NO_UNIT, Constraint::Unconstrained);
pub static DIMENSIONALITY: MetaDatum = MetaDatum::declare(
    "dimensionality",
    true,
    STR,
    units::NO_UNIT,
    Constraint::EnumeratedString {
        allowed: DIMENSIONALITY_STRINGS,
    },
);
pub static SIZES: MetaDatum = MetaDatum::declare(
    "sizes",
    true,
    ARRAY,
    units::DIMENSIONLESS_UNIT,
    Constraint::NonNegativeNumbersInArray,
);

// Acquisition group
pub static REGIONS_OF_INTEREST: MetaDatum = MetaDatum::declare(
    "regions_of_interest",
    false,
    &[Map],
    units::METERS,
    Constraint::Unconstrained,
);
pub static PHOTOACOUSTIC_IMAGING_DEVICE_REFERENCE: MetaDatum = MetaDatum::declare(
    "photoacoustic_imaging_device_reference",
    false,
    STR,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static PULSE_ENERGY: MetaDatum = MetaDatum::declare(
    "pulse_energy",
    false,
    ARRAY,
    units::JOULES,
    Constraint::NonNegativeNumbersInArray,
);
pub static MEASUREMENT_TIMESTAMPS: MetaDatum = MetaDatum::declare(
    "measurement_timestamps",
    false,
    ARRAY,
    units::SECONDS,
    Constraint::NonNegativeNumbersInArray,
);
pub static MEASUREMENT_SPATIAL_POSES: MetaDatum = MetaDatum::declare(
    "measurement_spatial_poses",
    false,
    ARRAY,
    units::SECONDS,
    Constraint::FixedDimensionArray { rank: 2 },
);
pub static ACQUISITION_WAVELENGTHS: MetaDatum = MetaDatum::declare(
    "acquisition_wavelengths",
    false,
    ARRAY,
    units::METERS,
    Constraint::FixedDimensionArray { rank: 1 },
);
pub static TIME_GAIN_COMPENSATION: MetaDatum = MetaDatum::declare(
    "time_gain_compensation",
    false,
    ARRAY,
    units::DIMENSIONLESS_UNIT,
    Constraint::NonNegativeNumbersInArray,
);
pub static OVERALL_GAIN: MetaDatum = MetaDatum::declare(
    "overall_gain",
    false,
    &[Float],
    units::DIMENSIONLESS_UNIT,
    Constraint::NonNegativeNumber,
);
pub static ELEMENT_DEPENDENT_GAIN: MetaDatum = MetaDatum::declare(
    "element_dependent_gain",
    false,
    ARRAY,
    units::DIMENSIONLESS_UNIT,
    Constraint::NonNegativeNumbersInArray,
);
pub static TEMPERATURE_CONTROL: MetaDatum = MetaDatum::declare(
    "temperature_control",
    false,
    ARRAY,
    units::KELVIN,
    Constraint::NonNegativeNumbersInArray,
);
pub static ACOUSTIC_COUPLING_AGENT: MetaDatum = MetaDatum::declare(
    "acoustic_coupling_agent",
    false,
    STR,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static SCANNING_METHOD: MetaDatum = MetaDatum::declare(
    "scanning_method",
    false,
    STR,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static SPEED_OF_SOUND: MetaDatum = MetaDatum::declare(
    "speed_of_sound",
    false,
    &[Array, Float],
    units::METERS_PER_SECOND,
    Constraint::Unconstrained,
);
pub static AD_SAMPLING_RATE: MetaDatum = MetaDatum::declare(
    "ad_sampling_rate",
    true,
    &[Float],
    units::HERTZ,
    Constraint::NonNegativeNumber,
);
pub static FREQUENCY_DOMAIN_FILTER: MetaDatum = MetaDatum::declare(
    "frequency_domain_filter",
    false,
    ARRAY,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static MEASUREMENTS_PER_IMAGE: MetaDatum = MetaDatum::declare(
    "measurements_per_image",
    false,
    &[Int],
    units::NO_UNIT,
    Constraint::NonNegativeWholeNumber,
);
pub static ULTRASOUND_IMAGE_DATA: MetaDatum = MetaDatum::declare(
    "ultrasound_image_data",
    false,
    ARRAY,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static ULTRASOUND_IMAGE_TIMESTAMPS: MetaDatum = MetaDatum::declare(
    "ultrasound_image_timestamps",
    false,
    ARRAY,
    units::NO_UNIT,
    Constraint::Unconstrained,
);

/// Tags describing the binary tensor
pub static TAGS_BINARY: [&MetaDatum; 4] = [&DATA_TYPE, &DIMENSIONALITY, &SIZES, &VERSION];

/// Tags describing the container
pub static TAGS_CONTAINER: [&MetaDatum; 3] = [&UUID, &ENCODING, &COMPRESSION];

/// Tags describing the acquisition itself
pub static TAGS_ACQUISITION: [&MetaDatum; 18] = [
    &PHOTOACOUSTIC_IMAGING_DEVICE_REFERENCE,
    &PULSE_ENERGY,
    &ACQUISITION_WAVELENGTHS,
    &TIME_GAIN_COMPENSATION,
    &OVERALL_GAIN,
    &ELEMENT_DEPENDENT_GAIN,
    &TEMPERATURE_CONTROL,
    &ACOUSTIC_COUPLING_AGENT,
    &SCANNING_METHOD,
    &AD_SAMPLING_RATE,
    &FREQUENCY_DOMAIN_FILTER,
    &SPEED_OF_SOUND,
    &MEASUREMENTS_PER_IMAGE,
    &REGIONS_OF_INTEREST,
    &MEASUREMENT_TIMESTAMPS,
    &MEASUREMENT_SPATIAL_POSES,
    &ULTRASOUND_IMAGE_DATA,
    &ULTRASOUND_IMAGE_TIMESTAMPS,
];

/// Every acquisition tag: binary, acquisition, then container group
pub fn all() -> impl Iterator<Item = &'static MetaDatum> {
    TAGS_BINARY
        .iter()
        .chain(TAGS_ACQUISITION.iter())
        .chain(TAGS_CONTAINER.iter())
        .copied()
}

/// Look up an acquisition entry by tag
pub fn find(tag: &str) -> Option<&'static MetaDatum> {
    all().find(|datum| datum.tag() == tag)
}
