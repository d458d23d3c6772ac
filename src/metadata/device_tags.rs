//! Device metadata registry.
//!
//! Describes a digital twin of a photoacoustic device: general information
//! plus one entry per illumination and detection element.

use std::f64::consts::PI;

use crate::value::ValueKind::{self, Array, Float, Int, Map, Str};

use super::constraint::Constraint;
use super::datum::MetaDatum;
use super::units;

/// Permitted values of the element geometry type tags
pub const GEOMETRY_TYPES: &[&str] = &["CUBOID", "SPHERE", "CIRCLE", "MESH"];

const STR: &[ValueKind] = &[Str];
const ARRAY: &[ValueKind] = &[Array];
const GEOMETRY: &[ValueKind] = &[Float, Array, Str];

const VECTOR: Constraint = Constraint::FixedDimensionArray { rank: 1 };
const TABLE: Constraint = Constraint::FixedDimensionArray { rank: 2 };

// General group
pub static GENERAL: MetaDatum =
    MetaDatum::declare("general", true, &[Map], units::NO_UNIT, Constraint::Unconstrained);
pub static UNIQUE_IDENTIFIER: MetaDatum = MetaDatum::declare(
    "unique_identifier",
    true,
    STR,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static ILLUMINATORS: MetaDatum = MetaDatum::declare(
    "illuminators",
    false,
    &[Map],
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static DETECTORS: MetaDatum =
    MetaDatum::declare("detectors", true, &[Map], units::NO_UNIT, Constraint::Unconstrained);
pub static FIELD_OF_VIEW: MetaDatum = MetaDatum::declare(
    "field_of_view",
    true,
    ARRAY,
    units::METERS,
    Constraint::FixedDimensionArrayWithShape {
        rank: 1,
        shape: &[6],
    },
);
pub static NUMBER_OF_ILLUMINATION_ELEMENTS: MetaDatum = MetaDatum::declare(
    "num_illuminators",
    false,
    &[Int],
    units::DIMENSIONLESS_UNIT,
    Constraint::NonNegativeWholeNumber,
);
pub static NUMBER_OF_DETECTION_ELEMENTS: MetaDatum = MetaDatum::declare(
    "num_detectors",
    false,
    &[Int],
    units::DIMENSIONLESS_UNIT,
    Constraint::NonNegativeWholeNumber,
);

// Illumination elements
pub static ILLUMINATION_ELEMENT: MetaDatum = MetaDatum::declare(
    "illumination_element",
    false,
    STR,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static ILLUMINATOR_POSITION: MetaDatum =
    MetaDatum::declare("illuminator_position", false, ARRAY, units::METERS, VECTOR);
pub static ILLUMINATOR_ORIENTATION: MetaDatum =
    MetaDatum::declare("illuminator_orientation", false, ARRAY, units::METERS, VECTOR);
pub static ILLUMINATOR_GEOMETRY: MetaDatum = MetaDatum::declare(
    "illuminator_geometry",
    false,
    GEOMETRY,
    units::METERS,
    Constraint::Unconstrained,
);
pub static ILLUMINATOR_GEOMETRY_TYPE: MetaDatum = MetaDatum::declare(
    "illuminator_geometry_type",
    false,
    STR,
    units::NO_UNIT,
    Constraint::EnumeratedString {
        allowed: GEOMETRY_TYPES,
    },
);
pub static WAVELENGTH_RANGE: MetaDatum =
    MetaDatum::declare("wavelength_range", false, ARRAY, units::METERS, VECTOR);
pub static BEAM_ENERGY_PROFILE: MetaDatum =
    MetaDatum::declare("beam_energy_profile", false, ARRAY, units::JOULES, TABLE);
pub static BEAM_STABILITY_PROFILE: MetaDatum =
    MetaDatum::declare("beam_stability_profile", false, ARRAY, units::JOULES, TABLE);
pub static PULSE_WIDTH: MetaDatum = MetaDatum::declare(
    "pulse_width",
    false,
    &[Float],
    units::SECONDS,
    Constraint::NonNegativeNumber,
);
pub static BEAM_INTENSITY_PROFILE: MetaDatum = MetaDatum::declare(
    "beam_intensity_profile",
    false,
    ARRAY,
    units::DIMENSIONLESS_UNIT,
    TABLE,
);
pub static INTENSITY_PROFILE_DISTANCE: MetaDatum = MetaDatum::declare(
    "intensity_profile_distance",
    false,
    &[Float],
    units::METERS,
    Constraint::NonNegativeNumber,
);
pub static BEAM_DIVERGENCE_ANGLES: MetaDatum = MetaDatum::declare(
    "beam_divergence_angles",
    false,
    &[Float],
    units::RADIANS,
    Constraint::BoundedNumber {
        lower: 0.0,
        upper: 2.0 * PI,
    },
);

// Detection elements
pub static DETECTION_ELEMENT: MetaDatum = MetaDatum::declare(
    "detection_element",
    true,
    STR,
    units::NO_UNIT,
    Constraint::Unconstrained,
);
pub static DETECTOR_POSITION: MetaDatum =
    MetaDatum::declare("detector_position", true, ARRAY, units::METERS, VECTOR);
pub static DETECTOR_ORIENTATION: MetaDatum =
    MetaDatum::declare("detector_orientation", false, ARRAY, units::METERS, VECTOR);
pub static DETECTOR_GEOMETRY: MetaDatum = MetaDatum::declare(
    "detector_geometry",
    false,
    GEOMETRY,
    units::METERS,
    Constraint::Unconstrained,
);
pub static DETECTOR_GEOMETRY_TYPE: MetaDatum = MetaDatum::declare(
    "detector_geometry_type",
    false,
    STR,
    units::NO_UNIT,
    Constraint::EnumeratedString {
        allowed: GEOMETRY_TYPES,
    },
);
pub static FREQUENCY_RESPONSE: MetaDatum = MetaDatum::declare(
    "frequency_response",
    false,
    ARRAY,
    units::HERTZ_PER_DIMENSIONLESS,
    Constraint::NonNegativeNumbersInArray,
);
pub static ANGULAR_RESPONSE: MetaDatum = MetaDatum::declare(
    "angular_response",
    false,
    ARRAY,
    units::RADIANS_PER_DIMENSIONLESS,
    TABLE,
);

pub static TAGS_GENERAL: [&MetaDatum; 7] = [
    &GENERAL,
    &UNIQUE_IDENTIFIER,
    &ILLUMINATORS,
    &DETECTORS,
    &FIELD_OF_VIEW,
    &NUMBER_OF_ILLUMINATION_ELEMENTS,
    &NUMBER_OF_DETECTION_ELEMENTS,
];

pub static TAGS_ILLUMINATORS: [&MetaDatum; 12] = [
    &ILLUMINATION_ELEMENT,
    &ILLUMINATOR_POSITION,
    &ILLUMINATOR_ORIENTATION,
    &ILLUMINATOR_GEOMETRY,
    &ILLUMINATOR_GEOMETRY_TYPE,
    &WAVELENGTH_RANGE,
    &BEAM_ENERGY_PROFILE,
    &BEAM_STABILITY_PROFILE,
    &PULSE_WIDTH,
    &BEAM_INTENSITY_PROFILE,
    &INTENSITY_PROFILE_DISTANCE,
    &BEAM_DIVERGENCE_ANGLES,
];

pub static TAGS_DETECTORS: [&MetaDatum; 7] = [
    &DETECTION_ELEMENT,
    &DETECTOR_POSITION,
    &DETECTOR_ORIENTATION,
    &DETECTOR_GEOMETRY,
    &FREQUENCY_RESPONSE,
    &ANGULAR_RESPONSE,
    &DETECTOR_GEOMETRY_TYPE,
];

/// Entries of the `general` group judged by the quality checkers
pub static CHECKED_GENERAL: [&MetaDatum; 2] = [&UNIQUE_IDENTIFIER, &FIELD_OF_VIEW];

/// Entries of each detection element judged by the quality checkers
pub static CHECKED_DETECTOR: [&MetaDatum; 6] = [
    &DETECTOR_POSITION,
    &DETECTOR_ORIENTATION,
    &DETECTOR_GEOMETRY,
    &DETECTOR_GEOMETRY_TYPE,
    &FREQUENCY_RESPONSE,
    &ANGULAR_RESPONSE,
];

/// Entries of each illumination element judged by the quality checkers
pub static CHECKED_ILLUMINATOR: [&MetaDatum; 11] = [
    &ILLUMINATOR_POSITION,
    &ILLUMINATOR_ORIENTATION,
    &ILLUMINATOR_GEOMETRY,
    &ILLUMINATOR_GEOMETRY_TYPE,
    &WAVELENGTH_RANGE,
    &BEAM_ENERGY_PROFILE,
    &BEAM_STABILITY_PROFILE,
    &PULSE_WIDTH,
    &BEAM_INTENSITY_PROFILE,
    &INTENSITY_PROFILE_DISTANCE,
    &BEAM_DIVERGENCE_ANGLES,
];

/// Every device tag: general, detector, then illuminator entries
pub fn all() -> impl Iterator<Item = &'static MetaDatum> {
    TAGS_GENERAL
        .iter()
        .chain(TAGS_DETECTORS.iter())
        .chain(TAGS_ILLUMINATORS.iter())
        .copied()
}

/// Look up a device entry by tag
pub fn find(tag: &str) -> Option<&'static MetaDatum> {
    all().find(|datum| datum.tag() == tag)
}
