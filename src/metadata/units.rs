//! SI and compound unit strings attached to metadata entries

/// No physical unit applies (text, identifiers, maps)
pub const NO_UNIT: &str = "N/A";
/// Dimensionless quantity
pub const DIMENSIONLESS_UNIT: &str = "one";
pub const METERS: &str = "m";
pub const RADIANS: &str = "rad";
pub const JOULES: &str = "J";
pub const SECONDS: &str = "s";
pub const KELVIN: &str = "K";
pub const HERTZ: &str = "Hz";
pub const METERS_PER_SECOND: &str = "m/s";
/// Frequency response table: frequency against dimensionless response
pub const HERTZ_PER_DIMENSIONLESS: &str = "Hz / one";
/// Angular response table: angle against dimensionless response
pub const RADIANS_PER_DIMENSIONLESS: &str = "rad / one";

/// Every unit string used by the registries
pub const ALL: [&str; 11] = [
    NO_UNIT,
    DIMENSIONLESS_UNIT,
    METERS,
    RADIANS,
    JOULES,
    SECONDS,
    KELVIN,
    HERTZ,
    METERS_PER_SECOND,
    HERTZ_PER_DIMENSIONLESS,
    RADIANS_PER_DIMENSIONLESS,
];
