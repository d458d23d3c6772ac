//! # Metadata schema
//!
//! Typed, constrained descriptions of every metadata field the format knows
//! about. Each field is a [`MetaDatum`]: its tag, whether it must be reported,
//! the value kinds it accepts, its unit, and a [`Constraint`] on its value
//! range.
//!
//! ## Registries
//!
//! - [`acquisition_tags`]: measurement circumstances (binary, container and
//!   acquisition groups)
//! - [`device_tags`]: the device description (general information plus one
//!   entry per illumination and detection element)
//!
//! Registries are `static` and never mutated.

pub mod acquisition_tags;
mod constraint;
mod datum;
pub mod device_tags;
mod error;
pub mod units;

#[cfg(test)]
mod tests;

pub use constraint::Constraint;
pub use datum::MetaDatum;
pub use error::{SchemaError, TypeMismatchError};

/// Revision tag written by this crate
pub const CURRENT_VERSION: &str = "V2";

/// Revision tag of the original four-axis tensor layout
pub const LEGACY_VERSION: &str = "V1";
