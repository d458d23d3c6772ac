use std::fmt;

use crate::value::{Value, ValueKind};

use super::constraint::Constraint;
use super::error::{SchemaError, TypeMismatchError};

/// One schema entry: a tag plus everything needed to validate its value.
///
/// Registry entries are `static` and built with [`MetaDatum::declare`];
/// entries built at runtime go through the checked [`MetaDatum::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetaDatum {
    tag: &'static str,
    mandatory: bool,
    dtype: &'static [ValueKind],
    unit: &'static str,
    constraint: Constraint,
}

impl MetaDatum {
    /// Build an entry without validation (for compile-time registries)
    pub const fn declare(
        tag: &'static str,
        mandatory: bool,
        dtype: &'static [ValueKind],
        unit: &'static str,
        constraint: Constraint,
    ) -> Self {
        Self {
            tag,
            mandatory,
            dtype,
            unit,
            constraint,
        }
    }

    /// Build an entry, rejecting malformed declarations
    pub fn new(
        tag: &'static str,
        mandatory: bool,
        dtype: &'static [ValueKind],
        unit: &'static str,
        constraint: Constraint,
    ) -> Result<Self, SchemaError> {
        let datum = Self::declare(tag, mandatory, dtype, unit, constraint);
        datum.validate()?;
        Ok(datum)
    }

    /// Check the declaration itself
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.tag.is_empty() {
            return Err(SchemaError::EmptyTag);
        }
        if self.dtype.is_empty() {
            return Err(SchemaError::EmptyDtype(self.tag.to_string()));
        }
        if self.unit.is_empty() {
            return Err(SchemaError::EmptyUnit(self.tag.to_string()));
        }
        match self.constraint {
            Constraint::BoundedNumber { lower, upper } if lower > upper => {
                Err(SchemaError::InvertedBounds {
                    tag: self.tag.to_string(),
                    lower,
                    upper,
                })
            }
            Constraint::FixedDimensionArrayWithShape { rank, shape } if shape.len() != rank => {
                Err(SchemaError::ShapeRankMismatch {
                    tag: self.tag.to_string(),
                    rank,
                    shape_len: shape.len(),
                })
            }
            Constraint::EnumeratedString { allowed } if allowed.is_empty() => {
                Err(SchemaError::EmptyEnumeration(self.tag.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Key under which the value is stored
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Whether a complete record must carry this entry
    pub fn mandatory(&self) -> bool {
        self.mandatory
    }

    /// Accepted value kinds
    pub fn dtype(&self) -> &'static [ValueKind] {
        self.dtype
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// True if the value's kind is one of the declared kinds
    pub fn accepts_kind(&self, value: &Value) -> bool {
        value.kind().is_some_and(|kind| self.dtype.contains(&kind))
    }

    /// Evaluate the value range of `value` (absent or null is `Ok(false)`)
    pub fn evaluate_value_range(&self, value: Option<&Value>) -> Result<bool, TypeMismatchError> {
        self.constraint.evaluate(self.tag, self.dtype, value)
    }
}

impl fmt::Display for MetaDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.tag, self.unit)
    }
}
