use crate::value::ValueKind;

/// Errors raised when building a malformed [`MetaDatum`](super::MetaDatum)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Tag string is empty
    #[error("metadatum tag must not be empty")]
    EmptyTag,

    /// No accepted value kind declared
    #[error("metadatum '{0}' declares no data type")]
    EmptyDtype(String),

    /// Unit string is empty (use the "N/A" unit instead)
    #[error("metadatum '{0}' has an empty unit")]
    EmptyUnit(String),

    /// Bounded constraint with `lower > upper`
    #[error("metadatum '{tag}' has lower bound {lower} above upper bound {upper}")]
    InvertedBounds {
        /// Offending tag
        tag: String,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Shape constraint whose shape length differs from its rank
    #[error("metadatum '{tag}' expects rank {rank} but gives a shape of length {shape_len}")]
    ShapeRankMismatch {
        /// Offending tag
        tag: String,
        /// Declared rank
        rank: usize,
        /// Length of the declared shape
        shape_len: usize,
    },

    /// Enumerated string constraint without permitted values
    #[error("metadatum '{0}' enumerates no permitted strings")]
    EmptyEnumeration(String),
}

/// A value's runtime kind is not accepted by a constraint
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("value of '{tag}' was not of the expected data type: expected {expected}, found {found}")]
pub struct TypeMismatchError {
    /// Tag being evaluated
    pub tag: String,
    /// Human-readable list of accepted kinds
    pub expected: String,
    /// Kind name of the offending value
    pub found: &'static str,
}

impl TypeMismatchError {
    pub(crate) fn new(tag: &str, expected: &[ValueKind], found: &'static str) -> Self {
        let expected = expected
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(" | ");
        Self {
            tag: tag.to_string(),
            expected,
            found,
        }
    }
}
