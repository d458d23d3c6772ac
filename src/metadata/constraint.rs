use crate::value::{Value, ValueKind};

use super::error::TypeMismatchError;

const NUMBER_KINDS: &[ValueKind] = &[ValueKind::Int, ValueKind::Float, ValueKind::Array];
const WHOLE_NUMBER_KINDS: &[ValueKind] = &[ValueKind::Int, ValueKind::Array];
const ARRAY_KINDS: &[ValueKind] = &[ValueKind::Array];
const STRING_KINDS: &[ValueKind] = &[ValueKind::Str];

/// Value-range rule attached to a metadata entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Any value of the declared kinds
    Unconstrained,
    /// A single number `>= 0` (int, float, or rank-0 array)
    NonNegativeNumber,
    /// A single integer `>= 0` (int or rank-0 integer array)
    NonNegativeWholeNumber,
    /// An array whose elements are all `>= 0`
    NonNegativeNumbersInArray,
    /// A number, or an array of numbers, inside `[lower, upper]`
    BoundedNumber {
        /// Inclusive lower bound
        lower: f64,
        /// Inclusive upper bound
        upper: f64,
    },
    /// An array of the given rank; scalars count as rank 1
    FixedDimensionArray {
        /// Expected number of axes
        rank: usize,
    },
    /// An array of exactly the given shape
    FixedDimensionArrayWithShape {
        /// Expected number of axes
        rank: usize,
        /// Expected length per axis
        shape: &'static [usize],
    },
    /// A string drawn from a fixed set
    EnumeratedString {
        /// Permitted values
        allowed: &'static [&'static str],
    },
}

impl Constraint {
    /// Short name for reports
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Unconstrained => "unconstrained",
            Constraint::NonNegativeNumber => "non-negative number",
            Constraint::NonNegativeWholeNumber => "non-negative whole number",
            Constraint::NonNegativeNumbersInArray => "non-negative numbers in array",
            Constraint::BoundedNumber { .. } => "bounded number",
            Constraint::FixedDimensionArray { .. } => "fixed dimension array",
            Constraint::FixedDimensionArrayWithShape { .. } => "fixed shape array",
            Constraint::EnumeratedString { .. } => "enumerated string",
        }
    }

    /// Check `value` against this rule.
    ///
    /// `declared` are the kinds the owning entry accepts; only
    /// [`Constraint::Unconstrained`] consults them. Absent and null values
    /// evaluate to `Ok(false)`. A value of a kind the rule cannot judge is a
    /// [`TypeMismatchError`]; a value of the right kind outside the permitted
    /// range is `Ok(false)`.
    pub fn evaluate(
        &self,
        tag: &str,
        declared: &[ValueKind],
        value: Option<&Value>,
    ) -> Result<bool, TypeMismatchError> {
        let value = match value {
            None | Some(Value::Null) => return Ok(false),
            Some(value) => value,
        };

        match self {
            Constraint::Unconstrained => match value.kind() {
                Some(kind) if declared.contains(&kind) => Ok(true),
                _ => Err(TypeMismatchError::new(tag, declared, value.kind_name())),
            },
            Constraint::NonNegativeNumber => match value {
                Value::Int(i) => Ok(*i >= 0),
                Value::Float(f) => Ok(*f >= 0.0),
                Value::Array(a) if a.ndim() == 0 => Ok(a.iter_f64().all(|v| v >= 0.0)),
                _ => Err(TypeMismatchError::new(tag, NUMBER_KINDS, value.kind_name())),
            },
            Constraint::NonNegativeWholeNumber => match value {
                Value::Int(i) => Ok(*i >= 0),
                Value::Array(a) if a.ndim() == 0 && a.dtype().is_integer() => {
                    Ok(a.iter_f64().all(|v| v >= 0.0))
                }
                _ => Err(TypeMismatchError::new(
                    tag,
                    WHOLE_NUMBER_KINDS,
                    value.kind_name(),
                )),
            },
            Constraint::NonNegativeNumbersInArray => match value {
                Value::Array(a) => Ok(a.iter_f64().all(|v| v >= 0.0)),
                _ => Err(TypeMismatchError::new(tag, ARRAY_KINDS, value.kind_name())),
            },
            Constraint::BoundedNumber { lower, upper } => {
                let in_range = |v: f64| *lower <= v && v <= *upper;
                match value {
                    Value::Int(i) => Ok(in_range(*i as f64)),
                    Value::Float(f) => Ok(in_range(*f)),
                    Value::Array(a) => Ok(a.iter_f64().all(in_range)),
                    _ => Err(TypeMismatchError::new(tag, NUMBER_KINDS, value.kind_name())),
                }
            }
            Constraint::FixedDimensionArray { rank } => match value {
                Value::Array(a) => Ok(a.ndim().max(1) == *rank),
                _ => Err(TypeMismatchError::new(tag, ARRAY_KINDS, value.kind_name())),
            },
            Constraint::FixedDimensionArrayWithShape { rank, shape } => match value {
                Value::Array(a) => Ok(a.ndim() == *rank && a.shape() == *shape),
                _ => Err(TypeMismatchError::new(tag, ARRAY_KINDS, value.kind_name())),
            },
            Constraint::EnumeratedString { allowed } => match value {
                Value::Str(s) => Ok(allowed.contains(&s.as_str())),
                _ => Err(TypeMismatchError::new(tag, STRING_KINDS, value.kind_name())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use proptest::prelude::*;

    use super::*;
    use crate::value::NumericArray;

    const FLOAT: &[ValueKind] = &[ValueKind::Float];

    fn eval(constraint: Constraint, value: Value) -> Result<bool, TypeMismatchError> {
        constraint.evaluate("test_tag", FLOAT, Some(&value))
    }

    #[test]
    fn test_absent_and_null_are_false() {
        for constraint in [
            Constraint::Unconstrained,
            Constraint::NonNegativeNumber,
            Constraint::BoundedNumber {
                lower: 0.0,
                upper: 1.0,
            },
            Constraint::EnumeratedString { allowed: &["a"] },
        ] {
            assert_eq!(constraint.evaluate("t", FLOAT, None), Ok(false));
            assert_eq!(constraint.evaluate("t", FLOAT, Some(&Value::Null)), Ok(false));
        }
    }

    #[test]
    fn test_unconstrained_uses_declared_kinds() {
        assert_eq!(eval(Constraint::Unconstrained, Value::Float(-3.0)), Ok(true));
        let err = eval(Constraint::Unconstrained, Value::from("x")).unwrap_err();
        assert_eq!(err.tag, "test_tag");
        assert_eq!(err.found, "str");
    }

    #[test]
    fn test_non_negative_number() {
        assert_eq!(eval(Constraint::NonNegativeNumber, Value::Float(0.0)), Ok(true));
        assert_eq!(eval(Constraint::NonNegativeNumber, Value::Float(-0.1)), Ok(false));
        assert_eq!(eval(Constraint::NonNegativeNumber, Value::Int(5)), Ok(true));
        assert_eq!(
            eval(Constraint::NonNegativeNumber, Value::Array(NumericArray::scalar(2.0f32))),
            Ok(true)
        );
        assert!(eval(
            Constraint::NonNegativeNumber,
            Value::Array(NumericArray::from_vec(vec![1.0f64]))
        )
        .is_err());
        assert!(eval(Constraint::NonNegativeNumber, Value::from("1")).is_err());
    }

    #[test]
    fn test_non_negative_whole_number() {
        assert_eq!(eval(Constraint::NonNegativeWholeNumber, Value::Int(0)), Ok(true));
        assert_eq!(eval(Constraint::NonNegativeWholeNumber, Value::Int(-1)), Ok(false));
        assert_eq!(
            eval(Constraint::NonNegativeWholeNumber, Value::Array(NumericArray::scalar(3u8))),
            Ok(true)
        );
        assert!(eval(Constraint::NonNegativeWholeNumber, Value::Float(1.0)).is_err());
        assert!(eval(
            Constraint::NonNegativeWholeNumber,
            Value::Array(NumericArray::scalar(1.0f64))
        )
        .is_err());
    }

    #[test]
    fn test_non_negative_numbers_in_array() {
        let ok = NumericArray::from_shape_vec(&[2, 2], vec![0.0f64, 1.0, 2.0, 3.0]).unwrap();
        let bad = NumericArray::from_vec(vec![1i32, -1]);
        assert_eq!(eval(Constraint::NonNegativeNumbersInArray, Value::Array(ok)), Ok(true));
        assert_eq!(eval(Constraint::NonNegativeNumbersInArray, Value::Array(bad)), Ok(false));
        assert!(eval(Constraint::NonNegativeNumbersInArray, Value::Float(1.0)).is_err());
    }

    #[test]
    fn test_bounded_number_edges() {
        let c = Constraint::BoundedNumber {
            lower: 0.0,
            upper: 2.0 * PI,
        };
        assert_eq!(eval(c, Value::Float(0.0)), Ok(true));
        assert_eq!(eval(c, Value::Float(2.0 * PI)), Ok(true));
        assert_eq!(eval(c, Value::Float(-1e-9)), Ok(false));
        assert_eq!(eval(c, Value::Float(2.0 * PI + 1e-9)), Ok(false));
        assert_eq!(eval(c, Value::Float(f64::NAN)), Ok(false));
        assert_eq!(
            eval(c, Value::Array(NumericArray::from_vec(vec![0.1f64, 7.0]))),
            Ok(false)
        );
        assert!(eval(c, Value::Bool(true)).is_err());
    }

    #[test]
    fn test_fixed_dimension_array() {
        let c = Constraint::FixedDimensionArray { rank: 1 };
        assert_eq!(eval(c, Value::Array(NumericArray::scalar(1.0f64))), Ok(true));
        assert_eq!(eval(c, Value::Array(NumericArray::from_vec(vec![1.0f64, 2.0]))), Ok(true));
        assert_eq!(
            eval(c, Value::Array(NumericArray::from_elem(&[2, 2], 0.0f64))),
            Ok(false)
        );
        assert!(eval(c, Value::Float(1.0)).is_err());
    }

    #[test]
    fn test_fixed_shape_array() {
        let c = Constraint::FixedDimensionArrayWithShape {
            rank: 1,
            shape: &[6],
        };
        assert_eq!(eval(c, Value::Array(NumericArray::from_elem(&[6], 0.0f64))), Ok(true));
        assert_eq!(eval(c, Value::Array(NumericArray::from_elem(&[5], 0.0f64))), Ok(false));
        assert_eq!(eval(c, Value::Array(NumericArray::from_elem(&[6, 1], 0.0f64))), Ok(false));
    }

    #[test]
    fn test_enumerated_string() {
        let c = Constraint::EnumeratedString {
            allowed: &["time", "space"],
        };
        assert_eq!(eval(c, Value::from("time")), Ok(true));
        assert_eq!(eval(c, Value::from("Time")), Ok(false));
        assert!(eval(c, Value::Int(1)).is_err());
    }

    proptest! {
        #[test]
        fn prop_bounded_matches_interval(lower in -1e3f64..1e3, width in 0.0f64..1e3, x in -3e3f64..3e3) {
            let upper = lower + width;
            let c = Constraint::BoundedNumber { lower, upper };
            let expected = lower <= x && x <= upper;
            prop_assert_eq!(eval(c, Value::Float(x)), Ok(expected));
        }

        #[test]
        fn prop_non_negative_array(values in proptest::collection::vec(-10i64..10, 0..32)) {
            let expected = values.iter().all(|v| *v >= 0);
            let array = NumericArray::from_vec(values);
            prop_assert_eq!(eval(Constraint::NonNegativeNumbersInArray, Value::Array(array)), Ok(expected));
        }
    }
}
