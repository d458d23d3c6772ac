//! Dynamic value tree shared by the metadata maps, the checkers, and the
//! container serializer.
//!
//! A [`Value`] is one node of a heterogeneous tree: maps and lists nest,
//! everything else is a leaf. Every node owns its children.

mod array;
mod json;

use std::fmt;

use indexmap::IndexMap;

pub use array::{DType, Element, NumericArray};

/// Insertion-ordered string-keyed map of values.
///
/// Equality ignores insertion order.
pub type MetadataMap = IndexMap<String, Value>;

/// Semantic type of a [`Value`], as declared by a metadata schema entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// UTF-8 text
    Str,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// Boolean flag
    Bool,
    /// Opaque bytes
    Bytes,
    /// N-dimensional numeric array
    Array,
    /// Nested map
    Map,
    /// Sequence of values
    List,
}

impl ValueKind {
    /// Lower-case name used in reports
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Str => "str",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::List => "list",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the metadata tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicitly empty field
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// UTF-8 text
    Str(String),
    /// Opaque bytes
    Bytes(Vec<u8>),
    /// N-dimensional numeric array
    Array(NumericArray),
    /// Ordered sequence
    List(Vec<Value>),
    /// Nested map
    Map(MetadataMap),
}

impl Value {
    /// Semantic kind of this value, `None` for [`Value::Null`]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Str(_) => Some(ValueKind::Str),
            Value::Bytes(_) => Some(ValueKind::Bytes),
            Value::Array(_) => Some(ValueKind::Array),
            Value::List(_) => Some(ValueKind::List),
            Value::Map(_) => Some(ValueKind::Map),
        }
    }

    /// Kind name for error messages, including `null`
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("null", ValueKind::name)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; rank-0 integer arrays are accepted too
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Array(a) if a.ndim() == 0 && a.dtype().is_integer() => {
                a.scalar_f64().map(|v| v as i64)
            }
            _ => None,
        }
    }

    /// Numeric view of an Int, a Float, or a rank-0 array
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Array(a) => a.scalar_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&NumericArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MetadataMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut MetadataMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consume the value, returning the inner map
    pub fn into_map(self) -> Option<MetadataMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<NumericArray> for Value {
    fn from(value: NumericArray) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<MetadataMap> for Value {
    fn from(value: MetadataMap) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
