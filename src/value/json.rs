//! JSON rendering of value trees for human inspection.
//!
//! The rendering is lossy (large arrays are summarized) and is never read back.

use serde_json::{json, Map, Number};

use super::{NumericArray, Value};

/// Arrays with more elements than this are summarized by dtype and shape only
pub const MAX_INLINE_ELEMENTS: usize = 32;

impl Value {
    /// Render this value as JSON for display
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Int(i) => json!(i),
            Value::Float(f) => float_to_json(*f),
            Value::Str(s) => json!(s),
            Value::Bytes(bytes) => json!({ "bytes": bytes.len() }),
            Value::Array(array) => array.to_json(),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), value.to_json());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

impl NumericArray {
    /// Render as `{dtype, shape, values?}`
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = Map::new();
        out.insert("dtype".into(), json!(self.dtype().name()));
        out.insert("shape".into(), json!(self.shape()));
        if self.len() <= MAX_INLINE_ELEMENTS {
            let values: Vec<serde_json::Value> = self.iter_f64().map(float_to_json).collect();
            out.insert("values".into(), serde_json::Value::Array(values));
        }
        serde_json::Value::Object(out)
    }
}

fn float_to_json(value: f64) -> serde_json::Value {
    // NaN and infinities have no JSON number form
    Number::from_f64(value).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
