use log::warn;

use crate::data::PaData;
use crate::storage::codec::MAX_RANK;
use crate::storage::{Container, Dataset, Group, Scalar};
use crate::value::{MetadataMap, Value};

use super::error::WriteError;
use super::{BINARY_TIME_SERIES_DATA, LIST_GROUP, META_DATA, META_DATA_DEVICE, NULL_SENTINEL};

/// Zero-padded width of sequence indices for a list of `len` items
pub(crate) fn index_width(len: usize) -> usize {
    let digits = len.saturating_sub(1).to_string().len();
    digits.max(3)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}/{key}")
    }
}

fn unsupported(path: &str, value: &Value, reason: impl Into<String>) -> WriteError {
    WriteError::Serialization {
        key: path.to_string(),
        kind: value.kind_name(),
        reason: reason.into(),
    }
}

/// Dataset holding a leaf value, `None` for maps and lists
fn leaf_dataset(value: &Value) -> Option<Dataset> {
    let dataset = match value {
        Value::Null => Dataset::Text(NULL_SENTINEL.to_string()),
        Value::Bool(flag) => Dataset::Scalar(Scalar::Bool(*flag)),
        Value::Int(number) => Dataset::Scalar(Scalar::Int(*number)),
        Value::Float(number) => Dataset::Scalar(Scalar::Float(*number)),
        Value::Str(text) => Dataset::Text(text.clone()),
        Value::Bytes(bytes) => Dataset::Bytes(bytes.clone()),
        Value::Array(array) => Dataset::Array(array.clone()),
        Value::List(_) | Value::Map(_) => return None,
    };
    Some(dataset)
}

/// Store `value` as the child `key` of `parent`, replacing any existing node.
///
/// Maps become groups, lists become a group holding a `list` group of
/// zero-padded indices, every other value becomes one dataset. `path` is
/// the location of `parent` and is only used in error messages.
pub fn write_value(parent: &mut Group, path: &str, key: &str, value: &Value) -> Result<(), WriteError> {
    let here = join(path, key);
    if key.is_empty() {
        return Err(unsupported(&here, value, "empty key"));
    }
    if key.contains('/') {
        return Err(unsupported(&here, value, "key contains '/'"));
    }

    match value {
        Value::Map(map) => write_map(parent, path, key, map),
        Value::List(items) => {
            let list = parent.create_group(key)?.create_group(LIST_GROUP)?;
            let list_path = join(&here, LIST_GROUP);
            let width = index_width(items.len());
            for (index, item) in items.iter().enumerate() {
                write_value(list, &list_path, &format!("{index:0width$}"), item)?;
            }
            Ok(())
        }
        Value::Array(array) if array.ndim() > MAX_RANK => Err(unsupported(
            &here,
            value,
            format!("{} axes exceed the maximum of {MAX_RANK}", array.ndim()),
        )),
        leaf => {
            if leaf.as_str() == Some(NULL_SENTINEL) {
                warn!("\"{here}\" holds the text \"{NULL_SENTINEL}\" and will read back as null");
            }
            match leaf_dataset(leaf) {
                Some(dataset) => Ok(parent.insert_dataset(key, dataset)?),
                None => Err(unsupported(&here, leaf, "not a leaf value")),
            }
        }
    }
}

/// Store `map` as the group `key` of `parent`, one child per entry in map order
pub fn write_map(parent: &mut Group, path: &str, key: &str, map: &MetadataMap) -> Result<(), WriteError> {
    let here = join(path, key);
    let group = parent.create_group(key)?;
    for (child_key, child) in map {
        if child_key == LIST_GROUP {
            return Err(unsupported(
                &join(&here, child_key),
                child,
                format!("the key \"{LIST_GROUP}\" is reserved for sequences"),
            ));
        }
        write_value(group, &here, child_key, child)?;
    }
    Ok(())
}

/// Build the container image of a record
pub fn write_pa_data(pa_data: &PaData) -> Result<Container, WriteError> {
    let binary = pa_data
        .binary_time_series_data
        .as_ref()
        .ok_or(WriteError::MissingBinaryData)?;
    if binary.ndim() > MAX_RANK {
        return Err(WriteError::Serialization {
            key: BINARY_TIME_SERIES_DATA.to_string(),
            kind: "array",
            reason: format!("{} axes exceed the maximum of {MAX_RANK}", binary.ndim()),
        });
    }

    let mut container = Container::new();
    let root = container.root_mut();
    root.insert_dataset(BINARY_TIME_SERIES_DATA, Dataset::Array(binary.clone()))?;
    write_map(root, "", META_DATA, &pa_data.meta_data_acquisition)?;
    write_map(root, "", META_DATA_DEVICE, &pa_data.meta_data_device)?;
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NumericArray;

    fn map(entries: Vec<(&str, Value)>) -> MetadataMap {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    #[test]
    fn test_index_width() {
        assert_eq!(index_width(0), 3);
        assert_eq!(index_width(1), 3);
        assert_eq!(index_width(1000), 3);
        assert_eq!(index_width(1001), 4);
        assert_eq!(index_width(123_456), 6);
    }

    #[test]
    fn test_list_layout() {
        let mut root = Group::new();
        let items: Vec<Value> = (0..12).map(Value::from).collect();
        write_value(&mut root, "", "timestamps", &Value::List(items)).unwrap();

        let list = root.group("timestamps").and_then(|g| g.group(LIST_GROUP)).unwrap();
        let names: Vec<&str> = list.children().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "000");
        assert_eq!(names[11], "011");
        assert_eq!(list.dataset("007"), Some(&Dataset::Scalar(Scalar::Int(7))));
    }

    #[test]
    fn test_leaves() {
        let mut root = Group::new();
        let entries = map(vec![
            ("flag", Value::Bool(true)),
            ("gain", Value::Float(1.5)),
            ("empty", Value::Null),
            ("blob", Value::Bytes(vec![1, 2])),
            ("sizes", Value::Array(NumericArray::from_vec(vec![4i64, 2048, 6]))),
        ]);
        write_map(&mut root, "", META_DATA, &entries).unwrap();

        let group = root.group(META_DATA).unwrap();
        assert_eq!(group.dataset("flag"), Some(&Dataset::Scalar(Scalar::Bool(true))));
        assert_eq!(group.dataset("empty"), Some(&Dataset::Text("None".to_string())));
        assert_eq!(group.dataset("blob"), Some(&Dataset::Bytes(vec![1, 2])));
        assert!(group.dataset("sizes").is_some_and(Dataset::is_array));
    }

    #[test]
    fn test_reserved_and_invalid_keys() {
        let mut root = Group::new();

        let reserved = map(vec![("list", Value::Int(1))]);
        match write_map(&mut root, "", META_DATA, &reserved) {
            Err(WriteError::Serialization { key, kind, .. }) => {
                assert_eq!(key, "meta_data/list");
                assert_eq!(kind, "int");
            }
            other => panic!("expected a serialization error, got {other:?}"),
        }

        let slashed = map(vec![("a/b", Value::from("x"))]);
        assert!(matches!(
            write_map(&mut root, "", META_DATA, &slashed),
            Err(WriteError::Serialization { .. })
        ));

        let nested_empty = map(vec![("roi", Value::Map(map(vec![("", Value::Null)])))]);
        match write_map(&mut root, "", META_DATA, &nested_empty) {
            Err(WriteError::Serialization { key, kind, .. }) => {
                assert_eq!(key, "meta_data/roi/");
                assert_eq!(kind, "null");
            }
            other => panic!("expected a serialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_tensor() {
        assert!(matches!(
            write_pa_data(&PaData::new()),
            Err(WriteError::MissingBinaryData)
        ));
    }

    #[test]
    fn test_rewrite_drops_stale_children() {
        let mut root = Group::new();
        write_map(&mut root, "", META_DATA, &map(vec![("a", Value::Int(1)), ("b", Value::Int(2))])).unwrap();
        write_map(&mut root, "", META_DATA, &map(vec![("a", Value::Int(3))])).unwrap();

        let group = root.group(META_DATA).unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.dataset("a"), Some(&Dataset::Scalar(Scalar::Int(3))));
    }

    #[test]
    fn test_rank_limit() {
        let mut root = Group::new();
        let widest = NumericArray::from_elem(&[1; MAX_RANK], 1.0f64);
        write_value(&mut root, META_DATA, "widest", &Value::Array(widest)).unwrap();
        let encoded = root.dataset("widest").unwrap().encode().unwrap();
        assert!(Dataset::decode(&encoded).is_ok());

        let deep = Value::Array(NumericArray::from_elem(&[1; MAX_RANK + 1], 1.0f64));
        match write_value(&mut root, META_DATA, "deep", &deep) {
            Err(WriteError::Serialization { key, kind, .. }) => {
                assert_eq!(key, "meta_data/deep");
                assert_eq!(kind, "array");
            }
            other => panic!("expected a serialization error, got {other:?}"),
        }
        assert!(!root.contains("deep"));

        let pa_data = PaData::from_parts(
            NumericArray::from_elem(&[1; MAX_RANK + 1], 0.0f32),
            MetadataMap::new(),
            MetadataMap::new(),
        );
        assert!(matches!(
            write_pa_data(&pa_data),
            Err(WriteError::Serialization { .. })
        ));
    }
}
