use log::warn;

use crate::data::PaData;
use crate::storage::{Container, Dataset, Group, Node, Scalar};
use crate::value::{MetadataMap, NumericArray, Value};

use super::error::ReadError;
use super::{BINARY_TIME_SERIES_DATA, LIST_GROUP, META_DATA, META_DATA_DEVICE, NULL_SENTINEL};

fn format_error(message: impl Into<String>) -> ReadError {
    ReadError::StorageFormat(message.into())
}

/// Value of a single dataset
pub fn read_dataset(dataset: &Dataset) -> Value {
    match dataset {
        Dataset::Text(text) if text == NULL_SENTINEL => Value::Null,
        Dataset::Text(text) => Value::Str(text.clone()),
        Dataset::Bytes(bytes) => Value::Bytes(bytes.clone()),
        Dataset::Array(array) => Value::Array(array.clone()),
        Dataset::Scalar(Scalar::Int(number)) => Value::Int(*number),
        Dataset::Scalar(Scalar::Float(number)) => Value::Float(*number),
        Dataset::Scalar(Scalar::Bool(flag)) => Value::Bool(*flag),
    }
}

/// Value of any node; `path` is only used in error messages
pub fn read_value(node: &Node, path: &str) -> Result<Value, ReadError> {
    match node {
        Node::Dataset(dataset) => Ok(read_dataset(dataset)),
        Node::Group(group) => read_group(group, path),
    }
}

/// A group holding a `list` group is a sequence, any other group is a map
pub fn read_group(group: &Group, path: &str) -> Result<Value, ReadError> {
    match group.get(LIST_GROUP) {
        Some(Node::Group(list)) => {
            if group.len() > 1 {
                warn!("Ignoring {} node(s) next to the sequence at \"{path}\"", group.len() - 1);
            }
            read_list(list, &format!("{path}/{LIST_GROUP}")).map(Value::List)
        }
        Some(Node::Dataset(_)) => Err(format_error(format!(
            "\"{path}/{LIST_GROUP}\" is a dataset, but the name is reserved for sequences"
        ))),
        None => read_map(group, path).map(Value::Map),
    }
}

fn read_map(group: &Group, path: &str) -> Result<MetadataMap, ReadError> {
    let mut map = MetadataMap::with_capacity(group.len());
    for (name, child) in group.children() {
        let value = read_value(child, &format!("{path}/{name}"))?;
        map.insert(name.to_string(), value);
    }
    Ok(map)
}

/// Elements of a `list` group in ascending numeric index order
fn read_list(list: &Group, path: &str) -> Result<Vec<Value>, ReadError> {
    let mut indexed = Vec::with_capacity(list.len());
    for (name, child) in list.children() {
        let index: usize = name
            .parse()
            .map_err(|_| format_error(format!("non-numeric sequence index \"{path}/{name}\"")))?;
        indexed.push((index, name, child));
    }
    indexed.sort_by_key(|(index, _, _)| *index);
    if let Some(pair) = indexed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(format_error(format!(
            "duplicate sequence index {} at \"{path}\"",
            pair[0].0
        )));
    }
    if let Some(missing) = indexed
        .iter()
        .enumerate()
        .find_map(|(position, (index, _, _))| (position != *index).then_some(position))
    {
        return Err(format_error(format!(
            "missing sequence index {missing} at \"{path}\""
        )));
    }
    indexed
        .into_iter()
        .map(|(_, name, child)| read_value(child, &format!("{path}/{name}")))
        .collect()
}

fn required_map(root: &Group, name: &str) -> Result<MetadataMap, ReadError> {
    match root.get(name) {
        Some(Node::Group(group)) => match read_group(group, name)? {
            Value::Map(map) => Ok(map),
            other => Err(format_error(format!(
                "\"{name}\" must be a map, found {}",
                other.kind_name()
            ))),
        },
        Some(Node::Dataset(_)) => Err(format_error(format!("\"{name}\" must be a group"))),
        None => Err(format_error(format!("missing required group \"{name}\""))),
    }
}

fn required_tensor(root: &Group) -> Result<NumericArray, ReadError> {
    match root.get(BINARY_TIME_SERIES_DATA) {
        Some(Node::Dataset(Dataset::Array(array))) => Ok(array.clone()),
        Some(Node::Dataset(other)) => Err(format_error(format!(
            "\"{BINARY_TIME_SERIES_DATA}\" must be a numeric array, found {}",
            other.describe()
        ))),
        Some(Node::Group(_)) => Err(format_error(format!(
            "\"{BINARY_TIME_SERIES_DATA}\" must be a dataset"
        ))),
        None => Err(format_error(format!(
            "missing required dataset \"{BINARY_TIME_SERIES_DATA}\""
        ))),
    }
}

/// Rebuild a record from its container image, without migration
pub fn read_pa_data(container: &Container) -> Result<PaData, ReadError> {
    let root = container.root();
    Ok(PaData::from_parts(
        required_tensor(root)?,
        required_map(root, META_DATA)?,
        required_map(root, META_DATA_DEVICE)?,
    ))
}
