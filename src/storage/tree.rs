use indexmap::IndexMap;

use super::codec::Dataset;
use super::error::StorageError;

/// A node of the container tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Dataset(Dataset),
}

impl Node {
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Dataset(_) => None,
        }
    }

    pub fn as_dataset(&self) -> Option<&Dataset> {
        match self {
            Node::Dataset(dataset) => Some(dataset),
            Node::Group(_) => None,
        }
    }

    /// "group" or "dataset"
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Group(_) => "group",
            Node::Dataset(_) => "dataset",
        }
    }
}

/// Named children in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    children: IndexMap<String, Node>,
}

/// Reject names that cannot be stored as a single path segment
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() || name.contains('/') {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.get(name).and_then(Node::as_group)
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.get(name).and_then(Node::as_dataset)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Remove a child, returning it
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.children.shift_remove(name)
    }

    /// Store `node` under `name`, replacing any existing child
    pub fn insert(&mut self, name: &str, node: Node) -> Result<(), StorageError> {
        validate_name(name)?;
        self.children.shift_remove(name);
        self.children.insert(name.to_string(), node);
        Ok(())
    }

    /// Store a dataset under `name`, replacing any existing child
    pub fn insert_dataset(&mut self, name: &str, dataset: Dataset) -> Result<(), StorageError> {
        self.insert(name, Node::Dataset(dataset))
    }

    /// Replace any existing child with a new empty group and return it
    pub fn create_group(&mut self, name: &str) -> Result<&mut Group, StorageError> {
        validate_name(name)?;
        self.children.shift_remove(name);
        self.require_group(name)
    }

    /// Return the child group `name`, creating it if absent.
    ///
    /// Fails if `name` already holds a dataset.
    pub fn require_group(&mut self, name: &str) -> Result<&mut Group, StorageError> {
        validate_name(name)?;
        let node = self
            .children
            .entry(name.to_string())
            .or_insert_with(|| Node::Group(Group::new()));
        match node {
            Node::Group(group) => Ok(group),
            Node::Dataset(_) => Err(StorageError::InvalidFormat(format!(
                "\"{name}\" is a dataset, expected a group"
            ))),
        }
    }

    /// Number of datasets below this group
    pub fn dataset_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                Node::Group(group) => group.dataset_count(),
                Node::Dataset(_) => 1,
            })
            .sum()
    }
}

/// In-memory image of an IPASC container: a rooted tree of groups and datasets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    root: Group,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Look up a node by `/`-separated path; the empty path is not a node
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut segments = split_path(path);
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    /// Group at `path`; the empty path is the root
    pub fn group(&self, path: &str) -> Option<&Group> {
        if split_path(path).next().is_none() {
            return Some(&self.root);
        }
        self.get(path).and_then(Node::as_group)
    }

    pub fn dataset(&self, path: &str) -> Option<&Dataset> {
        self.get(path).and_then(Node::as_dataset)
    }

    /// Walk to the group at `path`, creating missing groups on the way
    pub fn require_group(&mut self, path: &str) -> Result<&mut Group, StorageError> {
        let mut group = &mut self.root;
        for segment in split_path(path) {
            group = group.require_group(segment)?;
        }
        Ok(group)
    }

    /// Store a dataset at `path`, creating parent groups as needed
    pub fn insert_dataset(&mut self, path: &str, dataset: Dataset) -> Result<(), StorageError> {
        let (parent, name) = split_parent(path)?;
        self.require_group(parent)?.insert_dataset(name, dataset)
    }

    /// Remove the node at `path`, returning it
    pub fn remove(&mut self, path: &str) -> Option<Node> {
        let (parent, name) = split_parent(path).ok()?;
        let mut group = &mut self.root;
        for segment in split_path(parent) {
            group = match group.children.get_mut(segment)? {
                Node::Group(child) => child,
                Node::Dataset(_) => return None,
            };
        }
        group.remove(name)
    }

    /// Every node with its full path, parents before children.
    ///
    /// Group paths carry a trailing `/`, matching ZIP directory entries.
    pub fn entries(&self) -> Vec<(String, &Node)> {
        let mut entries = Vec::new();
        collect_entries(&self.root, "", &mut entries);
        entries
    }
}

fn collect_entries<'a>(group: &'a Group, prefix: &str, out: &mut Vec<(String, &'a Node)>) {
    for (name, node) in group.children() {
        match node {
            Node::Group(child) => {
                let path = format!("{prefix}{name}/");
                out.push((path.clone(), node));
                collect_entries(child, &path, out);
            }
            Node::Dataset(_) => out.push((format!("{prefix}{name}"), node)),
        }
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Split `a/b/c` into (`a/b`, `c`)
fn split_parent(path: &str) -> Result<(&str, &str), StorageError> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, name)) => {
            validate_name(name)?;
            Ok((parent, name))
        }
        None => {
            validate_name(trimmed)?;
            Ok(("", trimmed))
        }
    }
}
