//! Path-addressed permission tree.
//!
//! A [`PermissionTree`] is always fully materialized against [`SCHEMA`]:
//! every valid path resolves to a defined boolean, and no instance ever
//! carries keys outside the schema. The only ways to obtain a tree are the
//! all-denied constructor, normalization of a persisted blob, and the
//! immutable [`PermissionTree::with`] write, all of which preserve that
//! invariant.
//!
//! Reads and writes are pure and synchronous; all state lives in the caller.

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{PermissionError, join_path};
use crate::schema::{NodeSpec, SCHEMA, leaf_paths};

/// One node of a materialized tree: a grant flag or a named sub-module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionNode {
    Leaf(bool),
    Group(IndexMap<String, PermissionNode>),
}

/// A role's full set of grants.
///
/// Cheap to clone (a few dozen small maps); writes go through [`Self::with`],
/// which returns a new tree and leaves the receiver untouched so that a
/// caller holding the previous snapshot keeps seeing the old values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTree {
    root: IndexMap<String, PermissionNode>,
}

impl PermissionTree {
    /// A fresh, fully populated tree with every flag `false`.
    ///
    /// Fail-closed starting point for new roles and for any load path that
    /// cannot produce a real tree. Each call builds an independent instance;
    /// there is no shared default to corrupt.
    pub fn all_denied() -> Self {
        Self {
            root: denied_level(SCHEMA),
        }
    }

    /// Normalizes a persisted permissions blob into canonical shape.
    ///
    /// Missing flags become `false`, unknown keys are dropped with a
    /// warning, and non-boolean leaves are treated as absent. The result
    /// always has the full schema shape; malformed input degrades to the
    /// all-denied tree rather than an error.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                root: normalize_level(SCHEMA, map),
            },
            Value::Null => Self::all_denied(),
            other => {
                warn!(
                    blob_type = value_type(other),
                    "permissions blob is not an object, treating all flags as denied"
                );
                Self::all_denied()
            }
        }
    }

    /// Reads the flag at `path`.
    ///
    /// Errors indicate a schema/path mismatch (a defect at the call site),
    /// never a denied grant: a valid path to an ungranted flag is `Ok(false)`.
    pub fn get(&self, path: &[&str]) -> Result<bool, PermissionError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(PermissionError::EmptyPath);
        };

        let mut group = &self.root;
        for segment in parents {
            match group.get(*segment) {
                Some(PermissionNode::Group(children)) => group = children,
                Some(PermissionNode::Leaf(_)) => {
                    return Err(PermissionError::TraversesLeaf {
                        path: join_path(path),
                        segment: segment.to_string(),
                    });
                }
                None => {
                    return Err(PermissionError::UnknownSegment {
                        path: join_path(path),
                        segment: segment.to_string(),
                    });
                }
            }
        }

        match group.get(*last) {
            Some(PermissionNode::Leaf(value)) => Ok(*value),
            Some(PermissionNode::Group(_)) => Err(PermissionError::EndsOnGroup {
                path: join_path(path),
            }),
            None => Err(PermissionError::UnknownSegment {
                path: join_path(path),
                segment: last.to_string(),
            }),
        }
    }

    /// Returns a new tree with the flag at `path` set to `value`.
    ///
    /// The receiver is never mutated. Writing the value already present is a
    /// no-op in effect but still yields a valid tree equal to the input, so
    /// callers may compare by value to decide whether anything changed.
    pub fn with(&self, path: &[&str], value: bool) -> Result<Self, PermissionError> {
        let mut next = self.clone();
        *next.leaf_slot(path)? = value;
        Ok(next)
    }

    /// Defensive read for UI boundaries: invalid paths log a warning and
    /// read as not granted instead of propagating.
    pub fn is_granted(&self, path: &[&str]) -> bool {
        self.get(path).unwrap_or_else(|err| {
            warn!(error = %err, "invalid permission path, treating as denied");
            false
        })
    }

    /// Whether the module at `module_path` should be rendered at all.
    ///
    /// Equivalent to reading the module's `view` flag; a module absent from
    /// the tree (or a path outside the schema) is simply not visible:
    /// fail-closed, never an error.
    pub fn can_view(&self, module_path: &[&str]) -> bool {
        let mut path = Vec::with_capacity(module_path.len() + 1);
        path.extend_from_slice(module_path);
        path.push("view");
        self.get(&path).unwrap_or(false)
    }

    /// Every granted leaf path, in schema order.
    pub fn granted_paths(&self) -> Vec<Vec<&'static str>> {
        leaf_paths()
            .into_iter()
            .filter(|path| matches!(self.get(path), Ok(true)))
            .collect()
    }

    fn leaf_slot(&mut self, path: &[&str]) -> Result<&mut bool, PermissionError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(PermissionError::EmptyPath);
        };

        let mut group = &mut self.root;
        for segment in parents {
            match group.get_mut(*segment) {
                Some(PermissionNode::Group(children)) => group = children,
                Some(PermissionNode::Leaf(_)) => {
                    return Err(PermissionError::TraversesLeaf {
                        path: join_path(path),
                        segment: segment.to_string(),
                    });
                }
                None => {
                    return Err(PermissionError::UnknownSegment {
                        path: join_path(path),
                        segment: segment.to_string(),
                    });
                }
            }
        }

        match group.get_mut(*last) {
            Some(PermissionNode::Leaf(value)) => Ok(value),
            Some(PermissionNode::Group(_)) => Err(PermissionError::EndsOnGroup {
                path: join_path(path),
            }),
            None => Err(PermissionError::UnknownSegment {
                path: join_path(path),
                segment: last.to_string(),
            }),
        }
    }
}

impl Default for PermissionTree {
    fn default() -> Self {
        Self::all_denied()
    }
}

/// Builds an all-false level from its schema description.
fn denied_level(specs: &'static [NodeSpec]) -> IndexMap<String, PermissionNode> {
    specs
        .iter()
        .map(|spec| match spec {
            NodeSpec::Leaf(key) => (key.to_string(), PermissionNode::Leaf(false)),
            NodeSpec::Group { key, children } => {
                (key.to_string(), PermissionNode::Group(denied_level(children)))
            }
        })
        .collect()
}

/// Merges one level of a persisted blob onto the schema.
fn normalize_level(
    specs: &'static [NodeSpec],
    map: &serde_json::Map<String, Value>,
) -> IndexMap<String, PermissionNode> {
    for key in map.keys() {
        if !specs.iter().any(|spec| spec.key() == key) {
            warn!(key = %key, "dropping unknown permission key");
        }
    }

    specs
        .iter()
        .map(|spec| match spec {
            NodeSpec::Leaf(key) => {
                let value = match map.get(*key) {
                    Some(Value::Bool(flag)) => *flag,
                    Some(other) => {
                        warn!(
                            key = %key,
                            blob_type = value_type(other),
                            "non-boolean permission flag, treating as denied"
                        );
                        false
                    }
                    None => false,
                };
                (key.to_string(), PermissionNode::Leaf(value))
            }
            NodeSpec::Group { key, children } => {
                let group = match map.get(*key) {
                    Some(Value::Object(nested)) => normalize_level(children, nested),
                    Some(other) => {
                        warn!(
                            key = %key,
                            blob_type = value_type(other),
                            "permission module is not an object, treating as denied"
                        );
                        denied_level(children)
                    }
                    None => denied_level(children),
                };
                (key.to_string(), PermissionNode::Group(group))
            }
        })
        .collect()
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for PermissionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PermissionNode::Leaf(value) => serializer.serialize_bool(*value),
            PermissionNode::Group(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, node) in children {
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for PermissionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.root.len()))?;
        for (key, node) in &self.root {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PermissionTree {
    /// Deserialization *is* normalization: whatever shape the persisted
    /// blob has, the result is canonical and fail-closed.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
