//! Groups, arrays, and the node sum type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attr::{AttrValue, Attributes};
use crate::buffer::NdBuffer;
use crate::error::TreeResult;

/// The kind of a tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Array,
    Unsupported,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::Array => write!(f, "array"),
            Self::Unsupported => write!(f, "unsupported node"),
        }
    }
}

/// A node of a storage tree.
///
/// `Unsupported` stands in for any node kind this crate cannot represent,
/// e.g. an unknown `"kind"` tag in a JSON document. Consumers must treat it
/// as a corrupt tree rather than skip it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Group(Group),
    Array(Array),
    #[serde(other)]
    Unsupported,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Group(_) => NodeKind::Group,
            Self::Array(_) => NodeKind::Array,
            Self::Unsupported => NodeKind::Unsupported,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Attributes of a group or array; `None` for unsupported nodes.
    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            Self::Group(g) => Some(g.attrs()),
            Self::Array(a) => Some(a.attrs()),
            Self::Unsupported => None,
        }
    }

    /// Decode a node from a JSON document.
    pub fn from_json_slice(bytes: &[u8]) -> TreeResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode this node as a pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> TreeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Array> for Node {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// An interior node: named children plus attributes.
///
/// Children are kept in key order so that iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    children: BTreeMap<String, Node>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: Attributes,
}

impl Group {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &BTreeMap<String, Node> {
        &self.children
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    /// Set the child at `key`, returning the node it replaced.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.children.insert(key.into(), node.into())
    }

    /// Builder form of [`Group::insert`].
    pub fn with_child(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

/// A leaf node: a shaped buffer plus attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Array {
    buffer: NdBuffer,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: Attributes,
}

impl Array {
    pub fn new(buffer: NdBuffer) -> Self {
        Self {
            buffer,
            attrs: Attributes::new(),
        }
    }

    pub fn buffer(&self) -> &NdBuffer {
        &self.buffer
    }

    pub fn shape(&self) -> &[usize] {
        self.buffer.shape()
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }
}

impl From<NdBuffer> for Array {
    fn from(buffer: NdBuffer) -> Self {
        Self::new(buffer)
    }
}
