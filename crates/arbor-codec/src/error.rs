//! Error types for the codec crate.

use arbor_tree::{DType, TreeError};

use crate::name::FieldName;

/// Errors that can occur while storing or loading records.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A field name cannot be encoded so that it decodes to itself.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    /// A stored child has a missing, empty, or non-string `name` attribute.
    #[error("invalid name attribute at {path}: {reason}")]
    InvalidAttribute { path: String, reason: String },

    /// The tree holds a field the record does not declare.
    #[error("record has no field {name} (stored at {path})")]
    MissingField { path: String, name: FieldName },

    /// The record field and the stored child are of different kinds.
    #[error("field {name} at {path}: tree holds a {stored}, record declares a {declared}")]
    FieldKind {
        path: String,
        name: FieldName,
        stored: &'static str,
        declared: &'static str,
    },

    /// The stored array and the record column have different shapes.
    #[error("shape mismatch for field {name} at {path}: record {declared:?}, tree {stored:?}")]
    ShapeMismatch {
        path: String,
        name: FieldName,
        declared: Vec<usize>,
        stored: Vec<usize>,
    },

    /// The stored array and the record column have different element types.
    #[error("element type mismatch for field {name} at {path}: record {declared}, tree {stored}")]
    DTypeMismatch {
        path: String,
        name: FieldName,
        declared: DType,
        stored: DType,
    },

    /// The tree contains a node kind the codec cannot load.
    #[error("corrupt tree at {path}: unsupported node kind")]
    CorruptTree { path: String },

    /// Tree-level failure while copying elements.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
