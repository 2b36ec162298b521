//! Error types for the tree crate.

use crate::dtype::DType;

/// Errors produced while building or decoding tree values.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The element count does not match the product of the shape.
    #[error("shape {shape:?} holds {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// The shape's element count does not fit in `usize`.
    #[error("shape {shape:?} has too many elements")]
    ShapeOverflow { shape: Vec<usize> },

    /// Two buffers were combined with different element types.
    #[error("element type mismatch: expected {expected}, got {actual}")]
    DTypeMismatch { expected: DType, actual: DType },

    /// JSON encoding or decoding of a tree document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
