//! Storage tree model for Arbor.
//!
//! A storage tree is a hierarchy of [`Group`] nodes, each owning named
//! children and an attribute map, with typed n-dimensional [`Array`] leaves.
//! This crate holds only the in-memory model; it knows nothing about how
//! trees are persisted beyond a JSON document form used by tooling.
//!
//! # Key Types
//!
//! - [`Node`] -- Closed sum of [`Group`], [`Array`], and an explicit `Unsupported` kind
//! - [`NdBuffer`] -- Shape plus row-major typed element storage
//! - [`ArrayData`] / [`DType`] -- Typed element vectors and their element types
//! - [`AttrValue`] / [`Attributes`] -- Scalar and string attribute values

pub mod attr;
pub mod buffer;
pub mod dtype;
pub mod error;
pub mod node;

pub use attr::{AttrValue, Attributes};
pub use buffer::NdBuffer;
pub use dtype::{ArrayData, DType};
pub use error::{TreeError, TreeResult};
pub use node::{Array, Group, Node, NodeKind};
