//! Structural diff engine for Arbor storage trees.
//!
//! Recursively compares two trees, including attributes and array contents,
//! and produces a [`DiffReport`] with one [`Finding`] per difference. Two
//! trees are equal exactly when the report is empty.
//!
//! # Key Types
//!
//! - [`diff_named`] / [`diff_trees`] -- run a diff over two trees
//! - [`ensure_equal`] -- strict form that fails on any difference
//! - [`DiffReport`] / [`Finding`] -- the findings and their text rendering
//! - [`DiffOptions`] / [`DiffConfig`] -- key suppression and display names

pub mod config;
pub mod error;
pub mod report;
pub mod tree_diff;

pub use config::{DiffConfig, DiffOptions};
pub use error::{DiffError, DiffResult};
pub use report::{DiffReport, Finding};
pub use tree_diff::{diff_named, diff_trees, ensure_equal};
