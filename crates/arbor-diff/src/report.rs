//! Diff findings and their text rendering.

use std::fmt;

use arbor_tree::{AttrValue, NdBuffer, NodeKind};

/// A single difference between two trees.
///
/// Display names (`present_in`, `name`, ...) are already padded to a common
/// width so that rendered lines align.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// A child key exists on one side only.
    Presence {
        path: String,
        key: String,
        present_in: String,
        missing_from: String,
    },
    /// An attribute pair exists on one side but not, with the same value, on the other.
    Attribute {
        name: String,
        path: String,
        key: String,
        value: AttrValue,
    },
    /// The full contents of one side of an unequal array pair.
    ArrayDump {
        name: String,
        path: String,
        buffer: NdBuffer,
    },
    /// The two sides hold different node kinds at the same path.
    KindMismatch {
        path: String,
        left_name: String,
        left_kind: NodeKind,
        right_name: String,
        right_kind: NodeKind,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence {
                path,
                key,
                present_in,
                missing_from,
            } => write!(
                f,
                "\"{path}{key}\" present in {present_in} but not in {missing_from}"
            ),
            Self::Attribute {
                name,
                path,
                key,
                value,
            } => write!(f, "attrs({name}[{path:?}])[{key:?}] is {value}"),
            Self::ArrayDump { name, path, buffer } => {
                write!(f, "getarray({name}[{path:?}]):\n{buffer}")
            }
            Self::KindMismatch {
                path,
                left_name,
                left_kind,
                right_name,
                right_kind,
            } => write!(
                f,
                "{path:?}: {left_kind} in {left_name}, {right_kind} in {right_name}"
            ),
        }
    }
}

/// The result of diffing two trees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// Findings in traversal order.
    pub findings: Vec<Finding>,
}

impl DiffReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the trees are equal.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Number of child keys present on one side only.
    pub fn presences(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::Presence { .. }))
            .count()
    }

    /// Number of one-sided attribute pairs.
    pub fn attribute_changes(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::Attribute { .. }))
            .count()
    }

    /// Number of array dumps (two per unequal array pair).
    pub fn array_dumps(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::ArrayDump { .. }))
            .count()
    }

    /// Number of node kind mismatches.
    pub fn kind_mismatches(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::KindMismatch { .. }))
            .count()
    }
}

/// One finding per line; an empty report renders as the empty string.
impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        Ok(())
    }
}
