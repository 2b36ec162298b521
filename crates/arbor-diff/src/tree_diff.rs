//! Recursive structural diff of two storage trees.
//!
//! Paths start at `/` and grow by `<key>/` per level. Child keys and
//! attributes are visited in key order, so the report is deterministic.

use arbor_tree::{Array, Attributes, Group, Node};
use tracing::debug;

use crate::config::DiffOptions;
use crate::error::{DiffError, DiffResult};
use crate::report::{DiffReport, Finding};

/// Diff exactly two named trees.
///
/// Fails with [`DiffError::Arity`] unless `trees` has two entries. Names are
/// right-padded to equal width before they appear in findings.
pub fn diff_named(trees: &[(&str, &Node)], options: &DiffOptions) -> DiffResult<DiffReport> {
    let [(left_name, left), (right_name, right)] = trees else {
        return Err(DiffError::Arity { got: trees.len() });
    };
    Ok(run(left_name, left, right_name, right, options))
}

/// Diff two trees under the default names `a` and `b`.
pub fn diff_trees(a: &Node, b: &Node, options: &DiffOptions) -> DiffReport {
    run("a", a, "b", b, options)
}

/// Strict comparison: succeeds only if the diff report is empty.
pub fn ensure_equal(trees: &[(&str, &Node)], options: &DiffOptions) -> DiffResult<()> {
    let report = diff_named(trees, options)?;
    if report.is_empty() {
        Ok(())
    } else {
        Err(DiffError::NotEqual(report))
    }
}

fn run(
    left_name: &str,
    left: &Node,
    right_name: &str,
    right: &Node,
    options: &DiffOptions,
) -> DiffReport {
    let width = left_name.chars().count().max(right_name.chars().count());
    let mut differ = Differ {
        names: [
            format!("{left_name:<width$}"),
            format!("{right_name:<width$}"),
        ],
        options,
        findings: Vec::new(),
    };
    differ.node(left, right, "/");

    debug!(findings = differ.findings.len(), "diffed trees");
    DiffReport {
        findings: differ.findings,
    }
}

struct Differ<'a> {
    names: [String; 2],
    options: &'a DiffOptions,
    findings: Vec<Finding>,
}

impl Differ<'_> {
    fn node(&mut self, left: &Node, right: &Node, path: &str) {
        match (left, right) {
            (Node::Group(l), Node::Group(r)) => self.groups(l, r, path),
            (Node::Array(l), Node::Array(r)) => self.arrays(l, r, path),
            // Nothing to compare inside two unknown nodes.
            (Node::Unsupported, Node::Unsupported) => {}
            _ => self.findings.push(Finding::KindMismatch {
                path: path.to_string(),
                left_name: self.names[0].clone(),
                left_kind: left.kind(),
                right_name: self.names[1].clone(),
                right_kind: right.kind(),
            }),
        }
    }

    fn groups(&mut self, left: &Group, right: &Group, path: &str) {
        self.one_sided_children(0, left, right, path);
        self.one_sided_children(1, right, left, path);

        self.attrs(left.attrs(), right.attrs(), path);

        for (key, l) in left.children() {
            if let Some(r) = right.child(key) {
                self.node(l, r, &format!("{path}{key}/"));
            }
        }
    }

    fn one_sided_children(&mut self, side: usize, mine: &Group, theirs: &Group, path: &str) {
        for key in mine.children().keys() {
            if theirs.child(key).is_some() || self.options.is_ignored(path, key) {
                continue;
            }
            self.findings.push(Finding::Presence {
                path: path.to_string(),
                key: key.clone(),
                present_in: self.names[side].clone(),
                missing_from: self.names[1 - side].clone(),
            });
        }
    }

    fn arrays(&mut self, left: &Array, right: &Array, path: &str) {
        self.attrs(left.attrs(), right.attrs(), path);

        if left.buffer() != right.buffer() {
            for (side, array) in [left, right].into_iter().enumerate() {
                self.findings.push(Finding::ArrayDump {
                    name: self.names[side].clone(),
                    path: path.to_string(),
                    buffer: array.buffer().clone(),
                });
            }
        }
    }

    fn attrs(&mut self, left: &Attributes, right: &Attributes, path: &str) {
        for (side, mine, theirs) in [(0, left, right), (1, right, left)] {
            for (key, value) in mine {
                if theirs.get(key) == Some(value) || self.options.is_ignored(path, key) {
                    continue;
                }
                self.findings.push(Finding::Attribute {
                    name: self.names[side].clone(),
                    path: path.to_string(),
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
    }
}
