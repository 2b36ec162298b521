//! Record layouts derived from stored groups.

use arbor_tree::{Group, Node};

use crate::error::{CodecError, CodecResult};
use crate::load::stored_name;
use crate::record::{Field, Record};

/// Build a default-filled record with one field per child of `group`.
///
/// Array children become columns of the same shape and element type, group
/// children become nested records. Fields are declared in storage-slot order
/// (numeric keys ascending, then any other keys), so storing the layout
/// reproduces the slot assignment of a group written by [`store`].
///
/// [`store`]: crate::store::store
pub fn layout_of(group: &Group) -> CodecResult<Record> {
    layout_at(group, "/")
}

fn layout_at(group: &Group, path: &str) -> CodecResult<Record> {
    let mut children: Vec<_> = group.children().iter().collect();
    children.sort_by(|(a, _), (b, _)| slot(a).cmp(&slot(b)).then_with(|| a.cmp(b)));

    let mut record = Record::new();
    for (key, child) in children {
        let child_path = format!("{path}{key}");
        match child {
            Node::Array(array) => {
                let name = stored_name(array.attrs(), &child_path)?;
                record.set(name, Field::Column(array.buffer().zeros_like()));
            }
            Node::Group(nested) => {
                let name = stored_name(nested.attrs(), &child_path)?;
                let nested = layout_at(nested, &format!("{child_path}/"))?;
                record.set(name, Field::Nested(nested));
            }
            Node::Unsupported => return Err(CodecError::CorruptTree { path: child_path }),
        }
    }
    Ok(record)
}

fn slot(key: &str) -> usize {
    key.parse().unwrap_or(usize::MAX)
}
