//! Record to tree conversion.

use arbor_tree::{Array, Group};
use tracing::debug;

use crate::error::CodecResult;
use crate::name::NAME_ATTR;
use crate::record::{Field, Record};

/// Convert a record into a freestanding group.
///
/// Fields are stored under their 1-based declaration position; each child
/// carries its encoded field name in the `name` attribute. Columns whose
/// element type is zero-sized are skipped, but still consume their position.
/// The returned group itself has no attributes.
pub fn store(record: &Record) -> CodecResult<Group> {
    let mut group = Group::new();

    for (position, (name, field)) in record.fields().enumerate() {
        let key = (position + 1).to_string();
        let token = name.encode()?;

        match field {
            Field::Nested(nested) => {
                let mut child = store(nested)?;
                child.set_attr(NAME_ATTR, token);
                group.insert(key, child);
            }
            Field::Column(buffer) if buffer.dtype().is_zero_sized() => {
                debug!(field = %name, dtype = %buffer.dtype(), "skipping zero-sized column");
            }
            Field::Column(buffer) => {
                group.insert(key, Array::new(buffer.clone()).with_attr(NAME_ATTR, token));
            }
        }
    }

    debug!(fields = record.len(), children = group.len(), "stored record");
    Ok(group)
}
