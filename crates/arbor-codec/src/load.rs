//! Tree to record overlay.

use arbor_tree::{Array, Attributes, Group, Node};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::name::{FieldName, NAME_ATTR};
use crate::record::{Field, Record};

/// Overlay the contents of `group` onto `record`.
///
/// Every child of `group` names the field it belongs to through its `name`
/// attribute; child order does not matter. Array children are copied into
/// the existing column storage, group children recurse into nested records.
/// Record fields with no stored child are left untouched.
///
/// On error, fields overwritten before the failing child keep their new
/// contents.
pub fn load_into(record: &mut Record, group: &Group) -> CodecResult<()> {
    load_at(record, group, "/")
}

fn load_at(record: &mut Record, group: &Group, path: &str) -> CodecResult<()> {
    for (key, child) in group.children() {
        let child_path = format!("{path}{key}");
        match child {
            Node::Array(array) => load_column(record, array, &child_path)?,
            Node::Group(nested) => {
                let name = stored_name(nested.attrs(), &child_path)?;
                match record.field_mut(&name) {
                    Some(Field::Nested(target)) => {
                        load_at(target, nested, &format!("{child_path}/"))?
                    }
                    Some(other) => {
                        return Err(CodecError::FieldKind {
                            path: child_path,
                            name,
                            stored: "group",
                            declared: other.kind_name(),
                        })
                    }
                    None => {
                        return Err(CodecError::MissingField {
                            path: child_path,
                            name,
                        })
                    }
                }
            }
            Node::Unsupported => return Err(CodecError::CorruptTree { path: child_path }),
        }
    }

    debug!(path, children = group.len(), "loaded group");
    Ok(())
}

fn load_column(record: &mut Record, array: &Array, path: &str) -> CodecResult<()> {
    let name = stored_name(array.attrs(), path)?;
    let target = match record.field_mut(&name) {
        Some(Field::Column(target)) => target,
        Some(other) => {
            return Err(CodecError::FieldKind {
                path: path.to_string(),
                name,
                stored: "array",
                declared: other.kind_name(),
            })
        }
        None => {
            return Err(CodecError::MissingField {
                path: path.to_string(),
                name,
            })
        }
    };

    let stored = array.buffer();
    if target.shape() != stored.shape() {
        return Err(CodecError::ShapeMismatch {
            path: path.to_string(),
            name,
            declared: target.shape().to_vec(),
            stored: stored.shape().to_vec(),
        });
    }
    if target.dtype() != stored.dtype() {
        return Err(CodecError::DTypeMismatch {
            path: path.to_string(),
            name,
            declared: target.dtype(),
            stored: stored.dtype(),
        });
    }
    target.copy_from(stored)?;
    Ok(())
}

/// Read and decode the `name` attribute of a stored child.
pub(crate) fn stored_name(attrs: &Attributes, path: &str) -> CodecResult<FieldName> {
    let invalid = |reason: String| CodecError::InvalidAttribute {
        path: path.to_string(),
        reason,
    };
    let value = attrs
        .get(NAME_ATTR)
        .ok_or_else(|| invalid("missing".to_string()))?;
    let token = value
        .as_str()
        .ok_or_else(|| invalid(format!("expected a string, got {value}")))?;
    if token.is_empty() {
        return Err(invalid("empty".to_string()));
    }
    FieldName::decode(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_tree::{ArrayData, DType, NdBuffer};

    use crate::store::store;

    fn column(values: Vec<i64>) -> NdBuffer {
        NdBuffer::vector(values)
    }

    #[test]
    fn scenario_integer_fields_round_trip() {
        let record = Record::new()
            .with_column(1i64, column(vec![1, 2, 3]))
            .with_column(2i64, column(vec![4, 5]));
        let group = store(&record).unwrap();

        let mut loaded = record.zeroed();
        load_into(&mut loaded, &group).unwrap();

        assert_eq!(loaded.column(1i64), Some(&column(vec![1, 2, 3])));
        assert_eq!(loaded.column(2i64), Some(&column(vec![4, 5])));
        assert_eq!(loaded, record);
    }

    #[test]
    fn nested_records_round_trip() {
        let record = Record::new()
            .with_column("id", NdBuffer::vector(vec![10u32, 11]))
            .with_nested(
                "pos",
                Record::new()
                    .with_column("x", NdBuffer::vector(vec![0.5f64, f64::NAN]))
                    .with_nested(
                        0i64,
                        Record::new().with_column(
                            "label",
                            NdBuffer::vector(vec!["a".to_string(), "b".to_string()]),
                        ),
                    ),
            );

        let mut loaded = record.zeroed();
        load_into(&mut loaded, &store(&record).unwrap()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn multidimensional_columns_round_trip() {
        let grid = NdBuffer::new(vec![2, 3], ArrayData::I16(vec![1, 2, 3, 4, 5, 6])).unwrap();
        let record = Record::new().with_column("grid", grid.clone());

        let mut loaded = record.zeroed();
        load_into(&mut loaded, &store(&record).unwrap()).unwrap();
        assert_eq!(loaded.column("grid"), Some(&grid));
    }

    #[test]
    fn zero_sized_field_is_left_untouched() {
        let record = Record::new()
            .with_column("tag", NdBuffer::zeros(DType::Unit, vec![3]).unwrap())
            .with_column("v", column(vec![1, 2, 3]));
        let group = store(&record).unwrap();

        let mut loaded = Record::new()
            .with_column("tag", NdBuffer::zeros(DType::Unit, vec![5]).unwrap())
            .with_column("v", column(vec![0, 0, 0]));
        load_into(&mut loaded, &group).unwrap();

        assert_eq!(loaded.column("tag"), Some(&NdBuffer::zeros(DType::Unit, vec![5]).unwrap()));
        assert_eq!(loaded.column("v"), Some(&column(vec![1, 2, 3])));
    }

    #[test]
    fn fields_missing_from_tree_are_left_untouched() {
        let group = store(&Record::new().with_column("a", column(vec![1]))).unwrap();

        let mut loaded = Record::new()
            .with_column("a", column(vec![0]))
            .with_column("extra", column(vec![42, 43]));
        load_into(&mut loaded, &group).unwrap();

        assert_eq!(loaded.column("a"), Some(&column(vec![1])));
        assert_eq!(loaded.column("extra"), Some(&column(vec![42, 43])));
    }

    #[test]
    fn load_preserves_column_allocation() {
        let record = Record::new().with_column("a", column(vec![1, 2, 3]));
        let group = store(&record).unwrap();

        let mut loaded = record.zeroed();
        let before = match loaded.column("a").unwrap().data() {
            ArrayData::I64(v) => v.as_ptr(),
            other => panic!("expected I64, got {:?}", other),
        };
        load_into(&mut loaded, &group).unwrap();
        let after = match loaded.column("a").unwrap().data() {
            ArrayData::I64(v) => v.as_ptr(),
            other => panic!("expected I64, got {:?}", other),
        };
        assert_eq!(before, after);
    }

    #[test]
    fn tree_field_missing_from_record() {
        let group = store(&Record::new().with_column("ghost", column(vec![1]))).unwrap();
        let mut loaded = Record::new().with_column("real", column(vec![0]));

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingField { ref name, ref path } if *name == FieldName::from("ghost") && path == "/1"
        ));
    }

    #[test]
    fn tree_group_missing_from_record() {
        let group = store(&Record::new().with_nested("ghost", Record::new())).unwrap();
        let mut loaded = Record::new().with_column("real", column(vec![0]));

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingField { ref name, ref path } if *name == FieldName::from("ghost") && path == "/1"
        ));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let group = store(&Record::new().with_column("a", column(vec![1, 2, 3]))).unwrap();
        let mut loaded = Record::new().with_column("a", column(vec![0, 0]));

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { .. }));
        assert_eq!(loaded.column("a"), Some(&column(vec![0, 0])));
    }

    #[test]
    fn dtype_mismatch_is_reported() {
        let group = store(&Record::new().with_column("a", column(vec![1]))).unwrap();
        let mut loaded = Record::new().with_column("a", NdBuffer::vector(vec![0.0f64]));

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(
            err,
            CodecError::DTypeMismatch {
                declared: DType::F64,
                stored: DType::I64,
                ..
            }
        ));
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let group = store(&Record::new().with_nested("a", Record::new())).unwrap();
        let mut loaded = Record::new().with_column("a", column(vec![0]));

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(
            err,
            CodecError::FieldKind {
                stored: "group",
                declared: "column",
                ..
            }
        ));
    }

    #[test]
    fn missing_name_attribute() {
        let group = Group::new().with_child("1", Array::new(column(vec![1])));
        let mut loaded = Record::new().with_column(1i64, column(vec![0]));

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(err, CodecError::InvalidAttribute { ref path, .. } if path == "/1"));
    }

    #[test]
    fn empty_or_non_string_name_attribute() {
        let empty = Group::new().with_child("1", Group::new().with_attr(NAME_ATTR, ""));
        let number = Group::new().with_child("1", Group::new().with_attr(NAME_ATTR, 1i64));

        for group in [empty, number] {
            let mut loaded = Record::new();
            assert!(matches!(
                load_into(&mut loaded, &group),
                Err(CodecError::InvalidAttribute { .. })
            ));
        }
    }

    #[test]
    fn unsupported_node_is_corrupt_tree() {
        let group = Group::new().with_child(
            "outer",
            Group::new()
                .with_attr(NAME_ATTR, "outer")
                .with_child("odd", Node::Unsupported),
        );
        let mut loaded = Record::new().with_nested("outer", Record::new());

        let err = load_into(&mut loaded, &group).unwrap_err();
        assert!(matches!(err, CodecError::CorruptTree { ref path } if path == "/outer/odd"));
    }

    #[test]
    fn children_self_identify_regardless_of_key() {
        let group = Group::new()
            .with_child("b", Array::new(column(vec![2])).with_attr(NAME_ATTR, "first"))
            .with_child("a", Array::new(column(vec![1])).with_attr(NAME_ATTR, "second"));
        let mut loaded = Record::new()
            .with_column("first", column(vec![0]))
            .with_column("second", column(vec![0]));

        load_into(&mut loaded, &group).unwrap();
        assert_eq!(loaded.column("first"), Some(&column(vec![2])));
        assert_eq!(loaded.column("second"), Some(&column(vec![1])));
    }
}

#[cfg(test)]
mod proptests {
    use arbor_tree::NdBuffer;
    use proptest::prelude::*;

    use super::load_into;
    use crate::record::Record;
    use crate::store::store;

    fn columns() -> impl Strategy<Value = Record> {
        prop::collection::vec(
            prop_oneof![
                prop::collection::vec(any::<i64>(), 0..8).prop_map(NdBuffer::vector),
                prop::collection::vec(any::<f64>(), 0..8).prop_map(NdBuffer::vector),
                prop::collection::vec(any::<bool>(), 0..8).prop_map(NdBuffer::vector),
            ],
            0..5,
        )
        .prop_map(|buffers| {
            buffers
                .into_iter()
                .enumerate()
                .fold(Record::new(), |record, (i, buffer)| {
                    if i % 2 == 0 {
                        record.with_column(i as i64, buffer)
                    } else {
                        record.with_column(format!("f{i}"), buffer)
                    }
                })
        })
    }

    fn records() -> impl Strategy<Value = Record> {
        (columns(), prop::option::of(columns())).prop_map(|(outer, inner)| match inner {
            Some(inner) => outer.with_nested("inner", inner),
            None => outer,
        })
    }

    proptest! {
        #[test]
        fn store_then_load_reproduces_record(record in records()) {
            let group = store(&record).unwrap();
            let mut loaded = record.zeroed();
            load_into(&mut loaded, &group).unwrap();
            prop_assert_eq!(loaded, record);
        }
    }
}
