//! Structure-of-arrays records.

use arbor_tree::NdBuffer;

use crate::name::FieldName;

/// A record field: a typed column or a nested record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Column(NdBuffer),
    Nested(Record),
}

impl Field {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Nested(_) => "nested record",
        }
    }

    fn zeroed(&self) -> Self {
        match self {
            Self::Column(buffer) => Self::Column(buffer.zeros_like()),
            Self::Nested(record) => Self::Nested(record.zeroed()),
        }
    }
}

/// A structure-of-arrays: named fields in declaration order.
///
/// Declaration order is the order the codec stores fields in. Field names are
/// unique; setting an existing name replaces the field in its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(FieldName, Field)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn set(&mut self, name: impl Into<FieldName>, field: Field) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = field,
            None => self.fields.push((name, field)),
        }
    }

    /// Builder form of [`Record::set`] for a column.
    pub fn with_column(mut self, name: impl Into<FieldName>, buffer: NdBuffer) -> Self {
        self.set(name, Field::Column(buffer));
        self
    }

    /// Builder form of [`Record::set`] for a nested record.
    pub fn with_nested(mut self, name: impl Into<FieldName>, record: Record) -> Self {
        self.set(name, Field::Nested(record));
        self
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &Field)> {
        self.fields.iter().map(|(n, f)| (n, f))
    }

    pub fn field(&self, name: &FieldName) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn field_mut(&mut self, name: &FieldName) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    /// The column stored under `name`, if that field is a column.
    pub fn column(&self, name: impl Into<FieldName>) -> Option<&NdBuffer> {
        match self.field(&name.into()) {
            Some(Field::Column(buffer)) => Some(buffer),
            _ => None,
        }
    }

    /// The nested record stored under `name`, if that field is nested.
    pub fn nested(&self, name: impl Into<FieldName>) -> Option<&Record> {
        match self.field(&name.into()) {
            Some(Field::Nested(record)) => Some(record),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A record with the same fields, shapes and element types, default-filled.
    pub fn zeroed(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(n, f)| (n.clone(), f.zeroed()))
                .collect(),
        }
    }
}
