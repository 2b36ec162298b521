//! Element types and typed element storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// The element type of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Owned UTF-8 strings.
    Str,
    /// A zero-sized element type: the array carries a length but no data.
    Unit,
}

impl DType {
    /// In-memory size of one element in bytes.
    pub fn size_of(&self) -> usize {
        use std::mem::size_of;
        match self {
            Self::Bool => size_of::<bool>(),
            Self::I8 => size_of::<i8>(),
            Self::I16 => size_of::<i16>(),
            Self::I32 => size_of::<i32>(),
            Self::I64 => size_of::<i64>(),
            Self::U8 => size_of::<u8>(),
            Self::U16 => size_of::<u16>(),
            Self::U32 => size_of::<u32>(),
            Self::U64 => size_of::<u64>(),
            Self::F32 => size_of::<f32>(),
            Self::F64 => size_of::<f64>(),
            Self::Str => size_of::<String>(),
            Self::Unit => size_of::<()>(),
        }
    }

    /// Returns `true` if elements of this type occupy no storage.
    pub fn is_zero_sized(&self) -> bool {
        self.size_of() == 0
    }

    /// Short lowercase name (`"i64"`, `"f32"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "str",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat, typed element storage.
///
/// Float equality treats NaN as equal to NaN so that every value compares
/// equal to itself; all other element types use their ordinary equality.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "values", rename_all = "lowercase")]
pub enum ArrayData {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Str(Vec<String>),
    /// Element count of a zero-sized element type.
    Unit(usize),
}

macro_rules! dispatch {
    ($data:expr, $v:ident => $body:expr, $n:ident => $unit:expr) => {
        match $data {
            ArrayData::Bool($v) => $body,
            ArrayData::I8($v) => $body,
            ArrayData::I16($v) => $body,
            ArrayData::I32($v) => $body,
            ArrayData::I64($v) => $body,
            ArrayData::U8($v) => $body,
            ArrayData::U16($v) => $body,
            ArrayData::U32($v) => $body,
            ArrayData::U64($v) => $body,
            ArrayData::F32($v) => $body,
            ArrayData::F64($v) => $body,
            ArrayData::Str($v) => $body,
            ArrayData::Unit($n) => $unit,
        }
    };
}

impl ArrayData {
    /// Storage for `len` default-valued (zero, `false`, empty string) elements.
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Bool => Self::Bool(vec![false; len]),
            DType::I8 => Self::I8(vec![0; len]),
            DType::I16 => Self::I16(vec![0; len]),
            DType::I32 => Self::I32(vec![0; len]),
            DType::I64 => Self::I64(vec![0; len]),
            DType::U8 => Self::U8(vec![0; len]),
            DType::U16 => Self::U16(vec![0; len]),
            DType::U32 => Self::U32(vec![0; len]),
            DType::U64 => Self::U64(vec![0; len]),
            DType::F32 => Self::F32(vec![0.0; len]),
            DType::F64 => Self::F64(vec![0.0; len]),
            DType::Str => Self::Str(vec![String::new(); len]),
            DType::Unit => Self::Unit(len),
        }
    }

    /// The element type.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::I8(_) => DType::I8,
            Self::I16(_) => DType::I16,
            Self::I32(_) => DType::I32,
            Self::I64(_) => DType::I64,
            Self::U8(_) => DType::U8,
            Self::U16(_) => DType::U16,
            Self::U32(_) => DType::U32,
            Self::U64(_) => DType::U64,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::Str(_) => DType::Str,
            Self::Unit(_) => DType::Unit,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len(), n => *n)
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite every element with the corresponding element of `src`.
    ///
    /// The existing allocation is reused. Both sides must have the same
    /// element type and length.
    pub fn copy_from(&mut self, src: &ArrayData) -> TreeResult<()> {
        if self.len() != src.len() {
            return Err(TreeError::ShapeMismatch {
                shape: vec![self.len()],
                expected: self.len(),
                actual: src.len(),
            });
        }
        match (self, src) {
            (Self::Bool(dst), Self::Bool(src)) => dst.copy_from_slice(src),
            (Self::I8(dst), Self::I8(src)) => dst.copy_from_slice(src),
            (Self::I16(dst), Self::I16(src)) => dst.copy_from_slice(src),
            (Self::I32(dst), Self::I32(src)) => dst.copy_from_slice(src),
            (Self::I64(dst), Self::I64(src)) => dst.copy_from_slice(src),
            (Self::U8(dst), Self::U8(src)) => dst.copy_from_slice(src),
            (Self::U16(dst), Self::U16(src)) => dst.copy_from_slice(src),
            (Self::U32(dst), Self::U32(src)) => dst.copy_from_slice(src),
            (Self::U64(dst), Self::U64(src)) => dst.copy_from_slice(src),
            (Self::F32(dst), Self::F32(src)) => dst.copy_from_slice(src),
            (Self::F64(dst), Self::F64(src)) => dst.copy_from_slice(src),
            (Self::Str(dst), Self::Str(src)) => dst.clone_from_slice(src),
            (Self::Unit(_), Self::Unit(_)) => {}
            (dst, src) => {
                return Err(TreeError::DTypeMismatch {
                    expected: dst.dtype(),
                    actual: src.dtype(),
                })
            }
        }
        Ok(())
    }

    /// Write the element at flat index `i` in debug form.
    pub(crate) fn fmt_element(&self, f: &mut fmt::Formatter<'_>, i: usize) -> fmt::Result {
        dispatch!(self, v => write!(f, "{:?}", v[i]), _n => f.write_str("()"))
    }
}

fn same_floats<T: PartialEq + Copy>(a: &[T], b: &[T], is_nan: impl Fn(T) -> bool) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(&x, &y)| x == y || (is_nan(x) && is_nan(y)))
}

impl PartialEq for ArrayData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => same_floats(a, b, f32::is_nan),
            (Self::F64(a), Self::F64(b)) => same_floats(a, b, f64::is_nan),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Unit(a), Self::Unit(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ArrayData {}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for ArrayData {
                fn from(values: Vec<$ty>) -> Self {
                    Self::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
}
