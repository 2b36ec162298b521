//! N-dimensional buffers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dtype::{ArrayData, DType};
use crate::error::{TreeError, TreeResult};

/// A shaped, typed, row-major element buffer.
///
/// Equality is shape-sensitive: two buffers with the same flat elements but
/// different shapes are not equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuffer")]
pub struct NdBuffer {
    shape: Vec<usize>,
    data: ArrayData,
}

#[derive(Deserialize)]
struct RawBuffer {
    shape: Vec<usize>,
    data: ArrayData,
}

impl TryFrom<RawBuffer> for NdBuffer {
    type Error = TreeError;

    fn try_from(raw: RawBuffer) -> TreeResult<Self> {
        Self::new(raw.shape, raw.data)
    }
}

impl NdBuffer {
    /// Create a buffer, checking that `data` holds exactly `product(shape)` elements.
    pub fn new(shape: Vec<usize>, data: ArrayData) -> TreeResult<Self> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TreeError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// A one-dimensional buffer over `data`.
    pub fn vector(data: impl Into<ArrayData>) -> Self {
        let data = data.into();
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// A default-filled buffer of the given type and shape.
    pub fn zeros(dtype: DType, shape: Vec<usize>) -> TreeResult<Self> {
        let len = element_count(&shape)?;
        Ok(Self {
            shape,
            data: ArrayData::zeros(dtype, len),
        })
    }

    /// A default-filled buffer with the same type and shape as this one.
    pub fn zeros_like(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: ArrayData::zeros(self.dtype(), self.len()),
        }
    }

    /// Per-dimension extents.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The element type.
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat element storage.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Overwrite all elements from `src`, which must have the same shape and type.
    pub fn copy_from(&mut self, src: &NdBuffer) -> TreeResult<()> {
        if self.shape != src.shape {
            return Err(TreeError::ShapeMismatch {
                shape: self.shape.clone(),
                expected: self.len(),
                actual: src.len(),
            });
        }
        self.data.copy_from(&src.data)
    }

    fn fmt_dims(&self, f: &mut fmt::Formatter<'_>, dims: &[usize], offset: usize) -> fmt::Result {
        // Any zero extent empties the whole buffer; render it flat.
        if self.data.is_empty() && !dims.is_empty() {
            return f.write_str("[]");
        }
        let Some((&extent, rest)) = dims.split_first() else {
            return self.data.fmt_element(f, offset);
        };
        let stride: usize = rest.iter().product();
        f.write_str("[")?;
        for i in 0..extent {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.fmt_dims(f, rest, offset + i * stride)?;
        }
        f.write_str("]")
    }
}

fn element_count(shape: &[usize]) -> TreeResult<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
        .ok_or_else(|| TreeError::ShapeOverflow {
            shape: shape.to_vec(),
        })
}

/// Renders as `<dtype> <shape> <nested elements>`, e.g. `i64 [2, 2] [[1, 2], [3, 4]]`.
impl fmt::Display for NdBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} ", self.dtype(), self.shape)?;
        self.fmt_dims(f, &self.shape, 0)
    }
}
