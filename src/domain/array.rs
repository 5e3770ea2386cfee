// ============================================================================
// NdArray
// Immutable row-major value array used for operands and results
// ============================================================================

use super::shape::Shape;
use crate::numeric::{TvmError, TvmResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major array of domain values.
///
/// Arrays are created by the caller, read by the evaluator and never
/// mutated in place; reshaping produces a new array over the same data.
/// Deserialization goes through [`NdArray::from_shape_vec`], so a decoded
/// array always holds exactly `shape.size()` values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawNdArray<T>",
        bound(deserialize = "T: Deserialize<'de> + Copy")
    )
)]
pub struct NdArray<T> {
    shape: Shape,
    data: Vec<T>,
}

/// Unchecked wire form of [`NdArray`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawNdArray<T> {
    shape: Shape,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: Copy> TryFrom<RawNdArray<T>> for NdArray<T> {
    type Error = TvmError;

    fn try_from(raw: RawNdArray<T>) -> TvmResult<Self> {
        Self::from_shape_vec(raw.shape, raw.data)
    }
}

impl<T: Copy> NdArray<T> {
    /// Rank-0 array holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Shape::scalar(),
            data: vec![value],
        }
    }

    /// One-dimensional array.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: Shape::from([data.len()]),
            data,
        }
    }

    /// Array with an explicit shape over row-major data.
    ///
    /// # Errors
    /// Returns `InvalidShape` if `data.len()` differs from the shape's size.
    pub fn from_shape_vec(shape: impl Into<Shape>, data: Vec<T>) -> TvmResult<Self> {
        let shape = shape.into();
        let expected = shape.checked_size().unwrap_or(usize::MAX);
        if shape.checked_size() != Some(data.len()) {
            return Err(TvmError::InvalidShape {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Two-dimensional array from equally long rows.
    ///
    /// # Errors
    /// Returns `InvalidShape` for ragged rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> TvmResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in &rows {
            if row.len() != width {
                return Err(TvmError::InvalidShape {
                    expected: width,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            shape: Shape::from([rows.len(), width]),
            data,
        })
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying row-major values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Element at a full coordinate, `None` if out of bounds or of the
    /// wrong rank.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.shape.ndim() {
            return None;
        }
        let mut offset = 0;
        for ((&i, &dim), stride) in index
            .iter()
            .zip(self.shape.dims())
            .zip(self.shape.strides())
        {
            if i >= dim {
                return None;
            }
            offset += i * stride;
        }
        self.data.get(offset)
    }

    /// Same values under a different shape of equal size.
    ///
    /// # Errors
    /// Returns `InvalidShape` if the sizes differ.
    pub fn reshape(&self, shape: impl Into<Shape>) -> TvmResult<Self> {
        Self::from_shape_vec(shape, self.data.clone())
    }

    /// Same values with a length-1 axis inserted at `axis`.
    ///
    /// Used to turn a 1-D operand into a row or column for outer-product
    /// style broadcasting.
    pub fn insert_axis(&self, axis: usize) -> Self {
        Self {
            shape: self.shape.with_axis_inserted(axis),
            data: self.data.clone(),
        }
    }

    /// The single value of a one-element array.
    pub fn into_scalar(self) -> Option<T> {
        if self.data.len() == 1 {
            self.data.into_iter().next()
        } else {
            None
        }
    }

    /// Elementwise conversion preserving the shape.
    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> NdArray<U> {
        NdArray {
            shape: self.shape.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    pub(crate) fn from_parts(shape: Shape, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.size(), data.len());
        Self { shape, data }
    }
}

impl<T: Copy> From<T> for NdArray<T> {
    fn from(value: T) -> Self {
        Self::scalar(value)
    }
}
