// ============================================================================
// Shape
// Dimension sizes of a row-major value array
// ============================================================================

use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inline capacity covers every rank the evaluator is normally asked for.
pub(crate) type Dims = SmallVec<[usize; 4]>;

/// Shape of an array: one size per axis, first axis slowest-varying.
///
/// Rank 0 (no axes) is a scalar with exactly one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape(Dims);

impl Shape {
    /// The rank-0 shape.
    #[inline]
    pub fn scalar() -> Self {
        Self(Dims::new())
    }

    /// Build from a slice of dimension sizes.
    pub fn new(dims: &[usize]) -> Self {
        Self(Dims::from_slice(dims))
    }

    pub(crate) fn from_dims(dims: Dims) -> Self {
        Self(dims)
    }

    /// Dimension sizes.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements (1 for a scalar), saturating at
    /// `usize::MAX`.
    #[inline]
    pub fn size(&self) -> usize {
        self.checked_size().unwrap_or(usize::MAX)
    }

    /// Total number of elements, `None` if it does not fit in `usize`.
    ///
    /// A zero-length axis makes the size 0 regardless of the others.
    pub fn checked_size(&self) -> Option<usize> {
        if self.0.contains(&0) {
            return Some(0);
        }
        self.0.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }

    /// Whether any axis has length zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Row-major element strides.
    pub fn strides(&self) -> SmallVec<[usize; 4]> {
        let mut strides: SmallVec<[usize; 4]> = SmallVec::from_elem(0, self.0.len());
        let mut acc = 1usize;
        for (stride, &dim) in strides.iter_mut().zip(self.0.iter()).rev() {
            *stride = acc;
            acc = acc.saturating_mul(dim);
        }
        strides
    }

    /// Split into the leading shape and the length of the trailing axis.
    ///
    /// Returns `None` for a scalar.
    pub fn split_last(&self) -> Option<(Shape, usize)> {
        self.0
            .split_last()
            .map(|(&last, leading)| (Shape::new(leading), last))
    }

    /// Shape with a length-1 axis inserted at `axis`.
    ///
    /// `axis` is clamped to the current rank.
    pub fn with_axis_inserted(&self, axis: usize) -> Shape {
        let mut dims = self.0.clone();
        dims.insert(axis.min(dims.len()), 1);
        Self(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(Dims::from_vec(dims))
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape::new(&dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "()"),
            [only] => write!(f, "({},)", only),
            dims => {
                write!(f, "(")?;
                for (i, dim) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", dim)?;
                }
                write!(f, ")")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_shape() {
        let s = Shape::scalar();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.size(), 1);
        assert!(!s.is_empty());
        assert!(s.split_last().is_none());
    }

    #[test]
    fn test_size_and_strides() {
        let s = Shape::from([2, 3, 4]);
        assert_eq!(s.size(), 24);
        assert_eq!(s.strides().as_slice(), &[12, 4, 1]);
        assert!(Shape::from([3, 0]).is_empty());
    }

    #[test]
    fn test_size_overflow() {
        let huge = Shape::from([usize::MAX, 2]);
        assert_eq!(huge.checked_size(), None);
        assert_eq!(huge.size(), usize::MAX);
        assert_eq!(huge.strides().as_slice(), &[2, 1]);
        assert_eq!(Shape::from([usize::MAX, 2, 0]).checked_size(), Some(0));
    }

    #[test]
    fn test_split_last() {
        let (leading, last) = Shape::from([3, 5]).split_last().unwrap();
        assert_eq!(leading, Shape::from([3]));
        assert_eq!(last, 5);

        let (leading, last) = Shape::from([7]).split_last().unwrap();
        assert_eq!(leading, Shape::scalar());
        assert_eq!(last, 7);
    }

    #[test]
    fn test_insert_axis() {
        let s = Shape::from([4]);
        assert_eq!(s.with_axis_inserted(1), Shape::from([4, 1]));
        assert_eq!(s.with_axis_inserted(0), Shape::from([1, 4]));
        assert_eq!(s.with_axis_inserted(9), Shape::from([4, 1]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::scalar().to_string(), "()");
        assert_eq!(Shape::from([3]).to_string(), "(3,)");
        assert_eq!(Shape::from([3, 5]).to_string(), "(3, 5)");
    }
}
