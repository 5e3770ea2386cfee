// ============================================================================
// Broadcasting Engine
// Output shape resolution and per-operand strided offsets
// ============================================================================

use crate::domain::shape::Dims;
use crate::domain::Shape;
use crate::numeric::{TvmError, TvmResult};
use smallvec::SmallVec;

/// Flat offsets into each operand for one output coordinate.
pub type OperandOffsets = SmallVec<[usize; 4]>;

/// Resolve the broadcast shape of a set of operand shapes.
///
/// Shapes are right-aligned. On each output axis the size is 1 only if
/// every operand has 1 there; otherwise all non-1 sizes must agree.
///
/// # Errors
/// Returns `ShapeMismatch` naming the first axis with two different
/// non-1 sizes.
///
/// # Example
/// ```
/// use tvm_broadcast::domain::Shape;
/// use tvm_broadcast::engine::broadcast_shapes;
///
/// let out = broadcast_shapes(&[&Shape::from([4, 1]), &Shape::from([3])]).unwrap();
/// assert_eq!(out, Shape::from([4, 3]));
/// ```
pub fn broadcast_shapes(shapes: &[&Shape]) -> TvmResult<Shape> {
    let rank = shapes.iter().map(|s| s.ndim()).max().unwrap_or(0);
    let mut dims: Dims = SmallVec::from_elem(1, rank);

    for shape in shapes {
        let lead = rank - shape.ndim();
        for (i, &dim) in shape.dims().iter().enumerate() {
            let axis = lead + i;
            let current = dims[axis];
            if dim == current || dim == 1 {
                continue;
            }
            if current == 1 {
                dims[axis] = dim;
                continue;
            }
            return Err(TvmError::ShapeMismatch {
                axis,
                left: current,
                right: dim,
            });
        }
    }

    Ok(Shape::from_dims(dims))
}

/// Broadcast output shape together with each operand's strides over it.
///
/// A stretched axis (operand size 1, or missing because the operand has
/// lower rank) gets stride 0, so the operand's values are revisited
/// without ever being copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastPlan {
    output: Shape,
    strides: Vec<SmallVec<[usize; 4]>>,
}

impl BroadcastPlan {
    /// Build a plan for operands with the given shapes, in order.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if the shapes cannot be broadcast together.
    pub fn new(shapes: &[&Shape]) -> TvmResult<Self> {
        let output = broadcast_shapes(shapes)?;
        let rank = output.ndim();

        let strides = shapes
            .iter()
            .map(|shape| {
                let own = shape.strides();
                let lead = rank - shape.ndim();
                let mut aligned: SmallVec<[usize; 4]> = SmallVec::from_elem(0, rank);
                for (i, &dim) in shape.dims().iter().enumerate() {
                    if dim != 1 {
                        aligned[lead + i] = own[i];
                    }
                }
                aligned
            })
            .collect();

        let plan = Self { output, strides };
        tracing::trace!(
            output = %plan.output,
            operands = plan.operand_count(),
            "broadcast plan built"
        );
        Ok(plan)
    }

    #[inline]
    pub fn output_shape(&self) -> &Shape {
        &self.output
    }

    /// Number of output coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.output.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn operand_count(&self) -> usize {
        self.strides.len()
    }

    /// Strides of one operand aligned to the output axes.
    #[inline]
    pub fn operand_strides(&self, operand: usize) -> &[usize] {
        &self.strides[operand]
    }

    /// Row-major cursor over all output coordinates.
    ///
    /// Each call starts from the first coordinate, so the sequence can be
    /// replayed any number of times.
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets {
            plan: self,
            index: SmallVec::from_elem(0, self.output.ndim()),
            current: SmallVec::from_elem(0, self.operand_count()),
            remaining: self.len(),
        }
    }

    /// Offsets for the coordinate at row-major position `linear`.
    ///
    /// `out` must hold one slot per operand.
    pub fn offsets_at(&self, linear: usize, out: &mut [usize]) {
        out.iter_mut().for_each(|o| *o = 0);
        let mut rest = linear;
        for (axis, &dim) in self.output.dims().iter().enumerate().rev() {
            let coord = rest % dim;
            rest /= dim;
            for (slot, strides) in out.iter_mut().zip(&self.strides) {
                *slot += coord * strides[axis];
            }
        }
    }
}

/// Odometer over a `BroadcastPlan`, last axis fastest.
#[derive(Debug, Clone)]
pub struct Offsets<'a> {
    plan: &'a BroadcastPlan,
    index: SmallVec<[usize; 4]>,
    current: OperandOffsets,
    remaining: usize,
}

impl Offsets<'_> {
    fn advance(&mut self) {
        let dims = self.plan.output.dims();
        for axis in (0..dims.len()).rev() {
            self.index[axis] += 1;
            if self.index[axis] < dims[axis] {
                for (slot, strides) in self.current.iter_mut().zip(&self.plan.strides) {
                    *slot += strides[axis];
                }
                return;
            }
            // Wrap this axis and carry into the next slower one
            self.index[axis] = 0;
            for (slot, strides) in self.current.iter_mut().zip(&self.plan.strides) {
                *slot -= strides[axis] * (dims[axis] - 1);
            }
        }
    }
}

impl Iterator for Offsets<'_> {
    type Item = OperandOffsets;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}
