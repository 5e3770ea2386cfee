// ============================================================================
// Coordinate Loop Strategy
// Naive per-coordinate index computation (the nested-loop equivalent)
// ============================================================================

use super::traits::IterationStrategy;
use crate::engine::BroadcastPlan;
use crate::numeric::TvmResult;
use smallvec::SmallVec;

/// Recomputes every operand offset from scratch for each coordinate.
///
/// Equivalent to evaluating the kernel inside one loop per output axis;
/// kept as the reference the strided cursor is checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateLoop;

impl CoordinateLoop {
    /// Create a new coordinate loop strategy.
    pub fn new() -> Self {
        Self
    }
}

impl IterationStrategy for CoordinateLoop {
    fn visit(
        &self,
        plan: &BroadcastPlan,
        visitor: &mut dyn FnMut(&[usize]) -> TvmResult<()>,
    ) -> TvmResult<()> {
        let mut offsets: SmallVec<[usize; 4]> = SmallVec::from_elem(0, plan.operand_count());
        for linear in 0..plan.len() {
            plan.offsets_at(linear, &mut offsets);
            visitor(&offsets)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CoordinateLoop"
    }
}
