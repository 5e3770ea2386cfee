// ============================================================================
// Strided Cursor Strategy
// Incremental odometer over precomputed operand strides
// ============================================================================

use super::traits::IterationStrategy;
use crate::engine::BroadcastPlan;
use crate::numeric::TvmResult;

/// Walks the plan with its incremental offset cursor.
///
/// Each step adds (or, on carry, rewinds) one stride per operand instead
/// of recomputing a full index. This is the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StridedCursor;

impl StridedCursor {
    /// Create a new strided cursor strategy.
    pub fn new() -> Self {
        Self
    }
}

impl IterationStrategy for StridedCursor {
    fn visit(
        &self,
        plan: &BroadcastPlan,
        visitor: &mut dyn FnMut(&[usize]) -> TvmResult<()>,
    ) -> TvmResult<()> {
        for offsets in plan.offsets() {
            visitor(&offsets)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "StridedCursor"
    }
}
