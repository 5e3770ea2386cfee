// ============================================================================
// Iteration Strategy Trait
// Abstract interface for walking the coordinates of a broadcast plan
// ============================================================================

use crate::engine::BroadcastPlan;
use crate::numeric::TvmResult;

/// Trait for visiting every output coordinate of a `BroadcastPlan`.
///
/// Implementations must visit coordinates in row-major order and hand
/// the visitor one flat offset per operand (in plan operand order).
/// Two strategies over the same plan and kernel therefore produce
/// identical output arrays.
///
/// # Thread Safety
/// All implementations must be `Send + Sync` so one evaluator can be
/// shared across threads.
pub trait IterationStrategy: Send + Sync {
    /// Visit all coordinates, stopping at the first visitor error.
    ///
    /// # Errors
    /// Propagates the first error returned by `visitor`.
    fn visit(
        &self,
        plan: &BroadcastPlan,
        visitor: &mut dyn FnMut(&[usize]) -> TvmResult<()>,
    ) -> TvmResult<()>;

    /// Get the name of this strategy.
    ///
    /// Used for logging, debugging, and benchmarking.
    fn name(&self) -> &'static str;
}
