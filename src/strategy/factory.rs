// ============================================================================
// Strategy Selection
// Maps a configured StrategyKind to a shared strategy instance
// ============================================================================

use super::coordinate::CoordinateLoop;
use super::strided::StridedCursor;
use super::traits::IterationStrategy;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Iteration strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrategyKind {
    /// Incremental strided cursor
    #[default]
    Strided,
    /// Per-coordinate index recomputation
    CoordinateLoop,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Strided => write!(f, "strided"),
            StrategyKind::CoordinateLoop => write!(f, "coordinate-loop"),
        }
    }
}

/// Create the strategy for `kind`.
///
/// # Example
/// ```
/// use tvm_broadcast::strategy::{create_strategy, StrategyKind};
///
/// let strategy = create_strategy(StrategyKind::CoordinateLoop);
/// assert_eq!(strategy.name(), "CoordinateLoop");
/// ```
pub fn create_strategy(kind: StrategyKind) -> Arc<dyn IterationStrategy> {
    match kind {
        StrategyKind::Strided => Arc::new(StridedCursor::new()),
        StrategyKind::CoordinateLoop => Arc::new(CoordinateLoop::new()),
    }
}

/// Create the default (strided) strategy.
pub fn create_default_strategy() -> Arc<dyn IterationStrategy> {
    create_strategy(StrategyKind::default())
}
