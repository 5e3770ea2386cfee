// ============================================================================
// Strategy Module
// Interchangeable ways of walking a broadcast plan
//
// This module contains:
// - IterationStrategy: the visitor contract every strategy fulfils
// - StridedCursor: incremental odometer over operand strides (default)
// - CoordinateLoop: recomputes offsets per coordinate, the loop reference
//
// Usage:
// ```ignore
// use tvm_broadcast::strategy::{create_strategy, StrategyKind};
//
// let strategy = create_strategy(StrategyKind::Strided);
// strategy.visit(&plan, &mut |offsets| { ... })?;
// ```
// ============================================================================

mod coordinate;
mod factory;
mod strided;
mod traits;

pub use coordinate::CoordinateLoop;
pub use factory::{create_default_strategy, create_strategy, StrategyKind};
pub use strided::StridedCursor;
pub use traits::IterationStrategy;
