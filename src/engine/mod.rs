// ============================================================================
// Engine Module
// Broadcasting engine, formula kernels and the evaluator in front of them
// ============================================================================

mod broadcast;
mod evaluator;
mod fv;
mod npv;

pub mod factory;

pub use broadcast::{broadcast_shapes, BroadcastPlan, OperandOffsets, Offsets};
pub use evaluator::Evaluator;
pub use factory::{create_from_config, EvaluatorBuilder};
pub use fv::fv_kernel;
pub use npv::npv_kernel;
