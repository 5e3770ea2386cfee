// ============================================================================
// Domain Models Module
// Value types shared by the engine: shapes, arrays, operands, config
// ============================================================================

pub mod array;
pub mod config;
pub mod evaluation;
pub mod operand;
pub mod shape;

pub use array::NdArray;
pub use config::{EvaluatorConfig, PaymentTiming};
pub use evaluation::{EvaluationId, Operation};
pub use operand::{DomainValue, Operand, OperandRole};
pub use shape::Shape;
