// ============================================================================
// Numeric Errors
// Error taxonomy for broadcasting and time-value-of-money evaluation
// ============================================================================

use super::NumericDomain;
use crate::domain::OperandRole;
use std::fmt;

/// Errors that can occur while evaluating NPV/FV.
///
/// Every undefined mathematical case is reported as a distinct variant;
/// none of them is ever turned into a NaN or infinity result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TvmError {
    /// Two operands have different non-1 sizes on the same output axis
    ShapeMismatch {
        /// Output axis (left-to-right, after right-alignment)
        axis: usize,
        /// Size already established for the axis
        left: usize,
        /// Conflicting size
        right: usize,
    },
    /// Operands of one call span more than one numeric domain
    DomainMismatch {
        expected: NumericDomain,
        found: NumericDomain,
        role: OperandRole,
    },
    /// A required operand has zero elements
    EmptyOperand { role: OperandRole },
    /// The rate makes the result mathematically undefined
    InvalidRate { reason: &'static str },
    /// Data length does not match the requested shape
    InvalidShape { expected: usize, found: usize },
    /// NaN or infinity supplied as a float operand value
    NonFiniteInput { role: OperandRole },
    /// Attempted division by zero
    DivisionByZero,
    /// Result exceeded the representable range of the domain
    Overflow,
    /// Fractional periods rejected by the configured decimal power policy
    FractionalPeriods,
    /// Broadcast output exceeds the configured element limit
    OutputTooLarge { requested: usize, limit: usize },
    /// Evaluator configuration failed validation
    InvalidConfig(String),
}

impl fmt::Display for TvmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TvmError::ShapeMismatch { axis, left, right } => write!(
                f,
                "shape mismatch: axis {} has incompatible sizes {} and {}",
                axis, left, right
            ),
            TvmError::DomainMismatch {
                expected,
                found,
                role,
            } => write!(
                f,
                "domain mismatch: {} operand is {}, expected {}",
                role, found, expected
            ),
            TvmError::EmptyOperand { role } => write!(f, "empty operand: {} has no elements", role),
            TvmError::InvalidRate { reason } => write!(f, "invalid rate: {}", reason),
            TvmError::InvalidShape { expected, found } => write!(
                f,
                "invalid shape: expected {} elements, found {}",
                expected, found
            ),
            TvmError::NonFiniteInput { role } => {
                write!(f, "non-finite input: {} contains NaN or infinity", role)
            },
            TvmError::DivisionByZero => write!(f, "division by zero"),
            TvmError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded the domain's range")
            },
            TvmError::FractionalPeriods => write!(
                f,
                "fractional periods are not supported by the decimal power policy"
            ),
            TvmError::OutputTooLarge { requested, limit } => write!(
                f,
                "output too large: {} elements requested, limit is {}",
                requested, limit
            ),
            TvmError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for TvmError {}

/// Result type alias for evaluator operations
pub type TvmResult<T> = Result<T, TvmError>;
