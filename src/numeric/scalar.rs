// ============================================================================
// Scalar Capability Trait
// The arithmetic surface the formula kernels are written against
// ============================================================================

use super::errors::TvmResult;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Representation family of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericDomain {
    /// IEEE-754 binary64
    Float,
    /// `rust_decimal::Decimal` (96-bit mantissa, 28 significant digits)
    Decimal,
}

impl fmt::Display for NumericDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericDomain::Float => write!(f, "float64"),
            NumericDomain::Decimal => write!(f, "decimal"),
        }
    }
}

/// How the decimal domain raises a base to a non-integral exponent.
///
/// Integral exponents are always computed exactly by repeated
/// multiplication. The float domain ignores this setting and always
/// uses `f64::powf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FractionalPowerPolicy {
    /// Round-trip through f64 `powf` (15-17 significant digits survive)
    #[default]
    FloatApproximation,
    /// Decimal exp/ln series via `checked_powd`
    DecimalSeries,
    /// Fail with `FractionalPeriods`
    Reject,
}

/// Arithmetic capability set shared by every numeric domain.
///
/// The NPV and FV kernels are written once against this trait and
/// instantiated per domain, so no value ever crosses domains inside a
/// call.
///
/// # Thread Safety
/// Implementations are plain `Copy` values and must be `Send + Sync`.
pub trait TvmScalar:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The domain this scalar type belongs to.
    const DOMAIN: NumericDomain;

    /// Additive identity.
    fn zero() -> Self;

    /// Multiplicative identity.
    fn one() -> Self;

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the result leaves the domain's range.
    fn try_add(self, rhs: Self) -> TvmResult<Self>;

    /// Checked subtraction.
    fn try_sub(self, rhs: Self) -> TvmResult<Self>;

    /// Checked multiplication.
    fn try_mul(self, rhs: Self) -> TvmResult<Self>;

    /// Checked division.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor, `Overflow` otherwise.
    fn try_div(self, rhs: Self) -> TvmResult<Self>;

    /// Raise `self` to `exponent`.
    ///
    /// # Errors
    /// - `InvalidRate` for a negative base with a fractional exponent or a
    ///   zero base with a negative exponent
    /// - `FractionalPeriods` when the decimal policy is `Reject`
    /// - `Overflow` when the result is out of range
    fn try_pow(self, exponent: Self, policy: FractionalPowerPolicy) -> TvmResult<Self>;

    /// Arithmetic negation (exact in both domains).
    fn neg(self) -> Self;

    /// Exact comparison against zero.
    fn is_zero(self) -> bool;

    /// Whether the value is a usable operand (always true for decimals).
    fn is_finite(self) -> bool;

    /// Whether the value has no fractional part.
    fn is_integral(self) -> bool;
}
