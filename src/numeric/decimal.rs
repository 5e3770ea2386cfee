// ============================================================================
// Decimal Domain
// TvmScalar for rust_decimal::Decimal, exact wherever a closed form exists
// ============================================================================

use super::errors::{TvmError, TvmResult};
use super::scalar::{FractionalPowerPolicy, NumericDomain, TvmScalar};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

impl TvmScalar for Decimal {
    const DOMAIN: NumericDomain = NumericDomain::Decimal;

    #[inline]
    fn zero() -> Self {
        Decimal::ZERO
    }

    #[inline]
    fn one() -> Self {
        Decimal::ONE
    }

    #[inline]
    fn try_add(self, rhs: Self) -> TvmResult<Self> {
        self.checked_add(rhs).ok_or(TvmError::Overflow)
    }

    #[inline]
    fn try_sub(self, rhs: Self) -> TvmResult<Self> {
        self.checked_sub(rhs).ok_or(TvmError::Overflow)
    }

    #[inline]
    fn try_mul(self, rhs: Self) -> TvmResult<Self> {
        self.checked_mul(rhs).ok_or(TvmError::Overflow)
    }

    #[inline]
    fn try_div(self, rhs: Self) -> TvmResult<Self> {
        if rhs.is_zero() {
            return Err(TvmError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(TvmError::Overflow)
    }

    fn try_pow(self, exponent: Self, policy: FractionalPowerPolicy) -> TvmResult<Self> {
        if self.is_zero() && exponent.is_sign_negative() && !exponent.is_zero() {
            return Err(TvmError::InvalidRate {
                reason: "zero compounding base with negative periods",
            });
        }

        if exponent.fract().is_zero() {
            let exp = exponent.to_i64().ok_or(TvmError::Overflow)?;
            return self.checked_powi(exp).ok_or(TvmError::Overflow);
        }

        if self.is_sign_negative() && !self.is_zero() {
            return Err(TvmError::InvalidRate {
                reason: "negative compounding base with fractional periods",
            });
        }

        match policy {
            FractionalPowerPolicy::FloatApproximation => float_approximate_pow(self, exponent),
            FractionalPowerPolicy::DecimalSeries => {
                if self.is_zero() {
                    return Ok(Decimal::ZERO);
                }
                self.checked_powd(exponent).ok_or(TvmError::Overflow)
            },
            FractionalPowerPolicy::Reject => Err(TvmError::FractionalPeriods),
        }
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn is_zero(self) -> bool {
        Decimal::is_zero(&self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        true
    }

    #[inline]
    fn is_integral(self) -> bool {
        self.fract().is_zero()
    }
}

/// Fractional power through binary64.
///
/// Only the power itself leaves the decimal domain; the caller keeps
/// accumulating in decimal. The result carries at most ~17 significant
/// digits.
fn float_approximate_pow(base: Decimal, exponent: Decimal) -> TvmResult<Decimal> {
    let base = base.to_f64().ok_or(TvmError::Overflow)?;
    let exponent = exponent.to_f64().ok_or(TvmError::Overflow)?;
    let value = base.powf(exponent);
    if !value.is_finite() {
        return Err(TvmError::Overflow);
    }
    Decimal::from_f64(value).ok_or(TvmError::Overflow)
}
