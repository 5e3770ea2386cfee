// ============================================================================
// Binary64 Domain
// TvmScalar for f64 with explicit failure instead of NaN/infinity
// ============================================================================

use super::errors::{TvmError, TvmResult};
use super::scalar::{FractionalPowerPolicy, NumericDomain, TvmScalar};

#[inline]
fn finite(value: f64) -> TvmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TvmError::Overflow)
    }
}

impl TvmScalar for f64 {
    const DOMAIN: NumericDomain = NumericDomain::Float;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn try_add(self, rhs: Self) -> TvmResult<Self> {
        finite(self + rhs)
    }

    #[inline]
    fn try_sub(self, rhs: Self) -> TvmResult<Self> {
        finite(self - rhs)
    }

    #[inline]
    fn try_mul(self, rhs: Self) -> TvmResult<Self> {
        finite(self * rhs)
    }

    #[inline]
    fn try_div(self, rhs: Self) -> TvmResult<Self> {
        if rhs == 0.0 {
            return Err(TvmError::DivisionByZero);
        }
        finite(self / rhs)
    }

    fn try_pow(self, exponent: Self, _policy: FractionalPowerPolicy) -> TvmResult<Self> {
        if self < 0.0 && exponent.fract() != 0.0 {
            return Err(TvmError::InvalidRate {
                reason: "negative compounding base with fractional periods",
            });
        }
        if self == 0.0 && exponent < 0.0 {
            return Err(TvmError::InvalidRate {
                reason: "zero compounding base with negative periods",
            });
        }
        finite(self.powf(exponent))
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0.0
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn is_integral(self) -> bool {
        self.fract() == 0.0
    }
}
