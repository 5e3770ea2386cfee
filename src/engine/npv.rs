// ============================================================================
// NPV Kernel
// Net present value of cash-flow series, broadcast against rates
// ============================================================================

use super::broadcast::BroadcastPlan;
use crate::domain::{NdArray, OperandRole, Shape};
use crate::numeric::{TvmError, TvmResult, TvmScalar};
use crate::strategy::IterationStrategy;

/// Net present value of one cash-flow series at one rate.
///
/// `NPV = sum(cashflows[t] / (1 + rate)^t)` for `t` in `0..n`, summed in
/// ascending period order. Period 0 is never discounted, so a single
/// cash flow is returned unchanged at any rate.
///
/// # Errors
/// - `EmptyOperand` for an empty series
/// - `InvalidRate` for `rate == -1` when any period `t >= 1` exists
/// - `Overflow` if a discounted term or the sum leaves the domain
pub fn npv_kernel<T: TvmScalar>(rate: T, cashflows: &[T]) -> TvmResult<T> {
    let (&first, rest) = cashflows.split_first().ok_or(TvmError::EmptyOperand {
        role: OperandRole::Cashflows,
    })?;
    if rest.is_empty() {
        return Ok(first);
    }

    let growth = T::one().try_add(rate)?;
    if growth.is_zero() {
        return Err(TvmError::InvalidRate {
            reason: "rate of -1 discounts every period after the first by zero",
        });
    }

    let mut discount = Discount::new(growth)?;
    let mut total = first;
    for &cashflow in rest {
        total = total.try_add(discount.next(cashflow)?)?;
    }
    Ok(total)
}

/// Running discount across periods.
///
/// While `(1 + rate)^t` is at least 1 in magnitude and representable, each
/// cash flow is divided by it, which is exact for short decimal rates.
/// Otherwise the factor `(1 + rate)^-t` is carried instead, so a shrinking
/// compounded value never loses significant digits and a growing one
/// never has to be represented once it leaves the domain.
enum Discount<T> {
    Divide { growth: T, compounded: T },
    Multiply { step: T, factor: T },
}

impl<T: TvmScalar> Discount<T> {
    fn new(growth: T) -> TvmResult<Self> {
        if magnitude(growth) >= T::one() {
            Ok(Discount::Divide {
                growth,
                compounded: T::one(),
            })
        } else {
            Ok(Discount::Multiply {
                step: T::one().try_div(growth)?,
                factor: T::one(),
            })
        }
    }

    /// Discount the cash flow of the next period.
    fn next(&mut self, cashflow: T) -> TvmResult<T> {
        match *self {
            Discount::Divide { growth, compounded } => match compounded.try_mul(growth) {
                Ok(compounded) => {
                    *self = Discount::Divide { growth, compounded };
                    cashflow.try_div(compounded)
                },
                Err(TvmError::Overflow) => {
                    let step = T::one().try_div(growth)?;
                    let factor = T::one().try_div(compounded)?.try_mul(step)?;
                    *self = Discount::Multiply { step, factor };
                    cashflow.try_mul(factor)
                },
                Err(error) => Err(error),
            },
            Discount::Multiply { step, factor } => {
                let factor = factor.try_mul(step)?;
                *self = Discount::Multiply { step, factor };
                cashflow.try_mul(factor)
            },
        }
    }
}

#[inline]
fn magnitude<T: TvmScalar>(value: T) -> T {
    if value < T::zero() {
        value.neg()
    } else {
        value
    }
}

/// Broadcast NPV over arrays.
///
/// The trailing axis of `cashflows` is the time axis and is reduced by
/// the kernel; the remaining leading axes broadcast against `rate`. A
/// rank-0 `cashflows` is a single one-period series.
pub(crate) fn npv_array<T: TvmScalar>(
    rate: &NdArray<T>,
    cashflows: &NdArray<T>,
    strategy: &dyn IterationStrategy,
) -> TvmResult<NdArray<T>> {
    if rate.is_empty() {
        return Err(TvmError::EmptyOperand {
            role: OperandRole::Rate,
        });
    }
    let (series_shape, periods) = cashflows
        .shape()
        .split_last()
        .unwrap_or((Shape::scalar(), 1));
    if periods == 0 || cashflows.is_empty() {
        return Err(TvmError::EmptyOperand {
            role: OperandRole::Cashflows,
        });
    }

    let plan = BroadcastPlan::new(&[rate.shape(), &series_shape])?;
    let rates = rate.as_slice();
    let flows = cashflows.as_slice();
    let mut values = Vec::with_capacity(plan.len());

    strategy.visit(&plan, &mut |offsets| {
        let start = offsets[1] * periods;
        values.push(npv_kernel(rates[offsets[0]], &flows[start..start + periods])?);
        Ok(())
    })?;

    Ok(NdArray::from_parts(plan.output_shape().clone(), values))
}
