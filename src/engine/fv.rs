// ============================================================================
// FV Kernel
// Future value of a present value plus level payments, fully broadcast
// ============================================================================

use super::broadcast::BroadcastPlan;
use crate::domain::{NdArray, OperandRole, PaymentTiming};
use crate::numeric::{FractionalPowerPolicy, TvmError, TvmResult, TvmScalar};
use crate::strategy::IterationStrategy;

/// Future value for one tuple of operands.
///
/// ```text
/// rate == 0:  FV = -(pv + pmt * nper)
/// otherwise:  FV = -(pv * (1+rate)^nper + pmt * k * ((1+rate)^nper - 1) / rate)
/// ```
/// where `k` is 1 for `PaymentTiming::End` and `1 + rate` for `Begin`.
/// Signs are taken as given: money paid out is negative, money received
/// positive.
///
/// # Errors
/// - `InvalidRate` when `(1+rate)^nper` is undefined (negative base with
///   fractional periods, zero base with negative periods)
/// - `FractionalPeriods` under `FractionalPowerPolicy::Reject`
/// - `Overflow` if an intermediate leaves the domain
pub fn fv_kernel<T: TvmScalar>(
    rate: T,
    periods: T,
    payment: T,
    present_value: T,
    timing: PaymentTiming,
    policy: FractionalPowerPolicy,
) -> TvmResult<T> {
    if rate.is_zero() {
        let accumulated = present_value.try_add(payment.try_mul(periods)?)?;
        return Ok(accumulated.neg());
    }

    let growth = T::one().try_add(rate)?;
    let compounded = growth.try_pow(periods, policy)?;

    let payment = match timing {
        PaymentTiming::End => payment,
        PaymentTiming::Begin => payment.try_mul(growth)?,
    };

    let principal = present_value.try_mul(compounded)?;
    let annuity = payment
        .try_mul(compounded.try_sub(T::one())?)?
        .try_div(rate)?;

    Ok(principal.try_add(annuity)?.neg())
}

/// Broadcast FV over four operand arrays.
pub(crate) fn fv_array<T: TvmScalar>(
    rate: &NdArray<T>,
    periods: &NdArray<T>,
    payment: &NdArray<T>,
    present_value: &NdArray<T>,
    timing: PaymentTiming,
    policy: FractionalPowerPolicy,
    strategy: &dyn IterationStrategy,
) -> TvmResult<NdArray<T>> {
    for (array, role) in [
        (rate, OperandRole::Rate),
        (periods, OperandRole::Periods),
        (payment, OperandRole::Payment),
        (present_value, OperandRole::PresentValue),
    ] {
        if array.is_empty() {
            return Err(TvmError::EmptyOperand { role });
        }
    }

    let plan = BroadcastPlan::new(&[
        rate.shape(),
        periods.shape(),
        payment.shape(),
        present_value.shape(),
    ])?;
    let (r, n, p, v) = (
        rate.as_slice(),
        periods.as_slice(),
        payment.as_slice(),
        present_value.as_slice(),
    );
    let mut values = Vec::with_capacity(plan.len());

    strategy.visit(&plan, &mut |o| {
        values.push(fv_kernel(r[o[0]], n[o[1]], p[o[2]], v[o[3]], timing, policy)?);
        Ok(())
    })?;

    Ok(NdArray::from_parts(plan.output_shape().clone(), values))
}
