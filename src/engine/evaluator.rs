// ============================================================================
// Evaluator
// Domain dispatch and validation in front of the broadcast kernels
// ============================================================================

use super::broadcast::broadcast_shapes;
use super::fv::fv_array;
use super::npv::npv_array;
use crate::domain::{
    DomainValue, EvaluationId, EvaluatorConfig, NdArray, Operand, OperandRole, Operation, Shape,
};
use crate::interfaces::{EvaluationEvent, EvaluationObserver, NoOpObserver};
use crate::numeric::{NumericDomain, TvmError, TvmResult, TvmScalar};
use crate::strategy::{create_strategy, IterationStrategy};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Stateless NPV/FV evaluator.
///
/// Holds only immutable configuration, so one instance can be shared
/// across threads and called concurrently.
pub struct Evaluator {
    /// Validated configuration
    config: EvaluatorConfig,

    /// Coordinate walker selected by `config.strategy`
    strategy: Arc<dyn IterationStrategy>,

    /// Event sink
    observer: Arc<dyn EvaluationObserver>,
}

impl Evaluator {
    /// Create an evaluator with a no-op observer.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: EvaluatorConfig) -> TvmResult<Self> {
        Self::with_observer(config, Arc::new(NoOpObserver))
    }

    /// Create an evaluator reporting to `observer`.
    pub fn with_observer(
        config: EvaluatorConfig,
        observer: Arc<dyn EvaluationObserver>,
    ) -> TvmResult<Self> {
        config.validate()?;
        let strategy = create_strategy(config.strategy);
        tracing::debug!(
            strategy = strategy.name(),
            timing = ?config.payment_timing,
            fractional_power = ?config.fractional_power,
            "evaluator created"
        );
        Ok(Self {
            config,
            strategy,
            observer,
        })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Name of the active iteration strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    // ========================================================================
    // Dynamic (domain-tagged) entry points
    // ========================================================================

    /// Net present value of `cashflows` (time on the trailing axis)
    /// discounted at `rate`, broadcasting the leading axes.
    ///
    /// # Errors
    /// `DomainMismatch` if the operands differ in domain, otherwise any
    /// error of [`Evaluator::npv_typed`].
    ///
    /// # Example
    /// ```
    /// use tvm_broadcast::prelude::*;
    ///
    /// let evaluator = Evaluator::default();
    /// let out = evaluator
    ///     .npv(&Operand::from(0.1), &Operand::from(vec![100.0, 110.0]))
    ///     .unwrap();
    /// let value = out.as_float().unwrap().clone().into_scalar().unwrap();
    /// assert!((value - 200.0).abs() < 1e-9);
    /// ```
    pub fn npv(&self, rate: &Operand, cashflows: &Operand) -> TvmResult<Operand> {
        match rate.domain() {
            NumericDomain::Float => self.npv_in::<f64>(rate, cashflows),
            NumericDomain::Decimal => self.npv_in::<Decimal>(rate, cashflows),
        }
    }

    /// Future value of `present_value` plus `payment` per period after
    /// `periods` periods at `rate`, all four operands broadcast together.
    pub fn fv(
        &self,
        rate: &Operand,
        periods: &Operand,
        payment: &Operand,
        present_value: &Operand,
    ) -> TvmResult<Operand> {
        match rate.domain() {
            NumericDomain::Float => self.fv_in::<f64>(rate, periods, payment, present_value),
            NumericDomain::Decimal => {
                self.fv_in::<Decimal>(rate, periods, payment, present_value)
            },
        }
    }

    fn npv_in<T: DomainValue>(&self, rate: &Operand, cashflows: &Operand) -> TvmResult<Operand> {
        let (r, c) = match expect_npv_operands::<T>(rate, cashflows) {
            Ok(typed) => typed,
            Err(error) => return Err(self.reject(EvaluationId::new(), Operation::Npv, error)),
        };
        self.npv_typed(r, c).map(T::into_operand)
    }

    fn fv_in<T: DomainValue>(
        &self,
        rate: &Operand,
        periods: &Operand,
        payment: &Operand,
        present_value: &Operand,
    ) -> TvmResult<Operand> {
        let (r, n, p, v) = match expect_fv_operands::<T>(rate, periods, payment, present_value) {
            Ok(typed) => typed,
            Err(error) => return Err(self.reject(EvaluationId::new(), Operation::Fv, error)),
        };
        self.fv_typed(r, n, p, v).map(T::into_operand)
    }

    // ========================================================================
    // Typed entry points (one instantiation per domain)
    // ========================================================================

    /// Typed NPV for callers already holding a single domain.
    ///
    /// # Errors
    /// - `EmptyOperand` for an empty rate or cash-flow array
    /// - `NonFiniteInput` for NaN/infinite float inputs
    /// - `ShapeMismatch` if the leading cash-flow axes do not broadcast
    ///   against `rate`
    /// - `OutputTooLarge` above the configured limit
    /// - any kernel error (`InvalidRate`, `Overflow`, ...)
    pub fn npv_typed<T: TvmScalar>(
        &self,
        rate: &NdArray<T>,
        cashflows: &NdArray<T>,
    ) -> TvmResult<NdArray<T>> {
        let id = EvaluationId::new();
        let output_shape = match self.prepare_npv(rate, cashflows) {
            Ok(shape) => shape,
            Err(error) => return Err(self.reject(id, Operation::Npv, error)),
        };
        self.started(id, Operation::Npv, T::DOMAIN, output_shape);

        let result = npv_array(rate, cashflows, self.strategy.as_ref());
        self.finish(id, Operation::Npv, result)
    }

    /// Typed FV for callers already holding a single domain.
    ///
    /// # Errors
    /// Same classes as [`Evaluator::npv_typed`], plus `FractionalPeriods`
    /// under the `Reject` decimal power policy.
    pub fn fv_typed<T: TvmScalar>(
        &self,
        rate: &NdArray<T>,
        periods: &NdArray<T>,
        payment: &NdArray<T>,
        present_value: &NdArray<T>,
    ) -> TvmResult<NdArray<T>> {
        let id = EvaluationId::new();
        let output_shape = match self.prepare_fv(rate, periods, payment, present_value) {
            Ok(shape) => shape,
            Err(error) => return Err(self.reject(id, Operation::Fv, error)),
        };
        self.started(id, Operation::Fv, T::DOMAIN, output_shape);

        let result = fv_array(
            rate,
            periods,
            payment,
            present_value,
            self.config.payment_timing,
            self.config.fractional_power,
            self.strategy.as_ref(),
        );
        self.finish(id, Operation::Fv, result)
    }

    /// NPV of every series against every rate, shaped `(n_rates, n_series)`.
    ///
    /// `rates` is flattened; `cashflows` keeps its trailing time axis and
    /// has its leading axes flattened into series (a 1-D input is one
    /// series). Equivalent to broadcasting a `(R, 1)` rate column against
    /// `(N, T)` cash flows.
    pub fn npv_grid<T: TvmScalar>(
        &self,
        rates: &NdArray<T>,
        cashflows: &NdArray<T>,
    ) -> TvmResult<NdArray<T>> {
        let column = rates.reshape([rates.len(), 1])?;
        let periods = cashflows.shape().split_last().map_or(1, |(_, last)| last);
        let series_count = if periods == 0 { 0 } else { cashflows.len() / periods };
        let table = cashflows.reshape([series_count, periods])?;
        self.npv_typed(&column, &table)
    }

    // ========================================================================
    // Lifecycle helpers
    // ========================================================================

    /// Validate NPV operands and resolve the output shape.
    fn prepare_npv<T: TvmScalar>(
        &self,
        rate: &NdArray<T>,
        cashflows: &NdArray<T>,
    ) -> TvmResult<Shape> {
        require(rate, OperandRole::Rate)?;
        require(cashflows, OperandRole::Cashflows)?;
        let series = cashflows
            .shape()
            .split_last()
            .map_or_else(Shape::scalar, |(leading, _)| leading);
        self.admit(broadcast_shapes(&[rate.shape(), &series])?)
    }

    /// Validate FV operands and resolve the output shape.
    fn prepare_fv<T: TvmScalar>(
        &self,
        rate: &NdArray<T>,
        periods: &NdArray<T>,
        payment: &NdArray<T>,
        present_value: &NdArray<T>,
    ) -> TvmResult<Shape> {
        require(rate, OperandRole::Rate)?;
        require(periods, OperandRole::Periods)?;
        require(payment, OperandRole::Payment)?;
        require(present_value, OperandRole::PresentValue)?;
        self.admit(broadcast_shapes(&[
            rate.shape(),
            periods.shape(),
            payment.shape(),
            present_value.shape(),
        ])?)
    }

    fn admit(&self, output_shape: Shape) -> TvmResult<Shape> {
        if let Some(limit) = self.config.max_output_elements {
            if output_shape.size() > limit {
                return Err(TvmError::OutputTooLarge {
                    requested: output_shape.size(),
                    limit,
                });
            }
        }
        Ok(output_shape)
    }

    fn started(&self, id: EvaluationId, operation: Operation, domain: NumericDomain, shape: Shape) {
        tracing::debug!(
            %id,
            %operation,
            %domain,
            output = %shape,
            strategy = self.strategy.name(),
            "evaluation started"
        );
        self.observer.on_event(EvaluationEvent::Started {
            id,
            operation,
            domain,
            output_shape: shape,
            timestamp: Utc::now(),
        });
    }

    fn finish<T>(
        &self,
        id: EvaluationId,
        operation: Operation,
        result: TvmResult<NdArray<T>>,
    ) -> TvmResult<NdArray<T>>
    where
        T: Copy,
    {
        match result {
            Ok(array) => {
                self.observer.on_event(EvaluationEvent::Completed {
                    id,
                    operation,
                    elements: array.len(),
                    timestamp: Utc::now(),
                });
                Ok(array)
            },
            Err(error) => Err(self.reject(id, operation, error)),
        }
    }

    fn reject(&self, id: EvaluationId, operation: Operation, error: TvmError) -> TvmError {
        tracing::debug!(%id, %operation, %error, "evaluation rejected");
        self.observer.on_event(EvaluationEvent::Failed {
            id,
            operation,
            error: error.clone(),
            timestamp: Utc::now(),
        });
        error
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            config: EvaluatorConfig::default(),
            strategy: create_strategy(Default::default()),
            observer: Arc::new(NoOpObserver),
        }
    }
}

fn expect_npv_operands<'a, T: DomainValue>(
    rate: &'a Operand,
    cashflows: &'a Operand,
) -> TvmResult<(&'a NdArray<T>, &'a NdArray<T>)> {
    Ok((
        rate.expect_domain::<T>(OperandRole::Rate)?,
        cashflows.expect_domain::<T>(OperandRole::Cashflows)?,
    ))
}

#[allow(clippy::type_complexity)]
fn expect_fv_operands<'a, T: DomainValue>(
    rate: &'a Operand,
    periods: &'a Operand,
    payment: &'a Operand,
    present_value: &'a Operand,
) -> TvmResult<(
    &'a NdArray<T>,
    &'a NdArray<T>,
    &'a NdArray<T>,
    &'a NdArray<T>,
)> {
    Ok((
        rate.expect_domain::<T>(OperandRole::Rate)?,
        periods.expect_domain::<T>(OperandRole::Periods)?,
        payment.expect_domain::<T>(OperandRole::Payment)?,
        present_value.expect_domain::<T>(OperandRole::PresentValue)?,
    ))
}

/// Reject empty operands and non-finite float values.
fn require<T: TvmScalar>(array: &NdArray<T>, role: OperandRole) -> TvmResult<()> {
    if array.is_empty() {
        return Err(TvmError::EmptyOperand { role });
    }
    if array.as_slice().iter().any(|v| !v.is_finite()) {
        return Err(TvmError::NonFiniteInput { role });
    }
    Ok(())
}
