// ============================================================================
// Evaluator Factory
// Creates evaluators with proper configuration
// ============================================================================

use super::evaluator::Evaluator;
use crate::domain::{EvaluatorConfig, PaymentTiming};
use crate::interfaces::{EvaluationObserver, NoOpObserver};
use crate::numeric::{FractionalPowerPolicy, TvmResult};
use crate::strategy::StrategyKind;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an evaluator from configuration
///
/// # Example
/// ```
/// use tvm_broadcast::prelude::*;
/// use std::sync::Arc;
///
/// let config = EvaluatorConfig::new().with_payment_timing(PaymentTiming::Begin);
/// let evaluator = create_from_config(config, Arc::new(NoOpObserver)).unwrap();
/// assert_eq!(evaluator.config().payment_timing, PaymentTiming::Begin);
/// ```
pub fn create_from_config(
    config: EvaluatorConfig,
    observer: Arc<dyn EvaluationObserver>,
) -> TvmResult<Evaluator> {
    Evaluator::with_observer(config, observer)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating evaluators with fluent API
///
/// # Example
/// ```
/// use tvm_broadcast::prelude::*;
/// use std::sync::Arc;
///
/// let evaluator = EvaluatorBuilder::new()
///     .annuity_due()
///     .coordinate_loop()
///     .reject_fractional_periods()
///     .observer(Arc::new(LoggingObserver))
///     .build()
///     .unwrap();
/// assert_eq!(evaluator.strategy_name(), "CoordinateLoop");
/// ```
pub struct EvaluatorBuilder {
    config: EvaluatorConfig,
    observer: Arc<dyn EvaluationObserver>,
}

impl EvaluatorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: EvaluatorConfig::default(),
            observer: Arc::new(NoOpObserver),
        }
    }

    // ========================================================================
    // Payment Timing
    // ========================================================================

    /// Payments at the end of each period (default)
    pub fn ordinary_annuity(mut self) -> Self {
        self.config.payment_timing = PaymentTiming::End;
        self
    }

    /// Payments at the beginning of each period
    pub fn annuity_due(mut self) -> Self {
        self.config.payment_timing = PaymentTiming::Begin;
        self
    }

    // ========================================================================
    // Decimal Power Policy
    // ========================================================================

    /// Fractional decimal powers through f64 (default)
    pub fn float_approximate_powers(mut self) -> Self {
        self.config.fractional_power = FractionalPowerPolicy::FloatApproximation;
        self
    }

    /// Fractional decimal powers through the decimal exp/ln series
    pub fn decimal_series_powers(mut self) -> Self {
        self.config.fractional_power = FractionalPowerPolicy::DecimalSeries;
        self
    }

    /// Fail decimal FV calls with fractional periods
    pub fn reject_fractional_periods(mut self) -> Self {
        self.config.fractional_power = FractionalPowerPolicy::Reject;
        self
    }

    // ========================================================================
    // Iteration Strategy
    // ========================================================================

    /// Incremental strided cursor (default)
    pub fn strided(mut self) -> Self {
        self.config.strategy = StrategyKind::Strided;
        self
    }

    /// Per-coordinate offset recomputation
    pub fn coordinate_loop(mut self) -> Self {
        self.config.strategy = StrategyKind::CoordinateLoop;
        self
    }

    // ========================================================================
    // Limits and Observers
    // ========================================================================

    /// Cap the number of output elements per call
    pub fn with_max_output_elements(mut self, limit: usize) -> Self {
        self.config.max_output_elements = Some(limit);
        self
    }

    /// Report lifecycle events to `observer`
    pub fn observer(mut self, observer: Arc<dyn EvaluationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build the evaluator
    pub fn build(self) -> TvmResult<Evaluator> {
        create_from_config(self.config, self.observer)
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
