// ============================================================================
// Evaluator Configuration
// Payment timing, decimal power policy and iteration strategy selection
// ============================================================================

use crate::numeric::{FractionalPowerPolicy, TvmError, TvmResult};
use crate::strategy::StrategyKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Payment Timing
// ============================================================================

/// When periodic payments fall within each period (FV only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaymentTiming {
    /// Ordinary annuity: payment at the end of each period
    #[default]
    End,

    /// Annuity due: payment at the beginning of each period
    /// - Payment term is scaled by (1 + rate)
    /// - Zero-rate branch is unaffected
    Begin,
}

// ============================================================================
// Complete Evaluator Configuration
// ============================================================================

/// Configuration for an `Evaluator`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluatorConfig {
    /// Payment timing used by FV
    pub payment_timing: PaymentTiming,

    /// How the decimal domain handles fractional periods
    pub fractional_power: FractionalPowerPolicy,

    /// Iteration strategy over broadcast coordinates
    pub strategy: StrategyKind,

    /// Optional: Maximum number of output elements per call
    /// None means unlimited
    pub max_output_elements: Option<usize>,
}

impl EvaluatorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set payment timing
    pub fn with_payment_timing(mut self, timing: PaymentTiming) -> Self {
        self.payment_timing = timing;
        self
    }

    /// Builder method: Set the decimal fractional power policy
    pub fn with_fractional_power(mut self, policy: FractionalPowerPolicy) -> Self {
        self.fractional_power = policy;
        self
    }

    /// Builder method: Set the iteration strategy
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder method: Cap the broadcast output size
    pub fn with_max_output_elements(mut self, limit: usize) -> Self {
        self.max_output_elements = Some(limit);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> TvmResult<()> {
        if self.max_output_elements == Some(0) {
            return Err(TvmError::InvalidConfig(
                "max_output_elements must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> TvmResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TvmError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
