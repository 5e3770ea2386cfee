// ============================================================================
// Utilities Module
// Process-level helpers for callers of the evaluator
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::{init_logging, logging_is_initialized, DEFAULT_FILTER};
