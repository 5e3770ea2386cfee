// ============================================================================
// Interfaces Module
// Contains the observer contract for evaluator events
// ============================================================================

mod observer;

pub use observer::{EvaluationEvent, EvaluationObserver, LoggingObserver, NoOpObserver};
