// ============================================================================
// Evaluation Observer Interface
// Defines the contract for receiving evaluator lifecycle events
// ============================================================================

use crate::domain::{EvaluationId, Operation, Shape};
use crate::numeric::{NumericDomain, TvmError};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Events emitted by the evaluator
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum EvaluationEvent {
    /// Operands validated and broadcast shape resolved
    Started {
        id: EvaluationId,
        operation: Operation,
        domain: NumericDomain,
        output_shape: Shape,
        timestamp: DateTime<Utc>,
    },

    /// All output elements computed
    Completed {
        id: EvaluationId,
        operation: Operation,
        elements: usize,
        timestamp: DateTime<Utc>,
    },

    /// Call rejected or a kernel failed
    Failed {
        id: EvaluationId,
        operation: Operation,
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_error"))]
        error: TvmError,
        timestamp: DateTime<Utc>,
    },
}

#[cfg(feature = "serde")]
fn serialize_error<S: serde::Serializer>(error: &TvmError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

impl EvaluationEvent {
    pub fn id(&self) -> EvaluationId {
        match self {
            EvaluationEvent::Started { id, .. }
            | EvaluationEvent::Completed { id, .. }
            | EvaluationEvent::Failed { id, .. } => *id,
        }
    }
}

/// Observer trait for evaluator events
/// Implementations can handle logging, metrics, auditing, etc.
pub trait EvaluationObserver: Send + Sync {
    /// Handle an evaluation event
    fn on_event(&self, event: EvaluationEvent);
}

/// No-op observer (the evaluator default)
pub struct NoOpObserver;

impl EvaluationObserver for NoOpObserver {
    fn on_event(&self, _event: EvaluationEvent) {
        // Do nothing
    }
}

/// Logging observer
pub struct LoggingObserver;

impl EvaluationObserver for LoggingObserver {
    fn on_event(&self, event: EvaluationEvent) {
        match &event {
            EvaluationEvent::Failed {
                id,
                operation,
                error,
                ..
            } => tracing::warn!(%id, %operation, %error, "evaluation failed"),
            _ => tracing::debug!("Evaluator event: {:?}", event),
        }
    }
}
