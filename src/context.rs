//! Per-invocation context supplied by the hosting framework.

use std::time::{Duration, Instant};

/// Structured invocation context: a trace id for log correlation and an
/// optional deadline. Used only to derive per-call timeouts; no broker state
/// is ever carried here.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Correlation id attached to every log line for this invocation.
    pub trace_id: String,

    /// Absolute deadline for the whole invocation, if the host imposes one.
    pub deadline: Option<Instant>,
}

impl InvocationContext {
    /// Creates a context without a deadline.
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self { trace_id: trace_id.into(), deadline: None }
    }

    /// Creates a context with an absolute invocation deadline.
    pub fn with_deadline(trace_id: impl Into<String>, deadline: Instant) -> Self {
        Self { trace_id: trace_id.into(), deadline: Some(deadline) }
    }

    /// Bounds the configured per-call timeout by the time remaining until
    /// the invocation deadline.
    pub fn call_timeout(&self, default: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => default.min(deadline.saturating_duration_since(Instant::now())),
            None => default,
        }
    }
}
