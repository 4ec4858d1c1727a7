//! Error types for the console event model

use thiserror::Error;

use crate::event::OperationId;

/// Failures raised by a [`StyledTextOutput`](crate::StyledTextOutput)
#[derive(Debug, Error)]
pub enum OutputError {
    /// The underlying writer failed
    #[error("Output write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The sink was closed and cannot accept more text
    #[error("Output closed")]
    Closed,
}

/// Specialized Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

impl OutputError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Closed => "closed",
        }
    }
}

/// Misuse of an event's API
///
/// These are defects in the calling code, never something a user can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The operation is not supported by this event type
    #[error("Unsupported operation on {event} event: {operation}")]
    UnsupportedOperation {
        /// Category of the event the call was made on
        event: String,
        /// Name of the rejected operation
        operation: &'static str,
    },
}

impl EventError {
    /// Rebinding the operation identity of an event that forbids it
    pub fn rebind(event: impl Into<String>, attempted: OperationId) -> Self {
        tracing::error!(
            attempted = %attempted,
            "Refusing to rebind operation identity"
        );
        Self::UnsupportedOperation {
            event: event.into(),
            operation: "with_operation_id",
        }
    }
}

/// Failures delivering an accepted answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// Nobody is waiting for the answer any more
    #[error("Response sink closed")]
    Closed,

    /// An answer was already delivered for this prompt
    #[error("Response already delivered")]
    AlreadyDelivered,
}
