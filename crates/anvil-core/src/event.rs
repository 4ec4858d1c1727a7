//! Event base and capability traits
//!
//! Every console event carries an [`EventMeta`] and implements
//! [`OutputEvent`]. What an event can *do* is exposed through capability
//! accessors, so the driver never needs to know concrete types:
//!
//! ```text
//! OutputEvent ──as_renderable()────► Renderable   (can draw itself)
//!             ──as_interactive()───► Interactive  (wants an answer)
//!             ──as_exchange_mut()──► Exchange     (can take the answer)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EventError, OutputResult};
use crate::exchange::Exchange;
use crate::level::LogLevel;
use crate::output::StyledTextOutput;

/// Identity of the build operation that produced an event
///
/// A plain value used for correlation; events never own the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(u64);

impl OperationId {
    /// Wrap a raw operation id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OperationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Attributes shared by every console event
///
/// Immutable once constructed; the builder-style setter consumes `self` and
/// is only meant for use while an event is being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMeta {
    timestamp: DateTime<Utc>,
    category: String,
    level: LogLevel,
    operation_id: Option<OperationId>,
}

impl EventMeta {
    pub fn new(timestamp: DateTime<Utc>, category: impl Into<String>, level: LogLevel) -> Self {
        Self {
            timestamp,
            category: category.into(),
            level,
            operation_id: None,
        }
    }

    /// Attach the originating operation while building
    pub fn with_operation(mut self, operation_id: Option<OperationId>) -> Self {
        self.operation_id = operation_id;
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn operation_id(&self) -> Option<OperationId> {
        self.operation_id
    }
}

/// An element of the console event stream
///
/// The `Display` impl is a diagnostic form for tracing the stream itself.
/// Terminal output always goes through [`Renderable::render`].
pub trait OutputEvent: fmt::Debug + fmt::Display + Send {
    /// Shared event attributes
    fn meta(&self) -> &EventMeta;

    fn timestamp(&self) -> DateTime<Utc> {
        self.meta().timestamp()
    }

    fn category(&self) -> &str {
        self.meta().category()
    }

    fn log_level(&self) -> LogLevel {
        self.meta().level()
    }

    fn operation_id(&self) -> Option<OperationId> {
        self.meta().operation_id()
    }

    /// Rendering capability, if the event can draw itself
    fn as_renderable(&self) -> Option<&dyn Renderable> {
        None
    }

    /// Interactive capability, if the event expects an answer
    fn as_interactive(&self) -> Option<&dyn Interactive> {
        None
    }

    /// Answer-taking capability, if the event is bound to a response sink
    fn as_exchange_mut(&mut self) -> Option<&mut dyn Exchange> {
        None
    }

    /// Whether the console must block for input after rendering this event
    fn is_interactive(&self) -> bool {
        self.as_interactive().is_some()
    }
}

/// Can write a human-readable form of itself into a styled sink
pub trait Renderable {
    fn render(&self, output: &mut dyn StyledTextOutput) -> OutputResult<()>;
}

/// Marker for events that suspend the stream until the user answers
pub trait Interactive: Renderable {
    /// The prompt text currently shown to the user
    fn prompt(&self) -> &str;
}

/// Re-identify an event with a different originating operation
pub trait WithOperationId: Sized {
    /// Returns a copy bound to `operation_id`, or fails for events whose
    /// identity is fixed at construction.
    fn with_operation_id(&self, operation_id: OperationId) -> Result<Self, EventError>;
}
