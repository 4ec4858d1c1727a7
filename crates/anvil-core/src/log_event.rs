//! Passive log events

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{EventError, OutputResult};
use crate::event::{EventMeta, OperationId, OutputEvent, Renderable, WithOperationId};
use crate::level::LogLevel;
use crate::output::{Style, StyledTextOutput};

/// A line of build output that needs no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    meta: EventMeta,
    message: String,
    failure: Option<String>,
}

impl LogEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        category: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            meta: EventMeta::new(timestamp, category, level),
            message: message.into(),
            failure: None,
        }
    }

    /// Log event stamped with the current time
    pub fn now(category: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self::new(Utc::now(), category, level, message)
    }

    /// Attach failure details, rendered on their own line
    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failure = Some(failure.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl Renderable for LogEvent {
    fn render(&self, output: &mut dyn StyledTextOutput) -> OutputResult<()> {
        let style = if self.meta.level() >= LogLevel::Error {
            Style::Error
        } else {
            Style::Normal
        };
        output.styled_text(style, &self.message)?;
        output.println()?;
        if let Some(failure) = &self.failure {
            output.styled_text(Style::Failure, failure)?;
            output.println()?;
        }
        Ok(())
    }
}

impl OutputEvent for LogEvent {
    fn meta(&self) -> &EventMeta {
        &self.meta
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl WithOperationId for LogEvent {
    fn with_operation_id(&self, operation_id: OperationId) -> Result<Self, EventError> {
        Ok(Self {
            meta: self.meta.clone().with_operation(Some(operation_id)),
            message: self.message.clone(),
            failure: self.failure.clone(),
        })
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.meta.level(),
            self.meta.category(),
            self.message
        )
    }
}
