//! Prompt events and the conversion protocol
//!
//! A [`PromptEvent`] pairs immutable prompt text with a [`PromptKind`] that
//! decides what a line of input means. Conversion yields a [`Conversion`]:
//!
//! - `Accepted(value)` - the line was valid, `value` goes to the response sink
//! - `Retry(None)` - show the same prompt again
//! - `Retry(Some(text))` - show `text` instead on the next attempt
//!
//! Kinds own all whitespace and empty-input policy. The base [`FreeText`]
//! kind accepts every line verbatim, including the empty line.

pub mod kinds;

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{EventError, OutputResult};
use crate::event::{EventMeta, Interactive, OperationId, OutputEvent, Renderable, WithOperationId};
use crate::level::LogLevel;
use crate::output::StyledTextOutput;

pub use kinds::FreeText;

/// Category tag carried by every prompt event
pub const PROMPT_CATEGORY: &str = "prompt";

/// Outcome of converting one line of raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion<T> {
    /// Input was invalid or incomplete; optionally replace the prompt text
    Retry(Option<String>),
    /// Input was valid
    Accepted(T),
}

impl<T> Conversion<T> {
    /// Retry with the original prompt
    pub fn retry() -> Self {
        Self::Retry(None)
    }

    /// Retry, showing `prompt` instead of the original
    pub fn retry_with(prompt: impl Into<String>) -> Self {
        Self::Retry(Some(prompt.into()))
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry(_))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Replacement prompt text, if this is a retry that carries one
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Self::Retry(replacement) => replacement.as_deref(),
            Self::Accepted(_) => None,
        }
    }

    /// The accepted value, if any
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Retry(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conversion<U> {
        match self {
            Self::Accepted(value) => Conversion::Accepted(f(value)),
            Self::Retry(replacement) => Conversion::Retry(replacement),
        }
    }
}

/// Validation rules for one kind of question
///
/// Implementations must be pure: the same input always converts the same way,
/// regardless of how many attempts came before.
pub trait PromptKind: fmt::Debug + Clone + Send + 'static {
    /// Typed answer produced on acceptance
    type Response: fmt::Debug + Send + 'static;

    /// Build the prompt text for a question
    ///
    /// Kinds that advertise defaults or options append them here.
    fn decorate(&self, question: &str) -> String {
        question.to_string()
    }

    /// Convert one raw line (without its line terminator)
    fn convert(&self, input: &str) -> Conversion<Self::Response>;
}

/// A question shown to the user
///
/// The operation identity is fixed at construction; see
/// [`PromptEvent::for_operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEvent<K: PromptKind = FreeText> {
    meta: EventMeta,
    prompt: String,
    kind: K,
}

impl PromptEvent<FreeText> {
    /// Plain free-text prompt whose answer is the line exactly as typed
    pub fn text(timestamp: DateTime<Utc>, prompt: impl Into<String>) -> Self {
        Self::new(timestamp, prompt, FreeText)
    }
}

impl<K: PromptKind> PromptEvent<K> {
    /// Prompt with verbatim text, not bound to any operation
    pub fn new(timestamp: DateTime<Utc>, prompt: impl Into<String>, kind: K) -> Self {
        Self {
            meta: EventMeta::new(timestamp, PROMPT_CATEGORY, LogLevel::Quiet),
            prompt: prompt.into(),
            kind,
        }
    }

    /// Prompt bound to the operation that asked it
    pub fn for_operation(
        timestamp: DateTime<Utc>,
        prompt: impl Into<String>,
        kind: K,
        operation_id: OperationId,
    ) -> Self {
        let mut event = Self::new(timestamp, prompt, kind);
        event.meta = event.meta.with_operation(Some(operation_id));
        event
    }

    /// Prompt for `question`, decorated by the kind, stamped now
    pub fn ask(question: &str, kind: K) -> Self {
        let prompt = kind.decorate(question);
        Self::new(Utc::now(), prompt, kind)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Convert a raw line according to this prompt's kind
    pub fn convert(&self, input: &str) -> Conversion<K::Response> {
        self.kind.convert(input)
    }

    /// A new prompt event showing `prompt` under the same rules
    ///
    /// Keeps the kind and operation identity; the timestamp is fresh.
    pub fn replaced(&self, prompt: impl Into<String>) -> Self {
        Self {
            meta: EventMeta::new(Utc::now(), self.meta.category(), self.meta.level())
                .with_operation(self.meta.operation_id()),
            prompt: prompt.into(),
            kind: self.kind.clone(),
        }
    }
}

impl<K: PromptKind> Renderable for PromptEvent<K> {
    fn render(&self, output: &mut dyn StyledTextOutput) -> OutputResult<()> {
        // Separate the question from whatever was printed before it
        output.println()?;
        output.text(&self.prompt)
    }
}

impl<K: PromptKind> Interactive for PromptEvent<K> {
    fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl<K: PromptKind> OutputEvent for PromptEvent<K> {
    fn meta(&self) -> &EventMeta {
        &self.meta
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }

    fn as_interactive(&self) -> Option<&dyn Interactive> {
        Some(self)
    }
}

impl<K: PromptKind> WithOperationId for PromptEvent<K> {
    fn with_operation_id(&self, operation_id: OperationId) -> Result<Self, EventError> {
        Err(EventError::rebind(self.meta.category(), operation_id))
    }
}

impl<K: PromptKind> fmt::Display for PromptEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] '{}'",
            self.meta.level(),
            self.meta.category(),
            self.prompt
        )
    }
}
