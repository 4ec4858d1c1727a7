//! Binding a prompt to the sink that receives its answer
//!
//! A [`PromptEvent`] only knows how to convert input. A [`PromptExchange`]
//! adds the correlation key and the [`ResponseSink`], tracks which prompt
//! text is on screen, and is what the console driver resolves through the
//! object-safe [`Exchange`] capability.

use std::fmt;

use crate::error::{OutputResult, ResponseError};
use crate::event::{EventMeta, Interactive, OutputEvent, Renderable};
use crate::output::StyledTextOutput;
use crate::prompt::{Conversion, PromptEvent, PromptKind};
use crate::response::{PromptId, ResponseSink};

/// What one line of input did to an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The line was rejected; render [`Exchange::current`] and read again
    Retry,
    /// The line was accepted and the answer delivered
    Accepted,
}

/// Driver-facing view of a prompt awaiting its answer
pub trait Exchange: Send {
    fn id(&self) -> PromptId;

    /// The prompt that should be on screen for the next attempt
    fn current(&self) -> &dyn Interactive;

    /// Feed one raw line through conversion
    ///
    /// Errors only when the answer cannot be delivered, or when the exchange
    /// is already settled.
    fn attempt(&mut self, input: &str) -> Result<Attempt, ResponseError>;

    /// End the exchange without an answer
    fn abandon(&mut self);

    /// Whether an answer was delivered or the exchange was abandoned
    fn is_settled(&self) -> bool;

    /// Number of lines fed through [`attempt`](Self::attempt)
    fn attempts(&self) -> u32;
}

/// A prompt event bound to its response sink
///
/// Dropping an unsettled exchange abandons it, so the sink always hears
/// about the outcome.
pub struct PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    id: PromptId,
    event: PromptEvent<K>,
    replacement: Option<PromptEvent<K>>,
    sink: S,
    attempts: u32,
    settled: bool,
}

impl<K, S> PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    pub fn new(id: PromptId, event: PromptEvent<K>, sink: S) -> Self {
        Self {
            id,
            event,
            replacement: None,
            sink,
            attempts: 0,
            settled: false,
        }
    }

    /// The prompt as originally published
    pub fn event(&self) -> &PromptEvent<K> {
        &self.event
    }

    fn showing(&self) -> &PromptEvent<K> {
        self.replacement.as_ref().unwrap_or(&self.event)
    }
}

impl<K, S> Exchange for PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    fn id(&self) -> PromptId {
        self.id
    }

    fn current(&self) -> &dyn Interactive {
        self.showing()
    }

    fn attempt(&mut self, input: &str) -> Result<Attempt, ResponseError> {
        if self.settled {
            return Err(ResponseError::AlreadyDelivered);
        }
        self.attempts += 1;

        match self.event.convert(input) {
            Conversion::Accepted(value) => {
                tracing::debug!(prompt = %self.id, attempts = self.attempts, "Prompt answered");
                self.settled = true;
                self.sink.deliver(self.id, value)?;
                Ok(Attempt::Accepted)
            }
            Conversion::Retry(Some(text)) => {
                tracing::debug!(prompt = %self.id, attempts = self.attempts, "Prompt replaced");
                self.replacement = Some(self.event.replaced(text));
                Ok(Attempt::Retry)
            }
            Conversion::Retry(None) => {
                tracing::debug!(prompt = %self.id, attempts = self.attempts, "Prompt repeated");
                self.replacement = None;
                Ok(Attempt::Retry)
            }
        }
    }

    fn abandon(&mut self) {
        if !self.settled {
            tracing::debug!(prompt = %self.id, attempts = self.attempts, "Prompt abandoned");
            self.settled = true;
            self.sink.abandon(self.id);
        }
    }

    fn is_settled(&self) -> bool {
        self.settled
    }

    fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl<K, S> Renderable for PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    fn render(&self, output: &mut dyn StyledTextOutput) -> OutputResult<()> {
        self.showing().render(output)
    }
}

impl<K, S> OutputEvent for PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    fn meta(&self) -> &EventMeta {
        self.event.meta()
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }

    fn as_interactive(&self) -> Option<&dyn Interactive> {
        Some(self.showing())
    }

    fn as_exchange_mut(&mut self) -> Option<&mut dyn Exchange> {
        Some(self)
    }
}

impl<K, S> Drop for PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    fn drop(&mut self) {
        self.abandon();
    }
}

impl<K, S> fmt::Debug for PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptExchange")
            .field("id", &self.id)
            .field("event", &self.event)
            .field("replacement", &self.replacement)
            .field("attempts", &self.attempts)
            .field("settled", &self.settled)
            .finish()
    }
}

impl<K, S> fmt::Display for PromptExchange<K, S>
where
    K: PromptKind,
    S: ResponseSink<K::Response>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.showing())
    }
}
