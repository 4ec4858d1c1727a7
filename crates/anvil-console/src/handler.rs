//! Requester side of the console
//!
//! [`UserInputHandler`] is what build logic holds to ask questions. Every
//! prompt it publishes is a [`PromptExchange`] bound to a [`ReplySlot`], so the
//! typed answer comes back through a oneshot channel while the event itself
//! travels the shared stream as a `Box<dyn OutputEvent>`.

use anvil_core::{
    Confirm, FreeText, IntRange, LogEvent, LogLevel, OperationId, OutputEvent, PromptEvent,
    PromptExchange, PromptId, PromptKind, RequiredText, ResponseError, ResponseSink, Select,
    TextWithDefault, WithOperationId, YesNo,
};
use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::error::{ConsoleError, ConsoleResult};

/// Sending half of the console event stream
pub type EventSender = mpsc::Sender<Box<dyn OutputEvent>>;

/// Receiving half of the console event stream
pub type EventReceiver = mpsc::Receiver<Box<dyn OutputEvent>>;

/// Create a handler and the stream the driver consumes
pub fn channel(capacity: usize) -> (UserInputHandler, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (UserInputHandler::new(tx), rx)
}

/// Response sink that hands the answer to a waiting [`PendingAnswer`]
pub struct ReplySlot<T> {
    tx: Option<oneshot::Sender<T>>,
}

impl<T> ReplySlot<T> {
    pub fn new(tx: oneshot::Sender<T>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Slot and the handle that waits on it
    pub fn pair(id: PromptId) -> (Self, PendingAnswer<T>) {
        let (tx, rx) = oneshot::channel();
        (Self::new(tx), PendingAnswer { id, rx })
    }
}

impl<T: Send> ResponseSink<T> for ReplySlot<T> {
    fn deliver(&mut self, _id: PromptId, value: T) -> Result<(), ResponseError> {
        let tx = self.tx.take().ok_or(ResponseError::AlreadyDelivered)?;
        tx.send(value).map_err(|_| ResponseError::Closed)
    }

    fn abandon(&mut self, _id: PromptId) {
        // Dropping the sender wakes the waiter with "no answer"
        self.tx.take();
    }
}

/// An answer that has been asked for but not necessarily given yet
#[derive(Debug)]
pub struct PendingAnswer<T> {
    id: PromptId,
    rx: oneshot::Receiver<T>,
}

impl<T> PendingAnswer<T> {
    pub fn id(&self) -> PromptId {
        self.id
    }

    /// Wait for the answer; `None` if the prompt was abandoned
    pub async fn wait(self) -> Option<T> {
        self.rx.await.ok()
    }
}

/// Publishes prompts and log events onto the console stream
///
/// Clones share the stream and the prompt id counter, so ids stay unique
/// across every clone.
#[derive(Clone)]
pub struct UserInputHandler {
    events: EventSender,
    next_id: Arc<AtomicU64>,
    operation: Option<OperationId>,
}

impl fmt::Debug for UserInputHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInputHandler")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

impl UserInputHandler {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            next_id: Arc::new(AtomicU64::new(0)),
            operation: None,
        }
    }

    /// A handler whose events carry `operation` from construction
    pub fn with_operation(&self, operation: OperationId) -> Self {
        Self {
            events: self.events.clone(),
            next_id: Arc::clone(&self.next_id),
            operation: Some(operation),
        }
    }

    pub fn operation(&self) -> Option<OperationId> {
        self.operation
    }

    /// Publish a prompt and return a handle to its answer
    pub async fn submit<K: PromptKind>(
        &self,
        question: &str,
        kind: K,
    ) -> ConsoleResult<PendingAnswer<K::Response>> {
        let id = PromptId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let prompt = kind.decorate(question);
        let event = match self.operation {
            Some(operation) => PromptEvent::for_operation(Utc::now(), prompt, kind, operation),
            None => PromptEvent::new(Utc::now(), prompt, kind),
        };

        let (slot, pending) = ReplySlot::pair(id);
        tracing::debug!(prompt = %id, question, "Publishing prompt");
        self.publish(Box::new(PromptExchange::new(id, event, slot)))
            .await?;
        Ok(pending)
    }

    /// Ask and wait; `None` if the prompt was abandoned
    pub async fn ask<K: PromptKind>(
        &self,
        question: &str,
        kind: K,
    ) -> ConsoleResult<Option<K::Response>> {
        Ok(self.submit(question, kind).await?.wait().await)
    }

    /// Strict `y`/`n` question
    pub async fn ask_yes_no(&self, question: &str) -> ConsoleResult<Option<bool>> {
        self.ask(question, YesNo).await
    }

    /// `yes`/`no` question where an empty answer picks `default`
    pub async fn ask_confirm(&self, question: &str, default: bool) -> ConsoleResult<Option<bool>> {
        self.ask(question, Confirm::new(default)).await
    }

    pub async fn ask_int(&self, question: &str, range: IntRange) -> ConsoleResult<Option<i64>> {
        self.ask(question, range).await
    }

    /// Pick one of `options`; `default` indexes into them
    pub async fn select_option<T>(
        &self,
        question: &str,
        options: Vec<T>,
        default: usize,
    ) -> ConsoleResult<Option<T>>
    where
        T: fmt::Display + fmt::Debug + Clone + Send + 'static,
    {
        let kind = Select::new(options, default).ok_or(ConsoleError::EmptySelection)?;
        self.ask(question, kind).await
    }

    /// Free text, optionally falling back to `default` on an empty answer
    pub async fn ask_text(
        &self,
        question: &str,
        default: Option<&str>,
    ) -> ConsoleResult<Option<String>> {
        match default {
            Some(default) => self.ask(question, TextWithDefault::new(default)).await,
            None => self.ask(question, FreeText).await,
        }
    }

    /// Free text that must not be blank
    pub async fn ask_required(&self, question: &str) -> ConsoleResult<Option<String>> {
        self.ask(question, RequiredText).await
    }

    /// Publish a passive log event
    pub async fn log(
        &self,
        level: LogLevel,
        category: &str,
        message: impl Into<String>,
    ) -> ConsoleResult<()> {
        let mut event = LogEvent::now(category, level, message);
        if let Some(operation) = self.operation {
            // Log events accept a new identity; only prompts refuse one
            if let Ok(bound) = event.with_operation_id(operation) {
                event = bound;
            }
        }
        self.publish(Box::new(event)).await
    }

    /// Publish any event onto the stream
    pub async fn publish(&self, event: Box<dyn OutputEvent>) -> ConsoleResult<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| ConsoleError::StreamClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_slot_delivers_once() {
        let (mut slot, pending) = ReplySlot::pair(PromptId::new(1));
        assert_eq!(pending.id(), PromptId::new(1));
        slot.deliver(PromptId::new(1), 42).unwrap();
        assert_eq!(
            slot.deliver(PromptId::new(1), 43),
            Err(ResponseError::AlreadyDelivered)
        );
        assert_eq!(pending.wait().await, Some(42));
    }

    #[test]
    fn test_pending_answer_waits_for_delivery() {
        let (mut slot, pending) = ReplySlot::pair(PromptId::new(1));
        let mut wait = tokio_test::task::spawn(pending.wait());
        tokio_test::assert_pending!(wait.poll());

        slot.deliver(PromptId::new(1), 5).unwrap();
        assert!(wait.is_woken());
        assert_eq!(tokio_test::assert_ready!(wait.poll()), Some(5));
    }

    #[tokio::test]
    async fn test_abandoned_slot_resolves_to_none() {
        let (mut slot, pending) = ReplySlot::<bool>::pair(PromptId::new(2));
        slot.abandon(PromptId::new(2));
        assert_eq!(pending.wait().await, None);
    }

    #[tokio::test]
    async fn test_closed_waiter_reports_closed() {
        let (mut slot, pending) = ReplySlot::pair(PromptId::new(3));
        drop(pending);
        assert_eq!(slot.deliver(PromptId::new(3), "x"), Err(ResponseError::Closed));
    }

    #[tokio::test]
    async fn test_submit_assigns_unique_ids_across_clones() {
        let (handler, mut rx) = channel(8);
        let other = handler.with_operation(OperationId::new(9));

        let first = handler.submit("a?", YesNo).await.unwrap();
        let second = other.submit("b?", YesNo).await.unwrap();
        assert_eq!(first.id(), PromptId::new(1));
        assert_eq!(second.id(), PromptId::new(2));

        let first_event = rx.recv().await.unwrap();
        let second_event = rx.recv().await.unwrap();
        assert_eq!(first_event.operation_id(), None);
        assert_eq!(second_event.operation_id(), Some(OperationId::new(9)));
        assert!(second_event.is_interactive());
    }

    #[tokio::test]
    async fn test_dropped_prompt_event_abandons_answer() {
        let (handler, mut rx) = channel(8);
        let pending = handler.submit("Name:", FreeText).await.unwrap();
        drop(rx.recv().await.unwrap());
        assert_eq!(pending.wait().await, None);
    }

    #[tokio::test]
    async fn test_log_carries_operation() {
        let (handler, mut rx) = channel(8);
        let handler = handler.with_operation(OperationId::new(4));
        handler
            .log(LogLevel::Lifecycle, "build", "Compiling")
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert!(!event.is_interactive());
        assert_eq!(event.operation_id(), Some(OperationId::new(4)));
        assert_eq!(event.category(), "build");
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected() {
        let (handler, _rx) = channel(8);
        let err = handler
            .select_option::<String>("Pick", Vec::new(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::EmptySelection));
    }

    #[tokio::test]
    async fn test_publish_fails_when_driver_gone() {
        let (handler, rx) = channel(1);
        drop(rx);
        let err = handler.ask_yes_no("Continue?").await.unwrap_err();
        assert!(matches!(err, ConsoleError::StreamClosed));
    }
}
