//! The console dispatch loop
//!
//! [`ConsoleDriver`] consumes the event stream in order. Passive events are
//! rendered and flushed. Interactive events are resolved completely, every
//! retry included, before the next element is read, so nothing published
//! meanwhile can interleave with a prompt.

use anvil_core::{
    Attempt, Exchange, Interactive, LogEvent, LogLevel, OutputEvent, Renderable, ResponseError,
    StyledTextOutput, PROMPT_CATEGORY,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::error::ConsoleResult;
use crate::input::LineSource;

/// Shown when a prompt runs out of attempts
pub const GIVE_UP_MESSAGE: &str = "Too many invalid answers; giving up.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverConfig {
    /// Lines accepted per prompt before it is abandoned; `None` is unbounded
    pub max_attempts: Option<u32>,
}

/// Counters for one driver session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Render calls, prompt re-renders included
    pub rendered: usize,
    /// Prompts whose answer was accepted
    pub answered: usize,
    /// Prompts that ended without an answer
    pub abandoned: usize,
    /// Rejected lines across all prompts
    pub retries: usize,
}

/// Whether the loop keeps reading the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Renders console events and resolves prompts against a line source
pub struct ConsoleDriver<O, I> {
    output: O,
    input: I,
    config: DriverConfig,
    cancel: CancellationToken,
    input_closed: bool,
    stats: DriverStats,
}

impl<O, I> ConsoleDriver<O, I>
where
    O: StyledTextOutput + Send,
    I: LineSource,
{
    pub fn new(output: O, input: I, config: DriverConfig) -> Self {
        Self {
            output,
            input,
            config,
            cancel: CancellationToken::new(),
            input_closed: false,
            stats: DriverStats::default(),
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the driver, interrupting any pending read
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Whether the line source has reported end of input
    pub fn input_closed(&self) -> bool {
        self.input_closed
    }

    pub fn into_parts(self) -> (O, I) {
        (self.output, self.input)
    }

    /// Drive the stream until every sender is dropped or the token fires
    ///
    /// Events still queued when the driver stops are dropped with the
    /// receiver, which abandons any prompts among them.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<Box<dyn OutputEvent>>,
    ) -> ConsoleResult<DriverStats> {
        debug!("Console driver started");
        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("Console driver cancelled");
                    break;
                }
                next = events.recv() => next,
            };

            let Some(mut event) = next else {
                debug!("Console event stream closed");
                break;
            };

            if self.dispatch(event.as_mut()).await? == Flow::Stop {
                break;
            }
        }
        debug!(stats = ?self.stats, "Console driver stopped");
        Ok(self.stats)
    }

    /// Handle a single event
    pub async fn dispatch(&mut self, event: &mut dyn OutputEvent) -> ConsoleResult<Flow> {
        trace!(event = %event, "Dispatching console event");

        if event.is_interactive() {
            if let Some(exchange) = event.as_exchange_mut() {
                return self.resolve(exchange).await;
            }
            warn!(event = %event, "Interactive event has no response sink, rendering only");
        }

        match event.as_renderable() {
            Some(renderable) => self.emit(renderable)?,
            None => trace!(event = %event, "Skipping event without a rendering"),
        }
        Ok(Flow::Continue)
    }

    async fn resolve(&mut self, exchange: &mut dyn Exchange) -> ConsoleResult<Flow> {
        if self.input_closed {
            debug!(prompt = %exchange.id(), "Input closed, abandoning prompt");
            self.give_up(exchange);
            return Ok(Flow::Continue);
        }

        loop {
            if let Err(e) = self.show(exchange.current()) {
                self.give_up(exchange);
                return Err(e);
            }

            let read = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                line = self.input.read_line() => Some(line),
            };

            let line = match read {
                None => {
                    debug!(prompt = %exchange.id(), "Cancelled while waiting for input");
                    self.give_up(exchange);
                    return Ok(Flow::Stop);
                }
                Some(Err(e)) => {
                    self.give_up(exchange);
                    return Err(e.into());
                }
                Some(Ok(None)) => {
                    warn!(prompt = %exchange.id(), "End of input, prompt left unanswered");
                    self.input_closed = true;
                    self.give_up(exchange);
                    return Ok(Flow::Continue);
                }
                Some(Ok(Some(line))) => line,
            };

            match exchange.attempt(&line) {
                Ok(Attempt::Accepted) => {
                    self.stats.answered += 1;
                    return Ok(Flow::Continue);
                }
                Ok(Attempt::Retry) => {
                    self.stats.retries += 1;
                    if self.exhausted(exchange.attempts()) {
                        warn!(
                            prompt = %exchange.id(),
                            attempts = exchange.attempts(),
                            "Too many invalid answers"
                        );
                        self.give_up(exchange);
                        let notice =
                            LogEvent::now(PROMPT_CATEGORY, LogLevel::Quiet, GIVE_UP_MESSAGE);
                        self.emit(&notice)?;
                        return Ok(Flow::Continue);
                    }
                }
                Err(ResponseError::Closed) => {
                    warn!(prompt = %exchange.id(), "Requester stopped waiting, answer dropped");
                    self.stats.answered += 1;
                    return Ok(Flow::Continue);
                }
                Err(e @ ResponseError::AlreadyDelivered) => {
                    warn!(prompt = %exchange.id(), error = %e, "Prompt already settled");
                    return Ok(Flow::Continue);
                }
            }
        }
    }

    fn emit(&mut self, event: &dyn Renderable) -> ConsoleResult<()> {
        event.render(&mut self.output)?;
        self.output.flush()?;
        self.stats.rendered += 1;
        Ok(())
    }

    // Prompts end without a newline, so every render is flushed
    fn show(&mut self, prompt: &dyn Interactive) -> ConsoleResult<()> {
        prompt.render(&mut self.output)?;
        self.output.flush()?;
        self.stats.rendered += 1;
        Ok(())
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.config.max_attempts.is_some_and(|max| attempts >= max)
    }

    fn give_up(&mut self, exchange: &mut dyn Exchange) {
        if !exchange.is_settled() {
            exchange.abandon();
            self.stats.abandoned += 1;
        }
    }
}
