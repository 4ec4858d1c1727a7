//! Console event model and prompt/response protocol for Anvil
//!
//! Everything a build writes to the console travels as an [`OutputEvent`].
//! Most events are passive and only know how to render themselves; a few are
//! *interactive* and suspend the stream until the user has answered them.
//!
//! # Capabilities
//!
//! Consumers branch on what an event can do rather than what it is:
//!
//! - [`Renderable`] - writes itself into a [`StyledTextOutput`]
//! - [`Interactive`] - expects a single line of input before the stream moves on
//! - [`Exchange`] - an interactive event bound to a [`ResponseSink`], which is
//!   what the console driver actually resolves
//!
//! # Conversion
//!
//! A [`PromptEvent`] delegates validation to its [`PromptKind`]. Each line the
//! user types is converted into a [`Conversion`]: either `Accepted(value)` or
//! `Retry(replacement)`. The protocol itself never looks at previous attempts.
//!
//! # Example
//!
//! ```
//! use anvil_core::{Conversion, PromptEvent, RecordingOutput, Renderable, YesNo};
//!
//! let prompt = PromptEvent::ask("Continue? [y/n]", YesNo);
//!
//! let mut out = RecordingOutput::new();
//! prompt.render(&mut out).unwrap();
//! assert_eq!(out.transcript(), "\nContinue? [y/n]");
//!
//! assert_eq!(prompt.convert("y"), Conversion::Accepted(true));
//! assert!(prompt.convert("nope").is_retry());
//! ```

pub mod error;
pub mod event;
pub mod exchange;
pub mod level;
pub mod log_event;
pub mod output;
pub mod prompt;
pub mod response;

pub use error::{EventError, OutputError, OutputResult, ResponseError};
pub use event::{EventMeta, Interactive, OperationId, OutputEvent, Renderable, WithOperationId};
pub use exchange::{Attempt, Exchange, PromptExchange};
pub use level::LogLevel;
pub use log_event::LogEvent;
pub use output::{OutputOp, RecordingOutput, Style, StyledTextOutput};
pub use prompt::kinds::{Confirm, FreeText, IntRange, RequiredText, Select, TextWithDefault, YesNo};
pub use prompt::{Conversion, PromptEvent, PromptKind, PROMPT_CATEGORY};
pub use response::{PromptId, ResponseSink};
