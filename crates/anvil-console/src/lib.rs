//! Console front end for Anvil prompts
//!
//! Requesters hold a [`UserInputHandler`] and publish prompts and log events
//! onto a bounded stream. A single [`ConsoleDriver`] renders that stream to a
//! [`StyledTextOutput`](anvil_core::StyledTextOutput), reads answers from a
//! [`LineSource`] and delivers them back through each prompt's
//! [`ReplySlot`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod handler;
pub mod input;
pub mod logging;
pub mod terminal;

pub use config::{ColorMode, ConsoleConfig, LogConfig};
pub use driver::{ConsoleDriver, DriverConfig, DriverStats, Flow, GIVE_UP_MESSAGE};
pub use error::{ConsoleError, ConsoleResult};
pub use handler::{channel, EventReceiver, EventSender, PendingAnswer, ReplySlot, UserInputHandler};
pub use input::{LineSource, ScriptedInput, StdinLines};
pub use terminal::TerminalOutput;
