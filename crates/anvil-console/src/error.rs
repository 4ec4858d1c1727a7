//! Console error types

use anvil_core::OutputError;
use thiserror::Error;

/// Errors raised while driving the console
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Rendering to the terminal failed
    #[error("Console output failed: {0}")]
    Output(#[from] OutputError),

    /// Reading a line of user input failed
    #[error("Failed to read user input: {0}")]
    Input(#[from] std::io::Error),

    /// The driver is gone, nothing will render or answer new events
    #[error("Console event stream closed")]
    StreamClosed,

    /// A selection prompt was requested with no options
    #[error("Cannot select from an empty list of options")]
    EmptySelection,
}

/// Specialized Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl ConsoleError {
    /// Whether the failure came from the terminal rather than the caller
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Output(_) | Self::Input(_))
    }
}
