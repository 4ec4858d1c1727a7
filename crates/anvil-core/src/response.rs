//! Response sink boundary

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ResponseError;

/// Correlation key for a published prompt
///
/// Assigned by whoever publishes the prompt, so the answer can be matched to
/// the request that asked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(u64);

impl PromptId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prompt-{}", self.0)
    }
}

/// Receives accepted answers
///
/// `deliver` is called at most once per prompt, and only after a line was
/// accepted. Prompts that end without an answer get `abandon` instead.
pub trait ResponseSink<T>: Send {
    fn deliver(&mut self, id: PromptId, value: T) -> Result<(), ResponseError>;

    /// The prompt ended without an answer (cancelled, input closed, gave up)
    fn abandon(&mut self, id: PromptId) {
        let _ = id;
    }
}

impl<T: Send> ResponseSink<T> for std::sync::mpsc::Sender<(PromptId, T)> {
    fn deliver(&mut self, id: PromptId, value: T) -> Result<(), ResponseError> {
        self.send((id, value)).map_err(|_| ResponseError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_sink_delivers_keyed_values() {
        let (mut tx, rx) = mpsc::channel();
        ResponseSink::deliver(&mut tx, PromptId::new(1), "yes").unwrap();
        ResponseSink::deliver(&mut tx, PromptId::new(2), "no").unwrap();

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![(PromptId::new(1), "yes"), (PromptId::new(2), "no")]
        );
    }

    #[test]
    fn test_channel_sink_reports_closed_receiver() {
        let (mut tx, rx) = mpsc::channel::<(PromptId, u8)>();
        drop(rx);
        assert_eq!(
            ResponseSink::deliver(&mut tx, PromptId::new(1), 1),
            Err(ResponseError::Closed)
        );
    }

    #[test]
    fn test_prompt_id_display() {
        assert_eq!(PromptId::new(3).to_string(), "prompt-3");
    }
}
