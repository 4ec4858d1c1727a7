//! Line-oriented user input

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Source of answer lines
///
/// `read_line` yields one line without its terminator. `Ok(None)` means the
/// input is exhausted and no further lines will ever arrive.
#[async_trait]
pub trait LineSource: Send {
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

#[async_trait]
impl<T: LineSource + ?Sized> LineSource for Box<T> {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line().await
    }
}

/// Lines read from the process's standard input
pub struct StdinLines {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for StdinLines {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

/// Pre-recorded answers, used by `--answers` and tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    reads: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            reads: 0,
        }
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Number of `read_line` calls, including ones that hit end of input
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[async_trait]
impl LineSource for ScriptedInput {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_input_yields_lines_then_eof() {
        let mut input = ScriptedInput::new(["first", ""]);
        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(input.read_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line().await.unwrap(), None);
        assert_eq!(input.read_line().await.unwrap(), None);
        assert_eq!(input.reads(), 4);
        assert_eq!(input.remaining(), 0);
    }
}
