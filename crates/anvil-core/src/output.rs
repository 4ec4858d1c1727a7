//! Styled text output boundary
//!
//! Events render through [`StyledTextOutput`] and never touch a terminal
//! directly. The console crate provides the terminal implementation;
//! [`RecordingOutput`] keeps an in-memory log of every operation.

use crate::error::OutputResult;

/// Visual style hint for a run of text
///
/// Sinks are free to ignore styles (plain pipes, log files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Unstyled text
    #[default]
    Normal,
    /// Section headers
    Header,
    /// Text the user typed or is expected to type
    UserInput,
    /// Names of tasks, projects, options
    Identifier,
    /// Secondary descriptive text
    Description,
    /// Progress status
    ProgressStatus,
    /// Successful outcome
    Success,
    /// Failed outcome
    Failure,
    /// Informational notice
    Info,
    /// Error text
    Error,
}

/// Sink for console text
///
/// Only [`println`](Self::println) and [`text`](Self::text) are required.
pub trait StyledTextOutput {
    /// Emit a line break
    fn println(&mut self) -> OutputResult<()>;

    /// Emit text exactly as given
    fn text(&mut self, text: &str) -> OutputResult<()>;

    /// Emit text with a style hint
    fn styled_text(&mut self, style: Style, text: &str) -> OutputResult<()> {
        let _ = style;
        self.text(text)
    }

    /// Push buffered text to the destination
    ///
    /// Called after a prompt has been rendered, since prompts do not end with
    /// a newline and line-buffered writers would otherwise hold them back.
    fn flush(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

impl<T: StyledTextOutput + ?Sized> StyledTextOutput for &mut T {
    fn println(&mut self) -> OutputResult<()> {
        (**self).println()
    }

    fn text(&mut self, text: &str) -> OutputResult<()> {
        (**self).text(text)
    }

    fn styled_text(&mut self, style: Style, text: &str) -> OutputResult<()> {
        (**self).styled_text(style, text)
    }

    fn flush(&mut self) -> OutputResult<()> {
        (**self).flush()
    }
}

/// A single recorded output operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOp {
    /// `println()`
    LineBreak,
    /// `text()` / `styled_text()`
    Text {
        /// Style the text was written with
        style: Style,
        /// The text itself
        text: String,
    },
}

/// In-memory sink that records every operation in order
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    ops: Vec<OutputOp>,
    flushes: usize,
}

impl RecordingOutput {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations in emission order
    pub fn ops(&self) -> &[OutputOp] {
        &self.ops
    }

    /// Number of `flush()` calls seen
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Text runs in emission order, without line breaks
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                OutputOp::Text { text, .. } => Some(text.as_str()),
                OutputOp::LineBreak => None,
            })
            .collect()
    }

    /// Everything written, with line breaks as `\n`
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            match op {
                OutputOp::LineBreak => out.push('\n'),
                OutputOp::Text { text, .. } => out.push_str(text),
            }
        }
        out
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.ops.clear();
        self.flushes = 0;
    }
}

impl StyledTextOutput for RecordingOutput {
    fn println(&mut self) -> OutputResult<()> {
        self.ops.push(OutputOp::LineBreak);
        Ok(())
    }

    fn text(&mut self, text: &str) -> OutputResult<()> {
        self.styled_text(Style::Normal, text)
    }

    fn styled_text(&mut self, style: Style, text: &str) -> OutputResult<()> {
        self.ops.push(OutputOp::Text {
            style,
            text: text.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order_and_style() {
        let mut out = RecordingOutput::new();
        out.text("a").unwrap();
        out.println().unwrap();
        out.styled_text(Style::Failure, "b").unwrap();

        assert_eq!(
            out.ops(),
            &[
                OutputOp::Text {
                    style: Style::Normal,
                    text: "a".to_string()
                },
                OutputOp::LineBreak,
                OutputOp::Text {
                    style: Style::Failure,
                    text: "b".to_string()
                },
            ]
        );
        assert_eq!(out.transcript(), "a\nb");
        assert_eq!(out.texts(), vec!["a", "b"]);
    }

    fn write_via<O: StyledTextOutput>(mut out: O) {
        out.text("x").unwrap();
        out.flush().unwrap();
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut out = RecordingOutput::new();
        write_via(&mut out);
        assert_eq!(out.transcript(), "x");
        assert_eq!(out.flushes(), 1);

        out.clear();
        assert!(out.ops().is_empty());
    }
}
