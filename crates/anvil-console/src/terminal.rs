//! Terminal implementation of [`StyledTextOutput`]

use anvil_core::{OutputResult, Style, StyledTextOutput};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Writes console text to any [`io::Write`], colouring styled runs
///
/// Plain [`text`](StyledTextOutput::text) is written untouched. With colour
/// disabled, styled runs are written untouched too.
pub struct TerminalOutput<W: Write> {
    writer: W,
    color: bool,
}

impl TerminalOutput<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn paint(style: Style, text: &str) -> ColoredString {
    match style {
        Style::Normal => text.normal(),
        Style::Header => text.bold(),
        Style::UserInput => text.bold(),
        Style::Identifier => text.cyan().bold(),
        Style::Description => text.dimmed(),
        Style::ProgressStatus => text.yellow(),
        Style::Success => text.green(),
        Style::Failure => text.red(),
        Style::Info => text.blue(),
        Style::Error => text.red().bold(),
    }
}

impl<W: Write> StyledTextOutput for TerminalOutput<W> {
    fn println(&mut self) -> OutputResult<()> {
        writeln!(self.writer)?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> OutputResult<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn styled_text(&mut self, style: Style, text: &str) -> OutputResult<()> {
        if !self.color || style == Style::Normal {
            return self.text(text);
        }
        write!(self.writer, "{}", paint(style, text))?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_core::{LogEvent, LogLevel, Renderable};
    use serial_test::serial;

    fn written(out: TerminalOutput<Vec<u8>>) -> String {
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_text_and_line_breaks() {
        let mut out = TerminalOutput::new(Vec::new(), false);
        out.println().unwrap();
        out.text("Enter your name:").unwrap();
        out.flush().unwrap();
        assert_eq!(written(out), "\nEnter your name:");
    }

    #[test]
    fn test_styles_ignored_without_color() {
        let mut out = TerminalOutput::new(Vec::new(), false);
        out.styled_text(Style::Error, "boom").unwrap();
        assert_eq!(written(out), "boom");
    }

    #[test]
    #[serial]
    fn test_styled_text_is_colored_when_enabled() {
        colored::control::set_override(true);
        let mut out = TerminalOutput::new(Vec::new(), true);
        let event = LogEvent::now("build", LogLevel::Error, "compilation failed");
        event.render(&mut out).unwrap();
        colored::control::unset_override();

        let text = written(out);
        assert!(text.contains("\u{1b}["), "expected ANSI escapes in {text:?}");
        assert!(text.contains("compilation failed"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    #[serial]
    fn test_normal_style_never_escaped() {
        colored::control::set_override(true);
        let mut out = TerminalOutput::new(Vec::new(), true);
        out.styled_text(Style::Normal, "plain").unwrap();
        colored::control::unset_override();
        assert_eq!(written(out), "plain");
    }
}
