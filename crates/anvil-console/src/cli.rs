use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use crate::config::ColorMode;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "anvil")]
#[command(about = "anvil - ask questions on the build console")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses ANVIL_LOG or the config file value, else 'off'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/anvil/console.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Colour mode (overrides config file)
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Invalid answers allowed per prompt (overrides config file)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,
}

impl Cli {
    /// Filter directive requested on the command line, if any
    pub fn log_directive(&self) -> Option<String> {
        let level = match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => return None,
        };
        Some(LevelFilter::from(level).to_string().to_lowercase())
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a single question and print the answer as JSON
    Ask(AskArgs),
}

/// Kind of question to ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuestionKind {
    /// Any line, taken verbatim
    Text,
    /// Any line that is not blank
    Required,
    /// Strict y/n
    YesNo,
    /// yes/no with a default
    Confirm,
    /// Integer with optional bounds
    Int,
    /// One of the --option values
    Select,
}

#[derive(Debug, Clone, Args)]
pub struct AskArgs {
    /// Kind of question
    #[arg(value_enum)]
    pub kind: QuestionKind,

    /// Question text
    pub question: String,

    /// Default answer (text, confirm, int, select)
    #[arg(short, long)]
    pub default: Option<String>,

    /// Option for a select question (repeatable)
    #[arg(short = 'o', long = "option")]
    pub options: Vec<String>,

    /// Lower bound for an int question (default 0)
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Upper bound for an int question
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Scripted answer line instead of reading stdin (repeatable)
    #[arg(long)]
    pub answers: Vec<String>,
}
