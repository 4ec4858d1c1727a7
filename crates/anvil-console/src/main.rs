use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use anvil_console::{
    cli::{Cli, Commands},
    commands, logging, ConsoleConfig, ConsoleDriver, LineSource, ScriptedInput, StdinLines,
    TerminalOutput,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration with CLI overrides
    let mut config = ConsoleConfig::load(cli.config.clone())?;
    if let Some(color) = cli.color {
        config.color = color;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = Some(max_attempts);
    }

    let directive = cli.log_directive().or_else(|| config.log.level.clone());
    logging::init(directive.as_deref())?;
    debug!(?config, "Loaded console configuration");

    let color = config.color.for_stdout();
    colored::control::set_override(color);

    let Commands::Ask(args) = cli.command;
    let scripted = !args.answers.is_empty();
    let input: Box<dyn LineSource> = if scripted {
        Box::new(ScriptedInput::new(args.answers.clone()))
    } else {
        Box::new(StdinLines::new())
    };

    let (handler, events) = anvil_console::channel(config.queue_capacity);
    let cancel = CancellationToken::new();
    let mut driver = ConsoleDriver::new(
        TerminalOutput::stdout(color),
        input,
        config.driver_config(),
    )
    .with_cancellation(cancel.clone());
    let console = tokio::spawn(async move { driver.run(events).await });

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning pending prompt");
            interrupt.cancel();
        }
    });

    let answer = commands::ask(&handler, &args).await;
    // The driver stops once every sender is gone
    drop(handler);
    let stats = console.await.context("Console driver task failed")??;
    debug!(?stats, "Console session finished");

    match answer? {
        Some(value) => {
            if scripted {
                // Scripted answers are never echoed, so end the prompt line here
                println!();
            }
            println!("{}", serde_json::to_string(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            debug!("Prompt ended without an answer");
            Ok(ExitCode::FAILURE)
        }
    }
}
