//! Diagnostic logging setup for the binary
//!
//! Diagnostics go to stderr; stdout belongs to prompts and answers.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither the flag, `ANVIL_LOG` nor the config set one
pub const DEFAULT_DIRECTIVE: &str = "off";

/// Build the filter for `directive`, falling back to [`DEFAULT_DIRECTIVE`]
pub fn env_filter(directive: Option<&str>) -> Result<EnvFilter> {
    let directive = directive.unwrap_or(DEFAULT_DIRECTIVE);
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter '{directive}'"))
}

/// Install the global subscriber
pub fn init(directive: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(env_filter(None).is_ok());
        assert!(env_filter(Some("anvil_console=debug,anvil_core=trace")).is_ok());
        assert!(env_filter(Some("anvil_console=loud")).is_err());
    }
}
