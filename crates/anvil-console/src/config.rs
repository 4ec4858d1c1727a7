use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::driver::DriverConfig;

/// When to colour terminal output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Decide for a concrete stream
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// Decide for this process's stdout
    pub fn for_stdout(self) -> bool {
        self.resolve(std::io::stdout().is_terminal())
    }
}

impl FromStr for ColorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => anyhow::bail!("Unknown color mode '{other}' (expected auto, always or never)"),
        }
    }
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Terminal colour mode
    pub color: ColorMode,

    /// Invalid answers allowed per prompt before giving up (unbounded when unset)
    pub max_attempts: Option<u32>,

    /// Capacity of the event channel between requesters and the driver
    pub queue_capacity: usize,

    /// Logging configuration
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `debug` or `anvil_console=trace`
    pub level: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            max_attempts: None,
            queue_capacity: default_queue_capacity(),
            log: LogConfig::default(),
        }
    }
}

fn default_queue_capacity() -> usize {
    64
}

impl ConsoleConfig {
    /// Load configuration with precedence: defaults < file < env
    ///
    /// An explicit `config_file` must exist. The default location is optional.
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::from_file_or_default(config_file)?;

        if let Ok(color) = std::env::var("ANVIL_COLOR") {
            match color.parse() {
                Ok(mode) => config.color = mode,
                Err(e) => tracing::warn!(error = %e, "Ignoring ANVIL_COLOR"),
            }
        }
        if let Ok(attempts) = std::env::var("ANVIL_MAX_ATTEMPTS") {
            match attempts.trim().parse() {
                Ok(max) => config.max_attempts = Some(max),
                Err(e) => tracing::warn!(error = %e, value = %attempts, "Ignoring ANVIL_MAX_ATTEMPTS"),
            }
        }
        if let Ok(level) = std::env::var("ANVIL_LOG") {
            config.log.level = Some(level);
        }

        config.validate()?;
        Ok(config)
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("anvil");
        Ok(config_dir.join("console.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse console config")?;
        config.validate()?;
        Ok(config)
    }

    fn from_file_or_default(config_file: Option<PathBuf>) -> Result<Self> {
        let path = match config_file {
            Some(path) => Some(path),
            None => Self::default_config_path().ok().filter(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            anyhow::bail!("queue_capacity must be at least 1");
        }
        if self.max_attempts == Some(0) {
            anyhow::bail!("max_attempts must be at least 1 when set");
        }
        Ok(())
    }

    /// Display the current configuration as TOML
    pub fn display_as_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config as TOML")
    }

    /// Settings the console driver needs
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            max_attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.log.level, None);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = ConsoleConfig::from_toml_str(
            r#"
color = "never"

[log]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.log.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_rejects_zero_capacity_and_attempts() {
        assert!(ConsoleConfig::from_toml_str("queue_capacity = 0").is_err());
        assert!(ConsoleConfig::from_toml_str("max_attempts = 0").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConsoleConfig {
            color: ColorMode::Always,
            max_attempts: Some(3),
            ..Default::default()
        };
        let text = config.display_as_toml().unwrap();
        assert_eq!(ConsoleConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_color_mode_resolution() {
        assert!(ColorMode::Auto.resolve(true));
        assert!(!ColorMode::Auto.resolve(false));
        assert!(ColorMode::Always.resolve(false));
        assert!(!ColorMode::Never.resolve(true));
        assert_eq!("ALWAYS".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert!("sometimes".parse::<ColorMode>().is_err());
    }
}
