//! Visualizer configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! | Layer | Source |
//! |-------|--------|
//! | defaults | [`VisualizerConfig::default`] |
//! | file | `--config <FILE>`, TOML |
//! | flags | `--delay-ms`, `--no-color`, `--format` |
//!
//! ```toml
//! delay_ms = 1200
//! color = false
//! format = "json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a trace is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One table row per record.
    #[default]
    Table,
    /// The whole trace as a single JSON document.
    Json,
}

/// Settings shared by every visualizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Pause after each table row, in milliseconds.
    pub delay_ms: u64,
    /// Color operations with ANSI escapes.
    pub color: bool,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl VisualizerConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML, a wrongly typed value, or an
    /// unknown key.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded visualizer config");
        Ok(config)
    }

    /// Applies command-line overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(delay_ms) = overrides.delay_ms {
            self.delay_ms = delay_ms;
        }
        if overrides.no_color {
            self.color = false;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }

    /// The per-record pause.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Values given on the command line; `None`/`false` leaves the setting alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--delay-ms`
    pub delay_ms: Option<u64>,
    /// `--no-color`
    pub no_color: bool,
    /// `--format`
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.delay_ms, 0);
        assert!(config.color);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.delay(), Duration::ZERO);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = VisualizerConfig::from_toml_str("delay_ms = 1200\n").unwrap();
        assert_eq!(config.delay_ms, 1200);
        assert!(config.color);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_full_file() {
        let config =
            VisualizerConfig::from_toml_str("delay_ms = 5\ncolor = false\nformat = \"json\"\n")
                .unwrap();
        assert_eq!(
            config,
            VisualizerConfig {
                delay_ms: 5,
                color: false,
                format: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_format() {
        assert!(matches!(
            VisualizerConfig::from_toml_str("speed = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(VisualizerConfig::from_toml_str("format = \"html\"").is_err());
        assert!(VisualizerConfig::from_toml_str("delay_ms = -1").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = VisualizerConfig::load(Path::new("/nonexistent/regtrace.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("regtrace.toml"));
    }

    #[test]
    fn test_flags_override_file() {
        let file = VisualizerConfig::from_toml_str("delay_ms = 1100\nformat = \"json\"").unwrap();
        let config = file.clone().with_overrides(&Overrides {
            delay_ms: Some(0),
            no_color: true,
            format: None,
        });
        assert_eq!(config.delay_ms, 0);
        assert!(!config.color);
        assert_eq!(config.format, OutputFormat::Json);

        assert_eq!(file.clone().with_overrides(&Overrides::default()), file);
    }
}
