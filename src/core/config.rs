//! Declarative logger configuration
//!
//! A [`LoggerConfig`] describes a single-handler logger and can be loaded
//! from JSON, so a program can pick its log format and threshold from a
//! config file without touching code.
//!
//! ```
//! use rust_slog::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{"level": "debug", "format": "json"}"#).unwrap();
//! let logger = config.build().unwrap();
//! assert_eq!(logger.handler_count(), 1);
//! ```

use super::error::Result;
use super::handler::Handler;
use super::level::Level;
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use crate::handlers::{AutoHandler, DiscardHandler, JsonHandler, LogfmtHandler};
#[cfg(feature = "console")]
use crate::handlers::{CliHandler, TextHandler};
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Cli,
    Json,
    Logfmt,
    /// Text on a terminal, JSON otherwise
    #[default]
    Auto,
    Discard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stderr,
    Stdout,
}

/// Settings for a logger with one handler. Missing keys take their
/// defaults: `info`, `auto`, `stderr`, RFC 3339 timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Verbosity threshold of the handler
    pub level: Level,
    pub format: OutputFormat,
    pub target: Target,
    /// Used by the `json` and `logfmt` formats
    pub timestamp_format: TimestampFormat,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build a logger with the configured handler registered at `level`
    pub fn build(&self) -> Result<Logger> {
        let handler = match self.target {
            Target::Stderr => {
                let stderr = io::stderr();
                let is_terminal = stderr.is_terminal();
                self.handler_for(stderr, is_terminal)?
            }
            Target::Stdout => {
                let stdout = io::stdout();
                let is_terminal = stdout.is_terminal();
                self.handler_for(stdout, is_terminal)?
            }
        };

        Ok(Logger::builder().handler(self.level, handler).build())
    }

    fn handler_for<W>(&self, writer: W, is_terminal: bool) -> Result<Box<dyn Handler>>
    where
        W: Write + Send + 'static,
    {
        let handler: Box<dyn Handler> = match self.format {
            #[cfg(feature = "console")]
            OutputFormat::Text => Box::new(TextHandler::new(writer)),
            #[cfg(feature = "console")]
            OutputFormat::Cli => Box::new(CliHandler::new(writer)),
            #[cfg(not(feature = "console"))]
            OutputFormat::Text | OutputFormat::Cli => {
                return Err(super::error::LoggerError::config(
                    "format",
                    "text and cli output require the `console` feature",
                ))
            }
            OutputFormat::Json => Box::new(
                JsonHandler::new(writer).with_timestamp_format(self.timestamp_format.clone()),
            ),
            OutputFormat::Logfmt => Box::new(
                LogfmtHandler::new(writer).with_timestamp_format(self.timestamp_format.clone()),
            ),
            OutputFormat::Auto => Box::new(AutoHandler::new(writer, is_terminal)),
            OutputFormat::Discard => Box::new(DiscardHandler::new()),
        };

        Ok(handler)
    }
}
