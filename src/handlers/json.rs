//! JSON lines handler

use crate::core::{Entry, Fields, Handler, Level, Result, TimestampFormat};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct Record<'a> {
    fields: &'a Fields,
    level: Level,
    time: serde_json::Value,
    msg: &'a str,
}

/// Writes one JSON object per entry, newline terminated:
///
/// ```text
/// {"fields":{"file":"sloth.png"},"level":"info","time":"2025-01-08T10:30:45.123Z","msg":"upload"}
/// ```
///
/// Durations are encoded as their display text (`"1.5s"`) and errors as
/// their text.
///
/// # Example
///
/// ```
/// use rust_slog::prelude::*;
///
/// let logger = Logger::builder()
///     .handler(Level::Info, JsonHandler::new(Vec::new()))
///     .build();
/// logger.with_field("file", "sloth.png").info("upload").unwrap();
/// ```
pub struct JsonHandler<W> {
    writer: Mutex<W>,
    timestamp_format: TimestampFormat,
}

impl JsonHandler<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format; epoch formats are written as numbers
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Consume the handler and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        let record = Record {
            fields: entry.fields(),
            level: entry.level(),
            time: self.timestamp_format.json_value(&entry.time()),
            msg: entry.message(),
        };

        // encode before locking so a serialization failure writes nothing
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
