//! logfmt handler

use crate::core::{Entry, FieldValue, Handler, Result, TimestampFormat};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Writes `key=value` records, one per line:
///
/// ```text
/// time=2025-01-08T10:30:45.123Z level=info message=upload file=sloth.png
/// ```
///
/// Values containing spaces, quotes, `=` or control characters are quoted.
/// Key characters other than alphanumerics, `_`, `-` and `.` are
/// percent-encoded as UTF-8 bytes, so distinct keys stay distinct. An empty
/// key is written as `""`.
pub struct LogfmtHandler<W> {
    writer: Mutex<W>,
    timestamp_format: TimestampFormat,
}

impl LogfmtHandler<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LogfmtHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_entry(&self, entry: &Entry) -> String {
        let mut parts = Vec::with_capacity(3 + entry.fields().len());

        parts.push(format!(
            "time={}",
            escape_value(&self.timestamp_format.format(&entry.time()))
        ));
        parts.push(format!("level={}", entry.level()));
        parts.push(format!("message={}", escape_value(entry.message())));

        for (key, value) in entry.fields() {
            let value = match value {
                FieldValue::String(s) | FieldValue::Error(s) => escape_value(s),
                other => escape_value(&other.to_string()),
            };
            parts.push(format!("{}={}", escape_key(key), value));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }
}

impl<W: Write + Send> Handler for LogfmtHandler<W> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        let line = self.format_entry(entry);
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}

fn escape_key(key: &str) -> String {
    if key.is_empty() {
        return "\"\"".to_string();
    }

    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
            escaped.push(c);
        } else {
            let mut utf8 = [0u8; 4];
            for byte in c.encode_utf8(&mut utf8).bytes() {
                escaped.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    escaped
}

fn escape_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control());

    if needs_quotes {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Level, Logger};
    use crate::handlers::test_support::Buffer;

    fn logfmt_logger() -> (Logger, Buffer) {
        let buffer = Buffer::default();
        let handler = LogfmtHandler::new(buffer.clone()).with_timestamp_format(TimestampFormat::Unix);
        let logger = Logger::builder().handler(Level::Debug, handler).build();
        (logger, buffer)
    }

    #[test]
    fn test_record_layout() {
        let (logger, buffer) = logfmt_logger();

        logger
            .with_field("user", "tobi")
            .with_field("count", 5)
            .warn("upload")
            .unwrap();

        let output = buffer.contents();
        assert!(output.starts_with("time="));
        assert!(output.ends_with(" level=warn message=upload count=5 user=tobi\n"));
    }

    #[test]
    fn test_values_quoted_when_needed() {
        let (logger, buffer) = logfmt_logger();

        logger
            .with_field("query", "SELECT * FROM users WHERE id=1")
            .with_field("empty", "")
            .info("query executed")
            .unwrap();

        let output = buffer.contents();
        assert!(output.contains("message=\"query executed\""));
        assert!(output.contains("query=\"SELECT * FROM users WHERE id=1\""));
        assert!(output.contains("empty=\"\""));
    }

    #[test]
    fn test_unusual_keys_stay_distinct() {
        let (logger, buffer) = logfmt_logger();

        logger
            .with_field("a b", 1)
            .with_field("a=b", 2)
            .with_field("=", 3)
            .with_field("", 4)
            .info("keys")
            .unwrap();

        let output = buffer.contents();
        assert!(output.contains(" a%20b=1"));
        assert!(output.contains(" a%3Db=2"));
        assert!(output.contains(" %3D=3"));
        assert!(output.contains(" \"\"=4"));
        assert!(!output.contains(" ="));
    }

    #[test]
    fn test_escape_helpers() {
        assert_eq!(escape_key("request.id"), "request.id");
        assert_eq!(escape_key("bad key=\""), "bad%20key%3D%22");
        assert_eq!(escape_key("%"), "%25");
        assert_eq!(escape_value("plain"), "plain");
        assert_eq!(escape_value("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(escape_value("two\nlines"), "\"two\\nlines\"");
    }
}
