//! Timestamp rendering for machine-readable handlers
//!
//! [`JsonHandler`](crate::handlers::JsonHandler) and
//! [`LogfmtHandler`](crate::handlers::LogfmtHandler) render entry times with a
//! configurable [`TimestampFormat`]. Numeric formats stay numbers in JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How an entry's time is written
///
/// # Examples
///
/// ```
/// use rust_slog::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&time), "2025-01-08T10:30:45Z");
/// assert_eq!(TimestampFormat::Unix.format(&time), "1736332245");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// RFC 3339 in UTC with as many fractional digits as needed:
    /// `2025-01-08T10:30:45.123456789Z`
    #[default]
    Rfc3339,

    /// Fixed millisecond precision: `2025-01-08T10:30:45.123Z`
    Iso8601Millis,

    /// Seconds since the Unix epoch
    Unix,

    /// Milliseconds since the Unix epoch
    UnixMillis,

    /// Microseconds since the Unix epoch
    UnixMicros,

    /// Any strftime-compatible pattern, e.g. `%d/%b/%Y:%H:%M:%S %z`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, time: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339 => time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            TimestampFormat::Iso8601Millis => time.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Unix => time.timestamp().to_string(),
            TimestampFormat::UnixMillis => time.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => time.timestamp_micros().to_string(),
            TimestampFormat::Custom(pattern) => time.format(pattern).to_string(),
        }
    }

    /// The time as a JSON value: a number for the epoch formats, a string
    /// otherwise.
    #[must_use]
    pub fn json_value(&self, time: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => time.timestamp().into(),
            TimestampFormat::UnixMillis => time.timestamp_millis().into(),
            TimestampFormat::UnixMicros => time.timestamp_micros().into(),
            _ => serde_json::Value::String(self.format(time)),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}
