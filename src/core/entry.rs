//! Log entry structure
//!
//! An [`Entry`] is both the chainable context callers build up and the
//! record handlers receive. Chaining never mutates: every `with_*` call
//! returns a new entry whose fields are the parent's plus the new keys, so
//! one base context can be extended from many threads at once.
//!
//! A [`Record`] is the same data without the logger, for handlers that keep
//! entries after `handle` returns.

use super::context::Context;
use super::error::Result;
use super::fields::{FieldValue, Fields};
use super::level::Level;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Entry {
    logger: Logger,
    fields: Arc<Fields>,
    level: Level,
    message: String,
    timestamp: DateTime<Utc>,
}

impl Entry {
    /// Create an empty context bound to `logger`
    pub fn new(logger: &Logger) -> Self {
        Self {
            logger: logger.clone(),
            fields: Arc::new(Fields::new()),
            level: Level::Info,
            message: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Shorthand for `self.fields().get(key)`
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Copy-on-extend: a new entry with `extra` overlaid on this entry's
    /// fields. An empty overlay shares the parent's map.
    pub(crate) fn extend(&self, extra: Fields) -> Entry {
        let fields = if extra.is_empty() {
            Arc::clone(&self.fields)
        } else {
            let mut merged = Fields::clone(&self.fields);
            merged.merge(extra);
            Arc::new(merged)
        };

        Entry {
            logger: self.logger.clone(),
            fields,
            level: self.level,
            message: self.message.clone(),
            timestamp: self.timestamp,
        }
    }

    /// Finalize a copy of this context with a level, message and timestamp
    fn finish(&self, level: Level, message: String) -> Entry {
        Entry {
            logger: self.logger.clone(),
            fields: Arc::clone(&self.fields),
            level,
            message,
            timestamp: Utc::now(),
        }
    }

    /// Finalize and hand to the owning logger. Never terminates the process;
    /// `Context::fatal`/`Context::panic` layer that on top.
    pub(crate) fn dispatch(&self, level: Level, message: String) -> Result<()> {
        let entry = self.finish(level, message);
        self.logger.dispatch(&entry)
    }

    /// Detach from the logger. Shares the field map.
    pub fn record(&self) -> Record {
        Record {
            fields: Arc::clone(&self.fields),
            level: self.level,
            message: self.message.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// A dispatched entry without its logger.
///
/// Holding a `Record` never keeps a logger (or its handlers) alive.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Arc<Fields>,
    level: Level,
    message: String,
    timestamp: DateTime<Utc>,
}

impl Record {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

impl From<&Entry> for Record {
    fn from(entry: &Entry) -> Self {
        entry.record()
    }
}

impl Context for Entry {
    fn entry(&self) -> Entry {
        self.clone()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("timestamp", &self.timestamp)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Entry", 4)?;
        state.serialize_field("fields", &*self.fields)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}
