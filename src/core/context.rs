//! The logging API shared by [`Logger`] and [`Entry`]
//!
//! Anything that can produce a base [`Entry`] gets field chaining, the level
//! methods, timed traces and line writers for free. Code that only needs to
//! log can take `&impl Context` and accept either a logger or a context
//! already carrying fields.
//!
//! [`Logger`]: super::Logger

use super::entry::Entry;
use super::error::Result;
use super::fields::{FieldValue, Fielder, Fields, ERROR_KEY};
use super::level::Level;
use super::trace::Trace;
use super::writer::LineWriter;
use std::error::Error as StdError;

/// Exit status used by [`Context::fatal`]
pub const FATAL_EXIT_CODE: i32 = 1;

pub trait Context {
    /// The base entry new records are derived from
    fn entry(&self) -> Entry;

    fn with_field<K, V>(&self, key: K, value: V) -> Entry
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.entry().extend(Fields::new().with_field(key, value))
    }

    fn with_fields<F: Fielder>(&self, fielder: F) -> Entry {
        self.entry().extend(fielder.fields())
    }

    /// Attach `err` under the `error` key. `None` returns an equivalent
    /// context with no `error` field.
    fn with_error(&self, err: Option<&dyn StdError>) -> Entry {
        match err {
            Some(err) => self
                .entry()
                .extend(Fields::new().with_field(ERROR_KEY, FieldValue::error(err))),
            None => self.entry(),
        }
    }

    fn debug(&self, msg: impl Into<String>) -> Result<()> {
        self.entry().dispatch(Level::Debug, msg.into())
    }

    fn info(&self, msg: impl Into<String>) -> Result<()> {
        self.entry().dispatch(Level::Info, msg.into())
    }

    fn warn(&self, msg: impl Into<String>) -> Result<()> {
        self.entry().dispatch(Level::Warn, msg.into())
    }

    fn error(&self, msg: impl Into<String>) -> Result<()> {
        self.entry().dispatch(Level::Error, msg.into())
    }

    /// Dispatch at `Fatal`, then exit the process with a non-zero status.
    fn fatal(&self, msg: impl Into<String>) -> ! {
        if let Err(e) = self.entry().dispatch(Level::Fatal, msg.into()) {
            eprintln!("[LOGGER ERROR] Fatal entry not fully delivered: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Dispatch at `Panic`, then panic with the message.
    fn panic(&self, msg: impl Into<String>) -> ! {
        let msg = msg.into();
        if let Err(e) = self.entry().dispatch(Level::Panic, msg.clone()) {
            eprintln!("[LOGGER ERROR] Panic entry not fully delivered: {}", e);
        }
        panic!("{}", msg)
    }

    /// Log at a runtime-chosen level, routing `Fatal` and `Panic` through
    /// their terminating methods.
    fn log(&self, level: Level, msg: impl Into<String>) -> Result<()> {
        match level {
            Level::Panic => self.panic(msg),
            Level::Fatal => self.fatal(msg),
            _ => self.entry().dispatch(level, msg.into()),
        }
    }

    /// Emit a start entry now and return a handle that emits the matching
    /// completion entry when stopped or dropped.
    /// Neither entry terminates the process, even at `Fatal` or `Panic`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_slog::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let memory = Arc::new(MemoryHandler::new());
    /// let logger = Logger::new();
    /// logger.register_handler(Level::Info, Arc::clone(&memory));
    ///
    /// let trace = logger.with_field("file", "sloth.png").trace(Level::Info, "upload");
    /// trace.stop(None).unwrap();
    ///
    /// let entries = memory.entries();
    /// assert_eq!(entries.len(), 2);
    /// assert!(entries[1].field("duration").is_some());
    /// ```
    fn trace(&self, level: Level, msg: impl Into<String>) -> Trace {
        Trace::start(self.entry(), level, msg.into())
    }

    /// Run `f` inside a trace, stopping it with `f`'s error if it fails.
    fn traced<T, E, F>(
        &self,
        level: Level,
        msg: impl Into<String>,
        f: F,
    ) -> std::result::Result<T, E>
    where
        E: StdError,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let trace = self.trace(level, msg);
        let outcome = f();
        let err = outcome.as_ref().err().map(|e| e as &dyn StdError);
        if let Err(e) = trace.stop(err) {
            eprintln!("[LOGGER ERROR] Trace completion not fully delivered: {}", e);
        }
        outcome
    }

    /// A writer that logs each complete line written to it at `level`.
    /// Close it (or drop it) to flush a trailing partial line.
    fn writer(&self, level: Level) -> LineWriter {
        LineWriter::new(self.entry(), level)
    }
}
