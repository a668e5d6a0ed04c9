//! Timed operations
//!
//! A [`Trace`] logs a start entry when created and a completion entry, with
//! the elapsed `duration`, when stopped. Completion is guaranteed: a trace
//! that goes out of scope without [`Trace::stop`] stops itself, including
//! during unwinding.
//!
//! Trace entries are only dispatched. A trace at `Fatal` or `Panic` logs at
//! that level but never exits or panics, so the guarded operation always
//! runs and always gets its completion entry.

use super::context::Context;
use super::entry::Entry;
use super::error::{LoggerError, Result};
use super::fields::{FieldValue, DURATION_KEY, ERROR_KEY};
use super::level::Level;
use std::error::Error as StdError;
use std::time::{Duration, Instant};

/// Error text recorded when a trace is dropped while its thread unwinds
pub const PANICKED: &str = "panicked";

#[must_use = "a trace logs its completion when stopped or dropped"]
pub struct Trace {
    base: Entry,
    level: Level,
    message: String,
    start: Instant,
    start_error: Option<LoggerError>,
    stopped: bool,
}

impl Trace {
    pub(crate) fn start(base: Entry, level: Level, message: String) -> Self {
        let start_error = base.dispatch(level, message.clone()).err();

        Self {
            base,
            level,
            message,
            start: Instant::now(),
            start_error,
            stopped: false,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log the completion entry.
    ///
    /// With `Some(err)` the entry is promoted to `Error` and carries the
    /// error text; with `None` it keeps the trace's level. Either way it
    /// carries `duration`. Returns the first delivery failure of the start
    /// or completion entry.
    pub fn stop(mut self, err: Option<&dyn StdError>) -> Result<()> {
        self.complete(err)
    }

    fn complete(&mut self, err: Option<&dyn StdError>) -> Result<()> {
        self.stopped = true;
        let done = self.base.with_field(DURATION_KEY, self.start.elapsed());

        let result = match err {
            Some(err) => done
                .with_error(Some(err))
                .dispatch(Level::Error, self.message.clone()),
            None => done.dispatch(self.level, self.message.clone()),
        };

        match self.start_error.take() {
            Some(e) => Err(e),
            None => result,
        }
    }

    fn complete_unwinding(&mut self) -> Result<()> {
        self.stopped = true;
        self.base
            .with_field(DURATION_KEY, self.start.elapsed())
            .with_field(ERROR_KEY, FieldValue::Error(PANICKED.to_string()))
            .dispatch(Level::Error, self.message.clone())
    }
}

impl Drop for Trace {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }

        let result = if std::thread::panicking() {
            self.complete_unwinding()
        } else {
            self.complete(None)
        };

        if let Err(e) = result {
            eprintln!("[LOGGER ERROR] Trace completion not fully delivered: {}", e);
        }
    }
}
