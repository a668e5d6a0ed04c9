//! Line-buffered writer that folds byte streams into log calls
//!
//! Bytes written to a [`LineWriter`] are buffered until a `\n` arrives; each
//! complete line (minus a trailing `\r`) becomes one log message at the
//! writer's level. [`LineWriter::close`] flushes a trailing partial line.
//! Closing is required for that final flush to be observed: a writer that is
//! only dropped still flushes, but any delivery error is reported on stderr
//! instead of being returned.
//!
//! Through [`io::Write`], bytes are consumed once `write` returns: a handler
//! failure is held back and returned by the next `flush` or `close`, so a
//! retrying caller never logs the same line twice.

use super::context::Context;
use super::entry::Entry;
use super::error::{LoggerError, Result};
use super::level::Level;
use parking_lot::Mutex;
use std::io;

#[derive(Default)]
struct WriterState {
    buffer: Vec<u8>,
    closed: bool,
    deferred: Option<LoggerError>,
}

/// A `Write` sink that logs one message per line.
///
/// Shareable between threads: `&LineWriter` also implements [`io::Write`].
/// Each `write` call appends under a single lock, so a line written in one
/// call is never torn. A line assembled from several calls (as `write!`
/// does, one call per formatted piece) can interleave with other threads;
/// format it first and write it with one `write_all`.
///
/// A writer at `Fatal` or `Panic` logs through the terminating methods,
/// except while the thread is already unwinding, when the tail is only
/// dispatched.
///
/// # Example
///
/// ```
/// use rust_slog::prelude::*;
/// use std::io::Write;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryHandler::new());
/// let logger = Logger::new();
/// logger.register_handler(Level::Info, Arc::clone(&memory));
///
/// let mut writer = logger.writer(Level::Info);
/// writer.write_all(b"first\nsec").unwrap();
/// writer.write_all(b"ond\nthird").unwrap();
/// writer.close().unwrap();
///
/// let messages: Vec<_> = memory.entries().iter().map(|e| e.message().to_string()).collect();
/// assert_eq!(messages, ["first", "second", "third"]);
/// ```
pub struct LineWriter {
    entry: Entry,
    level: Level,
    state: Mutex<WriterState>,
}

impl LineWriter {
    pub(crate) fn new(entry: Entry, level: Level) -> Self {
        Self {
            entry,
            level,
            state: Mutex::new(WriterState::default()),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Append `chunk` and log every line it completes.
    ///
    /// The chunk is consumed even when a handler fails; the error only
    /// reports that delivery of some line failed.
    pub fn write_chunk(&self, chunk: &[u8]) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoggerError::WriterClosed);
        }

        state.buffer.extend_from_slice(chunk);
        let lines = take_lines(&mut state.buffer);
        self.emit(lines, true)
    }

    /// Log any remaining complete lines, then the unterminated tail if
    /// there is one. Later writes fail with [`LoggerError::WriterClosed`];
    /// closing twice is a no-op.
    ///
    /// Returns a delivery failure held back from an earlier `write` if no
    /// `flush` has reported it yet.
    pub fn close(&self) -> Result<()> {
        self.finish(true)
    }

    fn finish(&self, terminate: bool) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;

        let mut lines = take_lines(&mut state.buffer);
        if !state.buffer.is_empty() {
            lines.push(line_text(&state.buffer));
        }
        state.buffer = Vec::new();
        let deferred = state.deferred.take();

        let result = self.emit(lines, terminate);
        match deferred {
            Some(e) => Err(e),
            None => result,
        }
    }

    /// Caller holds the state lock, which keeps lines from concurrent
    /// writers in buffer order.
    fn emit(&self, lines: Vec<String>, terminate: bool) -> Result<()> {
        let mut first_error = None;
        for line in lines {
            let result = if terminate {
                self.entry.log(self.level, line)
            } else {
                self.entry.dispatch(self.level, line)
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn defer(&self, err: LoggerError) {
        self.state.lock().deferred.get_or_insert(err);
    }
}

/// Drain every `\n`-terminated line from the front of `buffer`.
fn take_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut consumed = 0;

    while let Some(pos) = buffer[consumed..].iter().position(|&b| b == b'\n') {
        let end = consumed + pos;
        lines.push(line_text(&buffer[consumed..end]));
        consumed = end + 1;
    }

    buffer.drain(..consumed);
    lines
}

fn line_text(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}

impl io::Write for &LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_chunk(buf) {
            Ok(()) => Ok(buf.len()),
            Err(LoggerError::WriterClosed) => Err(LoggerError::WriterClosed.into()),
            Err(e) => {
                self.defer(e);
                Ok(buf.len())
            }
        }
    }

    /// Partial lines stay buffered until a newline or `close`. Reports a
    /// delivery failure held back from an earlier `write`.
    fn flush(&mut self) -> io::Result<()> {
        match self.state.lock().deferred.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        if let Err(e) = self.finish(!std::thread::panicking()) {
            eprintln!("[LOGGER ERROR] Line writer flush on drop failed: {}", e);
        }
    }
}
