//! In-memory handler for tests and inspection

use crate::core::{Entry, Handler, Record, Result};
use parking_lot::Mutex;

/// Captures every entry it receives as a [`Record`], so captured entries
/// never keep the logger alive.
///
/// # Example
///
/// ```
/// use rust_slog::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryHandler::new());
/// let logger = Logger::new();
/// logger.register_handler(Level::Debug, Arc::clone(&memory));
///
/// logger.with_field("user", "tobi").info("signed in").unwrap();
///
/// let entries = memory.entries();
/// assert_eq!(entries[0].message(), "signed in");
/// assert_eq!(entries[0].field("user").and_then(FieldValue::as_str), Some("tobi"));
/// ```
#[derive(Default)]
pub struct MemoryHandler {
    entries: Mutex<Vec<Record>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured entries, oldest first
    pub fn entries(&self) -> Vec<Record> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn handle(&self, entry: &Entry) -> Result<()> {
        self.entries.lock().push(entry.record());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Level, Logger};
    use std::sync::Arc;

    #[test]
    fn test_captures_in_order() {
        let memory = Arc::new(MemoryHandler::new());
        let logger = Logger::new();
        logger.register_handler(Level::Debug, Arc::clone(&memory));

        logger.debug("one").unwrap();
        logger.warn("two").unwrap();

        let entries = memory.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message(), "one");
        assert_eq!(entries[1].level(), Level::Warn);
    }

    #[test]
    fn test_clear() {
        let memory = Arc::new(MemoryHandler::new());
        let logger = Logger::new();
        logger.register_handler(Level::Debug, Arc::clone(&memory));

        logger.info("x").unwrap();
        assert_eq!(memory.len(), 1);

        memory.clear();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_captured_entries_release_logger() {
        let memory = Arc::new(MemoryHandler::new());
        let logger = Logger::new();
        logger.register_handler(Level::Debug, Arc::clone(&memory));

        logger.with_field("k", "v").info("kept").unwrap();
        drop(logger);

        assert_eq!(Arc::strong_count(&memory), 1);
        assert_eq!(memory.entries()[0].message(), "kept");
    }
}
