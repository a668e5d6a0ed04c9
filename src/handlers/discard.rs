//! Handler that drops everything

use crate::core::{Entry, Handler, Result};

/// Accepts and ignores every entry. Useful for benchmarking dispatch and
/// for silencing a logger without removing its call sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardHandler;

impl DiscardHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for DiscardHandler {
    #[inline]
    fn handle(&self, _entry: &Entry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}
