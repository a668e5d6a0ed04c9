//! Handler trait for log output destinations

use super::{entry::Entry, error::Result};
use std::fmt;
use std::sync::Arc;

/// A sink that consumes finalized entries.
///
/// Handlers are shared between every thread logging through a [`Logger`],
/// so `handle` takes `&self`; implementations serialize their own output.
///
/// [`Logger`]: super::Logger
pub trait Handler: Send + Sync {
    fn handle(&self, entry: &Entry) -> Result<()>;

    fn name(&self) -> &str {
        "handler"
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        (**self).handle(entry)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        (**self).handle(entry)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapter that lets a closure act as a [`Handler`].
///
/// # Example
///
/// ```
/// use rust_slog::prelude::*;
///
/// let logger = Logger::new();
/// logger.register_handler(
///     Level::Info,
///     HandlerFn::new(|entry: &Entry| {
///         assert_eq!(entry.message(), "hello");
///         Ok(())
///     }),
/// );
/// logger.info("hello").unwrap();
/// ```
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&Entry) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Entry) -> Result<()> + Send + Sync,
{
    fn handle(&self, entry: &Entry) -> Result<()> {
        (self.f)(entry)
    }

    fn name(&self) -> &str {
        "fn"
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}
