//! Main logger implementation

use super::{
    context::Context,
    entry::Entry,
    error::{LoggerError, Result},
    handler::Handler,
    level::Level,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Clone)]
struct Registration {
    level: Level,
    handler: Arc<dyn Handler>,
}

struct Inner {
    /// Replaced wholesale on registration, so dispatch only holds the lock
    /// long enough to clone the `Arc`.
    registrations: RwLock<Arc<[Registration]>>,
    metrics: LoggerMetrics,
}

/// Owner of the handler registry and the fan-out dispatcher.
///
/// Cloning is cheap and every clone shares the same registrations and
/// metrics. Entries keep a clone to re-enter dispatch.
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
/// logger.debug("uploading").unwrap();
/// logger.info("upload complete").unwrap();
///
/// assert_eq!(memory.len(), 1);
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                registrations: RwLock::new(Arc::from(Vec::new())),
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    /// Register `handler` to receive entries at `level` and every quieter
    /// level. Registration belongs to setup; entries already in flight keep
    /// the registrations they started with.
    pub fn register_handler<H: Handler + 'static>(&self, level: Level, handler: H) -> &Self {
        let registration = Registration {
            level,
            handler: Arc::new(handler),
        };

        let mut registrations = self.inner.registrations.write();
        let mut updated = registrations.to_vec();
        updated.push(registration);
        *registrations = Arc::from(updated);
        drop(registrations);

        self
    }

    pub fn handler_count(&self) -> usize {
        self.inner.registrations.read().len()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_slog::prelude::*;
    ///
    /// let logger = Logger::new();
    /// logger.register_handler(Level::Debug, DiscardHandler::new());
    /// logger.info("hello").unwrap();
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.dispatched(), 1);
    /// assert_eq!(metrics.delivered(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Hand `entry` to every handler whose threshold allows its level, in
    /// registration order.
    ///
    /// A failing or panicking handler does not stop the rest; the first
    /// failure is returned once all of them have run.
    pub(crate) fn dispatch(&self, entry: &Entry) -> Result<()> {
        let registrations = Arc::clone(&self.inner.registrations.read());
        let metrics = &self.inner.metrics;
        metrics.record_dispatched();

        let mut first_error = None;

        for registration in registrations.iter() {
            if !registration.level.allows(entry.level()) {
                continue;
            }

            let handler = &registration.handler;
            let outcome = catch_unwind(AssertUnwindSafe(|| handler.handle(entry)))
                .unwrap_or_else(|panic| {
                    Err(LoggerError::handler_panicked(
                        handler.name(),
                        panic_message(panic.as_ref()),
                    ))
                });

            match outcome {
                Ok(()) => {
                    metrics.record_delivered();
                }
                Err(e) => {
                    metrics.record_failed();
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Context for Logger {
    fn entry(&self) -> Entry {
        Entry::new(self)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registrations = self.inner.registrations.read();
        f.debug_struct("Logger")
            .field(
                "handlers",
                &registrations
                    .iter()
                    .map(|r| (r.level, r.handler.name()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_slog::prelude::*;
///
/// let logger = Logger::builder()
///     .handler(Level::Debug, DiscardHandler::new())
///     .handler(Level::Warn, MemoryHandler::new())
///     .build();
///
/// assert_eq!(logger.handler_count(), 2);
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    registrations: Vec<Registration>,
}

impl LoggerBuilder {
    /// Create a new builder with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler at the given verbosity threshold
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, level: Level, handler: H) -> Self {
        self.registrations.push(Registration {
            level,
            handler: Arc::new(handler),
        });
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new();
        *logger.inner.registrations.write() = Arc::from(self.registrations);
        logger
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
