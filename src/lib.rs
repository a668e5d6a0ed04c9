//! # Rust Slog
//!
//! Structured logging built around chainable field contexts and a fan-out
//! dispatcher.
//!
//! ## Features
//!
//! - **Field Contexts**: `with_field` / `with_fields` / `with_error` return
//!   immutable entries that can be shared and extended freely
//! - **Per-Level Handlers**: every handler registers with its own verbosity
//!   threshold and failures in one never block the others
//! - **Timed Traces**: start and completion entries with the elapsed duration
//! - **Line Writer**: adapt any `std::io::Write` producer into log lines
//! - **Handlers**: text, CLI, JSON, logfmt, auto-detecting, memory and discard
//!
//! ```
//! use rust_slog::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryHandler::new());
//! let logger = Logger::builder()
//!     .handler(Level::Info, Arc::clone(&memory))
//!     .build();
//!
//! let ctx = logger.with_field("user", "tobi");
//! ctx.info("signed in").unwrap();
//! ctx.with_field("file", "sloth.png").debug("too verbose").unwrap();
//!
//! assert_eq!(memory.len(), 1);
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::handlers::{CliHandler, TextHandler};
    pub use crate::handlers::{
        AutoHandler, DiscardHandler, JsonHandler, LogfmtHandler, MemoryHandler,
    };
    pub use crate::core::{
        Context, Entry, FieldValue, Fielder, Fields, Handler, HandlerFn, Level, LevelMap,
        LineWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        OutputFormat, Record, Result, Target, TimestampFormat, Trace, DURATION_KEY,
        ERROR_KEY,
    };
}

pub use crate::core::{
    Context, Entry, FieldValue, Fielder, Fields, Handler, HandlerFn, Level, LevelMap, LineWriter,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Record,
    Result, Target, TimestampFormat, Trace, DURATION_KEY, ERROR_KEY, FATAL_EXIT_CODE, PANICKED,
};
