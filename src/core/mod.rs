//! Core logger types and traits

pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod fields;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod trace;
pub mod writer;

pub use config::{LoggerConfig, OutputFormat, Target};
pub use context::{Context, FATAL_EXIT_CODE};
pub use entry::{Entry, Record};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fielder, Fields, DURATION_KEY, ERROR_KEY};
pub use handler::{Handler, HandlerFn};
pub use level::{Level, LevelMap};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
pub use trace::{Trace, PANICKED};
pub use writer::LineWriter;
