//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes any [`Context`](crate::Context) (a logger or an entry
//! carrying fields) followed by `format!` arguments, and returns what the
//! matching method returns.
//!
//! # Examples
//!
//! ```
//! use rust_slog::prelude::*;
//! use rust_slog::{fields, info, warn};
//!
//! let logger = Logger::builder().handler(Level::Info, DiscardHandler::new()).build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port).unwrap();
//!
//! let request = logger.with_fields(fields! { "method" => "GET", "path" => "/" });
//! warn!(request, "slow response: {}ms", 950).unwrap();
//! ```

/// Log at a runtime-chosen level.
///
/// ```
/// # use rust_slog::prelude::*;
/// # let logger = Logger::new();
/// use rust_slog::log;
/// log!(logger, Level::Info, "simple message").unwrap();
/// log!(&logger, Level::Error, "error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($ctx:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Context as _;
        $ctx.log($level, format!($($arg)+))
    }};
}

#[macro_export]
macro_rules! debug {
    ($ctx:expr, $($arg:tt)+) => {{
        use $crate::Context as _;
        $ctx.debug(format!($($arg)+))
    }};
}

#[macro_export]
macro_rules! info {
    ($ctx:expr, $($arg:tt)+) => {{
        use $crate::Context as _;
        $ctx.info(format!($($arg)+))
    }};
}

#[macro_export]
macro_rules! warn {
    ($ctx:expr, $($arg:tt)+) => {{
        use $crate::Context as _;
        $ctx.warn(format!($($arg)+))
    }};
}

#[macro_export]
macro_rules! error {
    ($ctx:expr, $($arg:tt)+) => {{
        use $crate::Context as _;
        $ctx.error(format!($($arg)+))
    }};
}

/// Log at `Fatal` and exit the process.
///
/// ```no_run
/// # use rust_slog::prelude::*;
/// # let logger = Logger::new();
/// use rust_slog::fatal;
/// fatal!(logger, "unable to recover: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($ctx:expr, $($arg:tt)+) => {{
        use $crate::Context as _;
        $ctx.fatal(format!($($arg)+))
    }};
}

/// Build [`Fields`](crate::Fields) from `key => value` pairs.
///
/// ```
/// use rust_slog::fields;
///
/// let fields = fields! { "user" => "tobi", "attempts" => 3 };
/// assert_eq!(fields.len(), 2);
/// assert!(fields!().is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with_field($key, $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::handlers::MemoryHandler;
    use crate::{Context, FieldValue, Level, Logger};
    use std::sync::Arc;

    fn capture() -> (Logger, Arc<MemoryHandler>) {
        let memory = Arc::new(MemoryHandler::new());
        let logger = Logger::new();
        logger.register_handler(Level::Debug, Arc::clone(&memory));
        (logger, memory)
    }

    #[test]
    fn test_level_macros() {
        let (logger, memory) = capture();

        debug!(logger, "debug {}", 1).unwrap();
        info!(logger, "info {}", 2).unwrap();
        warn!(logger, "warn {}", 3).unwrap();
        error!(logger, "error {}", 4).unwrap();

        let entries = memory.entries();
        let seen: Vec<_> = entries.iter().map(|e| (e.level(), e.message())).collect();
        assert_eq!(
            seen,
            [
                (Level::Debug, "debug 1"),
                (Level::Info, "info 2"),
                (Level::Warn, "warn 3"),
                (Level::Error, "error 4"),
            ]
        );
    }

    #[test]
    fn test_log_macro_with_reference() {
        let (logger, memory) = capture();
        let by_ref = &logger;

        log!(by_ref, Level::Warn, "value: {}", 42).unwrap();

        let entries = memory.entries();
        assert_eq!(entries[0].level(), Level::Warn);
        assert_eq!(entries[0].message(), "value: 42");
    }

    #[test]
    fn test_macros_on_entries() {
        let (logger, memory) = capture();
        let request = logger.with_fields(fields! { "method" => "GET", "status" => 200 });

        info!(request, "served {}", "/index").unwrap();

        let entries = memory.entries();
        assert_eq!(entries[0].field("status"), Some(&FieldValue::Int(200)));
        assert_eq!(entries[0].message(), "served /index");
    }

    #[test]
    fn test_fields_trailing_comma() {
        let fields = fields! {
            "a" => 1,
            "b" => true,
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("b"), Some(&FieldValue::Bool(true)));
    }
}
