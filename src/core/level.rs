//! Log level definitions
//!
//! Levels are ordered by *verbosity*: `Panic` is the quietest and numerically
//! smallest, `Debug` the most verbose. A handler threshold is therefore a
//! maximum verbosity, not a minimum severity: a handler registered at
//! `Info` receives `Info` and everything quieter.

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    Panic = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
}

impl Level {
    /// Every level, quietest first.
    pub const ALL: [Level; 6] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Upper-case label used by the textual handlers
    pub fn label(&self) -> &'static str {
        match self {
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    pub fn as_i64(&self) -> i64 {
        *self as i64
    }

    /// Convert a raw integer level, clamping into `[Panic, Debug]`.
    pub fn from_i64(value: i64) -> Self {
        match value {
            i64::MIN..=0 => Level::Panic,
            1 => Level::Fatal,
            2 => Level::Error,
            3 => Level::Warn,
            4 => Level::Info,
            _ => Level::Debug,
        }
    }

    /// Whether a handler registered at `self` receives entries at `level`.
    #[inline]
    pub fn allows(&self, level: Level) -> bool {
        level <= *self
    }

    /// Lenient, total parse.
    ///
    /// Empty input yields `default`. Numeric input is clamped. Otherwise the
    /// first character (case-insensitive) selects the level from
    /// `d`, `i`, `w`, `e`, `f`, `p`; anything else yields `default`.
    ///
    /// ```
    /// use rust_slog::Level;
    ///
    /// assert_eq!(Level::parse("info", Level::Warn), Level::Info);
    /// assert_eq!(Level::parse("", Level::Warn), Level::Warn);
    /// assert_eq!(Level::parse("42", Level::Warn), Level::Debug);
    /// assert_eq!(Level::parse("bogus", Level::Warn), Level::Warn);
    /// ```
    pub fn parse(s: &str, default: Level) -> Level {
        Self::try_parse(s).unwrap_or(default)
    }

    fn try_parse(s: &str) -> Option<Level> {
        if s.is_empty() {
            return None;
        }

        if let Ok(value) = s.parse::<i64>() {
            return Some(Self::from_i64(value));
        }

        let first = s.chars().next()?.to_lowercase().next()?;
        match first {
            'd' => Some(Level::Debug),
            'i' => Some(Level::Info),
            'w' => Some(Level::Warn),
            'e' => Some(Level::Error),
            'f' => Some(Level::Fatal),
            'p' => Some(Level::Panic),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: the same grammar as [`Level::parse`], but unmatched or
/// empty input is an error instead of a fallback.
impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s).ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.as_i64()
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed-size table keyed by [`Level`].
///
/// Every level has a slot, so lookups can never go out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelMap<T>([T; 6]);

impl<T> LevelMap<T> {
    /// Build a table from values listed quietest first (`Panic` .. `Debug`).
    pub const fn new(values: [T; 6]) -> Self {
        Self(values)
    }

    pub fn from_fn(f: impl FnMut(Level) -> T) -> Self {
        Self(Level::ALL.map(f))
    }

    pub fn get(&self, level: Level) -> &T {
        &self.0[level as usize]
    }
}

impl<T> Index<Level> for LevelMap<T> {
    type Output = T;

    fn index(&self, level: Level) -> &T {
        self.get(level)
    }
}

impl<T> IndexMut<Level> for LevelMap<T> {
    fn index_mut(&mut self, level: Level) -> &mut T {
        &mut self.0[level as usize]
    }
}
