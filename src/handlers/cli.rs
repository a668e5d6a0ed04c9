//! Compact colored handler for command-line tools

use super::{paint, write_colored_fields, COLORS};
use crate::core::{Entry, Handler, LevelMap, Result};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Default number of columns before the level symbol
pub const DEFAULT_PADDING: usize = 3;

const SYMBOLS: LevelMap<&str> = LevelMap::new(["⨯", "⨯", "⨯", "•", "•", "•"]);

/// Symbol-prefixed output suited to CLI programs: a `•` for routine levels
/// and a `⨯` for failures, followed by the padded message and fields.
///
/// ```text
///    • upload complete           file=sloth.png
///    ⨯ upload failed             error=timeout
/// ```
pub struct CliHandler<W> {
    writer: Mutex<W>,
    padding: usize,
    use_colors: bool,
}

impl CliHandler<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> CliHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            padding: DEFAULT_PADDING,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_entry(&self, entry: &Entry) -> String {
        let level = entry.level();
        let symbol = format!("{:>width$}", SYMBOLS[level], width = self.padding + 1);

        let mut line = format!(
            "{} {:<25}",
            paint(symbol, level, self.use_colors),
            entry.message()
        );
        write_colored_fields(&mut line, entry, self.use_colors.then(|| COLORS[level]));
        line.push('\n');
        line
    }
}

impl<W: Write + Send> Handler for CliHandler<W> {
    fn handle(&self, entry: &Entry) -> Result<()> {
        let line = self.format_entry(entry);
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "cli"
    }
}
