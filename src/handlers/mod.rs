//! Handler implementations
//!
//! Every handler here serializes its own output, so one instance can be
//! registered on a logger shared between threads.

pub mod auto;
#[cfg(feature = "console")]
pub mod cli;
pub mod discard;
pub mod json;
pub mod logfmt;
pub mod memory;
#[cfg(feature = "console")]
pub mod text;

pub use auto::AutoHandler;
#[cfg(feature = "console")]
pub use cli::CliHandler;
pub use discard::DiscardHandler;
pub use json::JsonHandler;
pub use logfmt::LogfmtHandler;
pub use memory::MemoryHandler;
#[cfg(feature = "console")]
pub use text::TextHandler;

pub use crate::core::Handler;

#[cfg(feature = "console")]
use crate::core::{Entry, Level, LevelMap};
#[cfg(feature = "console")]
use colored::{Color, Colorize};

#[cfg(feature = "console")]
pub(crate) const COLORS: LevelMap<Color> = LevelMap::new([
    Color::Red,
    Color::Red,
    Color::Red,
    Color::Yellow,
    Color::Blue,
    Color::White,
]);

/// Append ` key=value` for every field, keys in sorted order.
#[cfg(feature = "console")]
pub(crate) fn write_colored_fields(out: &mut String, entry: &Entry, color: Option<Color>) {
    use std::fmt::Write;

    for (key, value) in entry.fields() {
        let _ = match color {
            Some(color) => write!(out, " {}={}", key.color(color), value),
            None => write!(out, " {}={}", key, value),
        };
    }
}

#[cfg(feature = "console")]
pub(crate) fn paint(text: String, level: Level, use_colors: bool) -> String {
    if use_colors {
        text.color(COLORS[level]).to_string()
    } else {
        text
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    /// Cloneable in-memory sink for asserting handler output
    #[derive(Clone, Default)]
    pub struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
