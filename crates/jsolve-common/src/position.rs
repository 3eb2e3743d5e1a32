//! Line/column positions for source locations.
//!
//! Nodes carry byte offsets; a [`LineMap`] converts those offsets into
//! zero-based [`Position`]s, and [`SourceLocation`] renders the one-based
//! `path:line:col` form used in error messages.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A zero-based line/character position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Line start offsets for a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build the line map of `text`. `\r\n`, `\r` and `\n` all end a line.
    pub fn build(text: &str) -> Self {
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push(i as u32 + 1);
                }
                b'\n' => line_starts.push(i as u32 + 1),
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    /// Number of lines known to this map (at least one).
    pub fn line_count(&self) -> usize {
        self.line_starts.len().max(1)
    }

    /// Convert a byte offset into a zero-based position.
    ///
    /// An empty map (no source text) places everything on the first line.
    pub fn position_of(&self, offset: u32) -> Position {
        if self.line_starts.is_empty() {
            return Position::new(0, offset);
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line as u32, offset - self.line_starts[line])
    }
}

/// A one-based `path:line:col` location.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub path: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(path: impl Into<Arc<str>>, position: Position) -> Self {
        Self {
            path: path.into(),
            line: position.line + 1,
            column: position.character + 1,
        }
    }

    /// Location used when a failure has no syntactic anchor, e.g. a lookup
    /// triggered from a compiled class.
    pub fn unknown() -> Self {
        Self {
            path: Arc::from("<unknown>"),
            line: 0,
            column: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}:{}:{}", self.path, self.line, self.column)
        }
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod tests;
