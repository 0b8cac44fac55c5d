//! Source position types shared by nodes and findings.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Position Type
// ============================================================================

/// Position of a node in a source file.
///
/// - `line`: 1-indexed line number
/// - `col`: 0-indexed column offset, UTF-8 bytes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column offset (0-indexed, UTF-8 bytes).
    pub col: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
