//! Line-oriented text buffer backed by a rope.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ropey::Rope;

use super::cursor::BufferView;

/// An immutable, line-oriented view of a file's text.
///
/// The buffer is read-only for the lifetime of a session; the cursor engine
/// only indexes into it. A buffer is never empty: text with no content still
/// reports a single empty line.
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Create a buffer with a single empty line.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Read a buffer from a file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    /// Get the content of a line, without its trailing newline.
    pub fn line_at(&self, row: usize) -> Option<String> {
        if row >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(row).to_string();
        Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl BufferView for TextBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Characters on the row plus the end-of-line cell, so even an empty
    /// line has one addressable column.
    fn line_width(&self, row: usize) -> usize {
        self.line_at(row).map_or(1, |s| s.chars().count() + 1)
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .finish()
    }
}
