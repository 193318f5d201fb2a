use std::path::PathBuf;

use ratatui::style::Style;

use crate::editor::{CursorView, TextBuffer};
use crate::highlight::Highlighter;
use crate::highlight::coalesce::StyledRun;

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The open buffer (read-only for the session)
    pub buffer: TextBuffer,
    /// Cursor position and viewport scroll state
    pub cursor: CursorView,
    /// Path to the source file (empty for an untitled buffer)
    pub file_path: PathBuf,
    /// Lexer + style table for the detected language, if any
    pub highlighter: Option<Highlighter>,
    /// Styled runs per buffer line, computed once since the buffer is
    /// immutable for the session
    pub highlighted: Option<Vec<Vec<StyledRun<Style>>>>,
    /// Whether highlighted runs are shown (toggled at runtime)
    pub highlight_enabled: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a new model with default settings.
    pub fn new(file_path: PathBuf, buffer: TextBuffer, terminal_size: (u16, u16)) -> Self {
        let (width, height) = terminal_size;
        Self {
            buffer,
            cursor: CursorView::new(width, crate::ui::content_height(height)),
            file_path,
            highlighter: None,
            highlighted: None,
            highlight_enabled: false,
            should_quit: false,
        }
    }

    /// Detect the buffer's language from its file name and, when enabled,
    /// precompute the styled runs.
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self.highlighter = Highlighter::for_path(&self.file_path);
        match &self.highlighter {
            Some(hl) => tracing::debug!(language = hl.language(), "syntax grammar selected"),
            None => tracing::debug!("no grammar for file, highlighting disabled"),
        }
        self.ensure_highlighted();
        self
    }

    /// Compute styled runs if highlighting is on and they are missing.
    pub(super) fn ensure_highlighted(&mut self) {
        if self.highlight_enabled
            && self.highlighted.is_none()
            && let Some(hl) = &self.highlighter
        {
            let _scope = crate::perf::scope("model.highlight_buffer");
            self.highlighted = Some(hl.highlight(&self.buffer.text()));
        }
    }

    /// Display name of the buffer's language.
    pub fn language(&self) -> &'static str {
        self.highlighter
            .as_ref()
            .map_or("plain", Highlighter::language)
    }

    /// Apply a terminal resize to the cursor's viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.cursor.resize(width, crate::ui::content_height(height));
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), TextBuffer::empty(), (80, 24))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("cursor", &self.cursor)
            .field("highlight_enabled", &self.highlight_enabled)
            .finish_non_exhaustive()
    }
}
