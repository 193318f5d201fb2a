//! Cursor and viewport state for an open buffer.
//!
//! [`CursorView`] owns the cursor coordinates and the vertical scroll offset
//! of the viewport. It never touches the buffer's text; movement operations
//! borrow the buffer through [`BufferView`] for the call, so there is one
//! `CursorView` per open buffer and no ownership entanglement.

/// Read-only line geometry a cursor needs from a buffer.
///
/// Implementations must never report a zero line count, and every line has at
/// least one addressable cell (the end-of-line position), so
/// `line_width(row) >= 1` for any in-range `row`.
pub trait BufferView {
    /// Total number of lines.
    fn line_count(&self) -> usize;

    /// Addressable cursor cells on a row: the characters of the line plus
    /// one for the trailing end-of-line position.
    fn line_width(&self, row: usize) -> usize;
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor position plus the viewport window it must stay inside.
///
/// Moves at a boundary are silent no-ops; none of the operations here can
/// fail. Scrolling follows the cursor one row at a time and never leads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorView {
    cursor_row: usize,
    cursor_col: usize,
    /// Remembered column for vertical movement (sticky column). Written only
    /// by horizontal moves; vertical clamping reads it without updating it.
    col_hint: usize,
    /// First buffer row visible on screen.
    viewport_row: usize,
    /// Row floor: the cursor never moves above this row, and the same count
    /// of rows is kept out of reach at the bottom of the buffer.
    min_row: usize,
    /// Column floor, e.g. for a reserved left margin.
    min_col: usize,
    viewport_width: u16,
    viewport_height: u16,
}

impl CursorView {
    /// Create a cursor at the origin with a viewport of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            col_hint: 0,
            viewport_row: 0,
            min_row: 0,
            min_col: 0,
            viewport_width: width,
            viewport_height: height.max(1),
        }
    }

    /// Reserve `min_row` rows of chrome at the top (and, symmetrically, at
    /// the bottom) and `min_col` columns on the left. The cursor starts at
    /// the floor position.
    pub fn with_margins(mut self, min_row: usize, min_col: usize) -> Self {
        self.min_row = min_row;
        self.min_col = min_col;
        self.cursor_row = min_row;
        self.cursor_col = min_col;
        self.col_hint = min_col;
        self.contain_cursor();
        self
    }

    /// The cursor's buffer position as `(row, col)`.
    pub const fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// First buffer row visible on screen.
    pub const fn viewport_row(&self) -> usize {
        self.viewport_row
    }

    /// Viewport width in columns.
    pub const fn width(&self) -> u16 {
        self.viewport_width
    }

    /// Viewport height in rows.
    pub const fn height(&self) -> u16 {
        self.viewport_height
    }

    /// Translate the cursor's buffer position into screen coordinates.
    ///
    /// No horizontal scrolling is modeled, so the column passes through
    /// unchanged.
    pub const fn translate(&self) -> (usize, usize) {
        (self.cursor_row - self.viewport_row, self.cursor_col)
    }

    /// Move the cursor one step in the given direction.
    ///
    /// Out-of-bounds requests leave the state untouched: bumping into a wall
    /// is expected in an editor, not exceptional.
    pub fn move_cursor(&mut self, direction: Direction, buffer: &impl BufferView) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(buffer),
            Direction::Up => self.move_up(buffer),
            Direction::Down => self.move_down(buffer),
        }
    }

    /// Update the viewport dimensions after a terminal resize.
    ///
    /// The scroll offset is clamped so the cursor stays visible; cursor
    /// coordinates are untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height.max(1);
        self.contain_cursor();
    }

    fn move_left(&mut self) {
        if self.cursor_col > self.min_col {
            self.cursor_col -= 1;
            self.col_hint = self.cursor_col;
        }
    }

    fn move_right(&mut self, buffer: &impl BufferView) {
        // The cursor addresses a character cell, not an insertion gap, so
        // the last valid column is width - 1.
        if self.cursor_col + 1 < buffer.line_width(self.cursor_row) {
            self.cursor_col += 1;
            self.col_hint = self.cursor_col;
        }
    }

    fn move_up(&mut self, buffer: &impl BufferView) {
        if self.cursor_row > self.min_row {
            self.cursor_row -= 1;
            self.clamp_col(buffer);
            self.scroll_up();
        }
    }

    fn move_down(&mut self, buffer: &impl BufferView) {
        // The row floor doubles as a bottom margin here: `min_row` rows stay
        // out of reach at the end of the buffer as well as at the top.
        if self.cursor_row + self.min_row + 1 < buffer.line_count() {
            self.cursor_row += 1;
            self.clamp_col(buffer);
            self.scroll_down(buffer);
        }
    }

    /// Snap the column to the sticky hint or the line end, whichever is
    /// nearer. The hint itself is left alone.
    fn clamp_col(&mut self, buffer: &impl BufferView) {
        self.cursor_col = self.col_hint.min(buffer.line_width(self.cursor_row) - 1);
    }

    /// Scroll one row up when the cursor has just stepped above the top edge.
    fn scroll_up(&mut self) {
        if self.viewport_row > 0 && self.cursor_row + 1 == self.viewport_row {
            self.viewport_row -= 1;
        }
    }

    /// Scroll one row down when the cursor has just stepped below the bottom
    /// edge and more of the buffer remains.
    fn scroll_down(&mut self, buffer: &impl BufferView) {
        let bottom = self.viewport_row + self.viewport_height as usize - 1;
        if self.cursor_row == bottom + 1 && bottom + 1 < buffer.line_count() {
            self.viewport_row += 1;
        }
    }

    /// Clamp `viewport_row` so the cursor row is inside the viewport.
    fn contain_cursor(&mut self) {
        let height = self.viewport_height as usize;
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + height {
            self.viewport_row = self.cursor_row + 1 - height;
        }
    }
}
