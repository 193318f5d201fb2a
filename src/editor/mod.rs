//! The editor core: a line-oriented text buffer and the cursor/viewport
//! engine that moves over it.

mod buffer;
mod cursor;

pub use buffer::TextBuffer;
pub use cursor::{BufferView, CursorView, Direction};
