use crate::app::Model;
use crate::editor::Direction;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Move the cursor one step
    MoveCursor(Direction),
    /// Toggle syntax highlighting
    ToggleHighlight,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::MoveCursor(direction) => {
            model.cursor.move_cursor(direction, &model.buffer);
        }
        Message::ToggleHighlight => {
            model.highlight_enabled = !model.highlight_enabled;
            model.ensure_highlighted();
        }
        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }
    model
}
