use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

pub(super) fn handle_event(
    event: &Event,
    now_ms: u64,
    resize_debouncer: &mut ResizeDebouncer,
) -> Option<Message> {
    match event {
        Event::Key(key) => handle_key(*key),
        Event::Resize(width, height) => {
            resize_debouncer.queue(*width, *height, now_ms);
            None
        }
        _ => None,
    }
}

pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Message::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveCursor(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveCursor(Direction::Right)),
        KeyCode::Char('s') => Some(Message::ToggleHighlight),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        _ => None,
    }
}
