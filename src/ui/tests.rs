use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::{Message, Model, update};
use crate::editor::{Direction, TextBuffer};

use super::render::line_number_width;
use super::{content_height, render};

fn draw(model: &Model, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                out.push_str(cell.symbol());
            }
        }
        out.push('\n');
    }
    out
}

fn model_with(text: &str, size: (u16, u16)) -> Model {
    Model::new(PathBuf::from("test.txt"), TextBuffer::from_text(text), size)
}

#[test]
fn test_render_shows_numbered_lines_and_status() {
    let model = model_with("hello\nworld", (40, 6));
    let screen = draw(&model, 40, 6);
    assert!(screen.contains("1 hello"), "screen was:\n{screen}");
    assert!(screen.contains("2 world"), "screen was:\n{screen}");
    assert!(screen.contains("test.txt"), "screen was:\n{screen}");
    assert!(screen.contains("Ln 1, Col 1"), "screen was:\n{screen}");
}

#[test]
fn test_render_slices_buffer_at_viewport() {
    let text = (1..=10)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    // 4 terminal rows = 3 content rows
    let mut model = model_with(&text, (40, 4));
    for _ in 0..5 {
        model = update(model, Message::MoveCursor(Direction::Down));
    }
    let screen = draw(&model, 40, 4);
    assert!(!screen.contains("line 1 "), "screen was:\n{screen}");
    assert!(screen.contains("4 line 4"), "screen was:\n{screen}");
    assert!(screen.contains("6 line 6"), "screen was:\n{screen}");
    assert!(screen.contains("Ln 6"), "screen was:\n{screen}");
}

#[test]
fn test_render_marks_disabled_highlighting() {
    let model = Model::new(
        PathBuf::from("main.rs"),
        TextBuffer::from_text("fn main() {}"),
        (60, 6),
    )
    .with_highlighting(false);
    let screen = draw(&model, 60, 6);
    assert!(screen.contains("[rust]"), "screen was:\n{screen}");
    assert!(screen.contains("[nohl]"), "screen was:\n{screen}");
}

#[test]
fn test_render_plain_buffer_reports_plain_language() {
    let model = model_with("hello", (40, 6)).with_highlighting(true);
    let screen = draw(&model, 40, 6);
    assert!(screen.contains("[plain]"), "screen was:\n{screen}");
    assert!(!screen.contains("[nohl]"), "screen was:\n{screen}");
}

#[test]
fn test_content_height_reserves_status_bar() {
    assert_eq!(content_height(24), 23);
    assert_eq!(content_height(2), 1);
}

#[test]
fn test_content_height_never_zero() {
    assert_eq!(content_height(1), 1);
    assert_eq!(content_height(0), 1);
}

#[test]
fn test_line_number_width_grows_with_line_count() {
    assert_eq!(line_number_width(9), 1);
    assert_eq!(line_number_width(10), 2);
    assert_eq!(line_number_width(99), 2);
    assert_eq!(line_number_width(100), 3);
    assert_eq!(line_number_width(10_000), 5);
    assert_eq!(line_number_width(1_000_000), 6);
}
