use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::editor::BufferView;

use super::{STATUS_BAR_ROWS, status};

/// Height available for buffer content once the status bar is reserved.
pub fn content_height(total_height: u16) -> u16 {
    total_height.saturating_sub(STATUS_BAR_ROWS).max(1)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let content_area = Rect {
        height: content_height(area.height),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(STATUS_BAR_ROWS),
        height: STATUS_BAR_ROWS.min(area.height),
        ..area
    };

    render_buffer(model, frame, content_area);
    status::render_status_bar(model, frame, status_area);
}

fn render_buffer(model: &Model, frame: &mut Frame, area: Rect) {
    let total_lines = model.buffer.line_count();
    let gutter_width = line_number_width(total_lines);

    let start = model.cursor.viewport_row();
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for row in start..end {
        let line_num = format!("{:>width$} ", row + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];
        spans.extend(line_spans(model, row));
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), area);
    place_cursor(model, frame, area, gutter_width);
}

/// Styled spans for one buffer line, or the raw text when highlighting is
/// off or unavailable.
fn line_spans(model: &Model, row: usize) -> Vec<Span<'static>> {
    if model.highlight_enabled
        && let Some(lines) = &model.highlighted
        && let Some(runs) = lines.get(row)
    {
        return runs
            .iter()
            .map(|run| Span::styled(run.text.clone(), run.style))
            .collect();
    }
    vec![Span::raw(model.buffer.line_at(row).unwrap_or_default())]
}

/// Put the terminal's physical cursor where the buffer cursor is.
///
/// The vertical position comes straight from the viewport translation; the
/// horizontal position adds the gutter and measures preceding characters in
/// display cells so wide glyphs don't skew it.
fn place_cursor(model: &Model, frame: &mut Frame, area: Rect, gutter_width: u16) {
    let (screen_row, _) = model.cursor.translate();
    let (cursor_row, cursor_col) = model.cursor.cursor();

    let line_text = model.buffer.line_at(cursor_row).unwrap_or_default();
    let before: String = line_text.chars().take(cursor_col).collect();

    let x = area.x
        + gutter_width
        + 1
        + u16::try_from(before.width()).unwrap_or(u16::MAX);
    let y = area.y + u16::try_from(screen_row).unwrap_or(u16::MAX);

    let max_x = area.right().saturating_sub(1);
    let max_y = area.bottom().saturating_sub(1);
    frame.set_cursor_position((x.min(max_x), y.min(max_y)));
}

/// Calculate the width needed for line numbers.
pub(super) const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
