use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());

    let (row, col) = model.cursor.cursor();
    let highlight_indicator = if model.highlight_enabled || model.highlighter.is_none() {
        ""
    } else {
        " [nohl]"
    };

    let status = format!(
        " {}  Ln {}, Col {}  [{}]{}  q:quit  s:syntax",
        filename,
        row + 1,
        col + 1,
        model.language(),
        highlight_indicator
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}
