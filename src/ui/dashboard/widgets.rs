use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge},
};

use super::theme::Stylesheet;

/// Create a gauge coloured by usage threshold
pub fn usage_gauge<'a>(sheet: &Stylesheet, percent: u16, label: String) -> Gauge<'a> {
    let value = f64::from(percent.min(100));

    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(sheet.usage_color(value))
                .bg(sheet.background),
        )
        .ratio(value / 100.0)
        .label(label)
}

/// Bordered panel block with a themed title
pub fn panel_block<'a>(sheet: &Stylesheet, title: &'a str) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), sheet.title()))
        .borders(Borders::ALL)
        .border_style(sheet.border_style())
        .style(sheet.base())
}

/// Centered rect of the given percentage size, for overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
