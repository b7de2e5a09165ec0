use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph, Tabs, Wrap},
};

use super::main_window::{MainWindow, MessageKind, MONITORING_TAB, TAB_TITLES};
use super::theme::Stylesheet;
use super::widgets::{centered_rect, panel_block, usage_gauge};
use crate::core::telemetry::Family;

const CONSOLE_HEIGHT: u16 = 7;

/// Main render function
pub fn render_ui(frame: &mut Frame, window: &MainWindow, min_size: (u16, u16)) {
    let sheet = window.stylesheet().read().clone();
    let area = frame.area();

    if area.width < min_size.0 || area.height < min_size.1 {
        render_too_small(frame, area, &sheet, min_size);
        return;
    }

    frame.render_widget(Block::default().style(sheet.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Tabs
            Constraint::Min(10),                // Body
            Constraint::Length(CONSOLE_HEIGHT), // Console
            Constraint::Length(1),              // Status bar
        ])
        .split(area);

    render_tabs(frame, chunks[0], window, &sheet);

    if window.selected_tab() == MONITORING_TAB {
        render_monitoring(frame, chunks[1], window, &sheet);
    } else {
        render_placeholder(frame, chunks[1], TAB_TITLES[window.selected_tab()], &sheet);
    }

    render_console(frame, chunks[2], window, &sheet);
    render_status_bar(frame, chunks[3], window, &sheet);

    if window.help_visible() {
        render_help_overlay(frame, area, &sheet);
    }

    if let Some(dialog) = window.dialog() {
        let color = match dialog.kind {
            MessageKind::Info | MessageKind::Question => sheet.highlight,
            MessageKind::Warning => sheet.warning,
            MessageKind::Error => sheet.critical,
        };
        let popup = centered_rect(50, 30, area);
        let title = format!("{}: {}", dialog.kind.label(), dialog.title);
        let body = Paragraph::new(vec![
            Line::from(dialog.message.clone()),
            Line::from(""),
            Line::from(Span::styled("Press any key to continue", Style::default().fg(sheet.muted))),
        ])
        .wrap(Wrap { trim: true })
        .block(panel_block(&sheet, &title).border_style(Style::default().fg(color)));

        frame.render_widget(Clear, popup);
        frame.render_widget(body, popup);
    }
}

fn render_too_small(frame: &mut Frame, area: Rect, sheet: &Stylesheet, min_size: (u16, u16)) {
    let text = format!(
        "Terminal too small: {}x{} (need {}x{})",
        area.width, area.height, min_size.0, min_size.1
    );
    let notice = Paragraph::new(text)
        .style(Style::default().fg(sheet.warning).bg(sheet.background))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(notice, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, window: &MainWindow, sheet: &Stylesheet) {
    let titles: Vec<Line> = TAB_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| Line::from(format!("{} {}", i + 1, title)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(window.selected_tab())
        .style(sheet.tab_inactive())
        .highlight_style(sheet.tab_active())
        .divider(Span::styled("│", sheet.border_style()))
        .block(panel_block(sheet, window.title()));

    frame.render_widget(tabs, area);
}

fn render_monitoring(frame: &mut Frame, area: Rect, window: &MainWindow, sheet: &Stylesheet) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let columns = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };

    let top = columns(rows[0]);
    let middle = columns(rows[1]);
    let bottom = columns(rows[2]);
    let tab = window.monitoring();

    render_gauge_panel(
        frame,
        top[0],
        sheet,
        "CPU Usage",
        tab.error_for(Family::Cpu),
        vec![tab.cpu.cores_text(), tab.cpu.frequency_text()],
        tab.cpu.progress(),
        tab.cpu.usage_text(),
    );
    render_gauge_panel(
        frame,
        top[1],
        sheet,
        "RAM Usage",
        tab.error_for(Family::Ram),
        vec![tab.ram.details_text(), tab.ram.available_text()],
        tab.ram.progress(),
        tab.ram.usage_text(),
    );
    render_text_panel(
        frame,
        middle[0],
        sheet,
        "Disk Usage",
        tab.error_for(Family::Disk),
        &tab.disk.text,
    );
    render_text_panel(
        frame,
        middle[1],
        sheet,
        "Network",
        tab.error_for(Family::Network),
        &tab.network.text,
    );
    render_gauge_panel(
        frame,
        bottom[0],
        sheet,
        "Battery",
        tab.error_for(Family::Battery),
        vec![tab.battery.status_text(), tab.battery.time_text()],
        tab.battery.progress(),
        tab.battery.level_text(),
    );
    render_controls(frame, bottom[1], window, sheet);
}

#[allow(clippy::too_many_arguments)]
fn render_gauge_panel(
    frame: &mut Frame,
    area: Rect,
    sheet: &Stylesheet,
    title: &str,
    error: Option<&str>,
    lines: Vec<String>,
    progress: u16,
    label: String,
) {
    let block = panel_block(sheet, title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(usage_gauge(sheet, progress, label), layout[0]);

    let mut text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    if let Some(message) = error {
        text.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(sheet.warning),
        )));
    }
    frame.render_widget(Paragraph::new(text).style(sheet.base()), layout[1]);
}

fn render_text_panel(
    frame: &mut Frame,
    area: Rect,
    sheet: &Stylesheet,
    title: &str,
    error: Option<&str>,
    content: &str,
) {
    let mut text: Vec<Line> = content.lines().map(|l| Line::from(l.to_string())).collect();
    if let Some(message) = error {
        text.insert(
            0,
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(sheet.warning),
            )),
        );
    }

    let paragraph = Paragraph::new(text)
        .style(sheet.base())
        .block(panel_block(sheet, title));
    frame.render_widget(paragraph, area);
}

fn render_controls(frame: &mut Frame, area: Rect, window: &MainWindow, sheet: &Stylesheet) {
    let (state, color) = if window.monitoring().is_monitoring() {
        ("Active", sheet.accent)
    } else {
        ("Stopped", sheet.warning)
    };
    let theme = window.themes().current_theme().unwrap_or("built-in");

    let text = vec![
        Line::from(vec![
            Span::raw("Monitoring: "),
            Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(format!("Privileges: {}", window.admin().label())),
        Line::from(format!("Theme: {}", theme)),
        Line::from(""),
        Line::from(Span::styled(
            "[m] start/stop  [p] profile  [t] theme  [?] help",
            Style::default().fg(sheet.muted),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .style(sheet.base())
        .block(panel_block(sheet, "System Monitoring"));
    frame.render_widget(paragraph, area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, name: &str, sheet: &Stylesheet) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(format!("{} Tab", name), sheet.title())),
        Line::from(""),
        Line::from(format!("The {} tab is not available yet.", name)),
        Line::from(Span::styled(
            "This placeholder will be replaced with the actual implementation.",
            Style::default().fg(sheet.muted),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .style(sheet.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel_block(sheet, name));
    frame.render_widget(paragraph, area);
}

fn render_console(frame: &mut Frame, area: Rect, window: &MainWindow, sheet: &Stylesheet) {
    let console = window.console();
    let visible = area.height.saturating_sub(2) as usize;

    // Keep the newest lines in view
    let scroll = console.line_count().saturating_sub(visible) as u16;

    let mut text = console.text().to_string();
    if console.is_animating() {
        text.push('█');
    }

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(sheet.accent).bg(sheet.background))
        .scroll((scroll, 0))
        .block(panel_block(sheet, "Console"));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, window: &MainWindow, sheet: &Stylesheet) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", window.status()), sheet.title()),
        Span::styled(
            "│ q quit │ Tab switch │ 1-8 jump │ ? help",
            Style::default().fg(sheet.muted),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(sheet.background)),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect, sheet: &Stylesheet) {
    let popup = centered_rect(50, 60, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", sheet.title())),
        Line::from(""),
        Line::from("q / Esc        Quit"),
        Line::from("Tab / →        Next tab"),
        Line::from("Shift+Tab / ←  Previous tab"),
        Line::from("1-8            Jump to tab"),
        Line::from("m              Start/stop monitoring"),
        Line::from("p              Run performance profile"),
        Line::from("t              Cycle theme"),
        Line::from("r              Reload theme"),
        Line::from("c              Clear console"),
        Line::from("Enter          Finish console animation"),
        Line::from("? / h          Toggle this help"),
    ];

    let help = Paragraph::new(help_text)
        .style(sheet.base())
        .block(panel_block(sheet, "Help"));

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}
