// UI rendering logic
//
// This module contains all the rendering code for the TUI. In ratatui,
// you define the UI layout and widgets in a render function that gets
// called on every frame. Line colors are re-derived from the line text
// on every frame via the classifier - nothing is cached.

use super::app::App;
use crate::classify::{classify, DEFAULT_FG, PROMPT_FG};
use crate::logging::{LogEntry, LogLevel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const BACKGROUND: Color = Color::Rgb(0x0d, 0x0d, 0x0d);

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Terminal transcript on top, optional system-logs strip, then the
    // one-line status bar
    let constraints = if app.show_logs {
        vec![
            Constraint::Min(5),    // Transcript
            Constraint::Length(6), // System logs
            Constraint::Length(1), // Status bar
        ]
    } else {
        vec![Constraint::Min(5), Constraint::Length(1)]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_transcript(f, chunks[0], app);

    if app.show_logs {
        render_logs_strip(f, chunks[1], app);
        render_status(f, chunks[2], app);
    } else {
        render_status(f, chunks[1], app);
    }
}

/// Render the scrollback transcript plus the prompt row
fn render_transcript(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PROMPT_FG))
        .title(" HACKER TERMINAL v3.2 ")
        .title_style(Style::default().fg(PROMPT_FG).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(BACKGROUND));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // The prompt is one extra virtual row at the end of the transcript
    // once boot has finished
    let prompt_rows = usize::from(app.input_active());
    let total = app.scrollback.len() + prompt_rows;
    app.scroll
        .update_dimensions(total, inner.height as usize);
    let (start, end) = app.scroll.visible_range();

    let mut items: Vec<ListItem> = Vec::with_capacity(end - start);
    for row in start..end {
        if row < app.scrollback.len() {
            let line = &app.scrollback.lines()[row];
            items.push(ListItem::new(Line::from(Span::styled(
                line.clone(),
                Style::default().fg(classify(line)),
            ))));
        } else {
            items.push(ListItem::new(prompt_line(app)));
        }
    }

    f.render_widget(List::new(items), inner);
}

/// The live prompt row: "> " plus pending input plus a block cursor
fn prompt_line(app: &App) -> Line<'static> {
    Line::from(vec![
        Span::styled("> ", Style::default().fg(PROMPT_FG)),
        Span::styled(app.input.clone(), Style::default().fg(PROMPT_FG)),
        Span::styled("█", Style::default().fg(PROMPT_FG)),
    ])
}

/// Render the system-logs strip (tail of the tracing ring buffer)
fn render_logs_strip(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.tail(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" System Logs ")
            .style(Style::default().bg(BACKGROUND)),
    );
    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(DEFAULT_FG),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

/// Render the status bar
fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.server_url),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("│ LEVEL {} ", app.current_level),
            Style::default().fg(PROMPT_FG),
        ),
        Span::styled(
            format!("│ UP {} ", app.uptime()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if !app.input_active() {
        spans.push(Span::styled(
            "│ BOOTING… ",
            Style::default().fg(Color::Yellow),
        ));
    } else if app.in_flight > 0 {
        spans.push(Span::styled(
            format!("│ {} pending ", app.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        "│ F2 logs │ Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(BACKGROUND));
    f.render_widget(status, area);
}
