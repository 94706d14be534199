//! UI rendering for the TUI

use crate::app::{App, MessageKind};
use leaf_core::{FieldKind, Mode, SnapshotField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HELP_LINES: &[(&str, &str)] = &[
    ("→ ↓ l j", "Next record (count prefix: 5j)"),
    ("← ↑ h k", "Previous record"),
    ("Home / End G", "First / last record"),
    ("g :", "Go to record number"),
    ("/", "Filter by company"),
    ("c", "Clear filter"),
    ("y", "Copy email address"),
    ("Z", "Toggle zen mode"),
    ("?", "Toggle help"),
    ("q Esc", "Quit"),
];

/// Truncate to a display width, appending `…` when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let show_filter_bar = app.navigator.is_filtered() && !app.zen_mode;
    let show_status_bar = !app.zen_mode || app.prompt_active();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                                     // Record card
            Constraint::Length(if show_filter_bar { 1 } else { 0 }), // Filter bar
            Constraint::Length(if show_status_bar { 1 } else { 0 }), // Status / prompt
        ])
        .split(area);

    draw_record(frame, app, chunks[0]);
    if show_filter_bar {
        draw_filter_bar(frame, app, chunks[1]);
    }
    if show_status_bar {
        if app.prompt_active() {
            draw_prompt(frame, app, chunks[2]);
        } else {
            draw_status_bar(frame, app, chunks[2]);
        }
    }

    if app.show_help {
        draw_help_popover(frame, app);
    }

    if app.message().is_some() {
        draw_message_popup(frame, app);
    }
}

fn value_spans(app: &App, field: &SnapshotField) -> Vec<Span<'static>> {
    let theme = &app.theme;
    match field.kind {
        FieldKind::Link => vec![Span::styled(
            field.value.clone(),
            Style::default()
                .fg(theme.link)
                .add_modifier(Modifier::UNDERLINED),
        )],
        FieldKind::Email => vec![
            Span::styled(field.value.clone(), Style::default().fg(theme.text)),
            Span::styled("  [y] copy", Style::default().fg(theme.text_muted)),
        ],
        FieldKind::Empty => vec![Span::styled(
            app.empty_placeholder.clone(),
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::ITALIC),
        )],
        FieldKind::Plain => vec![Span::styled(
            field.value.clone(),
            Style::default().fg(theme.text),
        )],
    }
}

fn nav_controls(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let Some(info) = app.navigator.render_info() else {
        return Line::default();
    };
    let control = |label: &'static str, enabled: bool| {
        if enabled {
            Span::styled(label, Style::default().fg(theme.accent))
        } else {
            Span::styled(label, Style::default().fg(theme.text_muted))
        }
    };
    Line::from(vec![
        Span::raw(" "),
        control("◀ prev", info.prev_enabled),
        Span::styled(
            format!("  {} / {}  ", info.position, info.total),
            Style::default().fg(theme.text),
        ),
        control("next ▶", info.next_enabled),
        Span::raw(" "),
    ])
}

fn draw_record(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let title_width = (area.width as usize).saturating_sub(4);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {} ", truncate_to_width(&app.source_name, title_width)),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(nav_controls(app).alignment(Alignment::Center));

    let fields = app.navigator.current_fields();
    if fields.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No data available",
            Style::default().fg(theme.text_muted),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::with_capacity(fields.len() * 3);
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            field.header.clone(),
            Style::default().fg(theme.label).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(value_spans(app, field)));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let Some(info) = app.navigator.filter_info() else {
        return;
    };
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            " FILTER ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} contains \"{}\"", info.column_name, info.term),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("  result {} of {}", info.position, info.total),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled("  [c] clear", Style::default().fg(theme.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mode = match app.navigator.mode() {
        Mode::Empty => " EMPTY ",
        Mode::Browsing => " BROWSE ",
        Mode::Filtered => " FILTERED ",
    };

    let position = match app.navigator.render_info() {
        Some(info) => format!(" Record {} of {}", info.position, info.total),
        None => String::new(),
    };
    let count = app
        .pending_count
        .map(|n| format!("  {}", n))
        .unwrap_or_default();

    let right = app.status.clone().unwrap_or_else(|| "? help ".to_string());
    let left_width = mode.width() + position.width() + count.width();
    let available = (area.width as usize).saturating_sub(left_width + 1);
    let right = truncate_to_width(&right, available);
    let padding = available.saturating_sub(right.width());

    let line = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
        Span::styled(position, Style::default().fg(theme.text)),
        Span::styled(count, Style::default().fg(theme.accent)),
        Span::raw(" ".repeat(padding + 1)),
        Span::styled(right, Style::default().fg(theme.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = app.prompt() else {
        return;
    };
    let theme = &app.theme;
    let label = prompt.label(app.navigator.dataset().len());
    let line = Line::from(vec![
        Span::styled(label.clone(), Style::default().fg(theme.accent)),
        Span::styled(prompt.input.clone(), Style::default().fg(theme.text)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + (label.width() + prompt.input.width()) as u16;
    if cursor_x < area.x + area.width {
        frame.set_cursor_position((cursor_x, area.y));
    }
}

/// Centered rect of at most `width` x `height` inside `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_message_popup(frame: &mut Frame, app: &App) {
    let Some(message) = app.message() else {
        return;
    };
    let theme = &app.theme;
    let (title, color) = match message.kind {
        MessageKind::Error => (" Error ", theme.error),
        MessageKind::Info => (" Info ", theme.accent),
    };

    let text_width = message.text.width();
    let width = text_width.saturating_add(4).clamp(24, 60);
    let inner_width = width.saturating_sub(2).max(1);
    let height = text_width
        .div_ceil(inner_width)
        .saturating_add(4)
        .min(u16::MAX as usize);
    let area = centered_rect(width as u16, height as u16, frame.area());

    let lines = vec![
        Line::from(Span::styled(
            message.text.clone(),
            Style::default().fg(theme.text),
        )),
        Line::default(),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(theme.text_muted),
        )),
    ];
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(title, Style::default().fg(color))),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn draw_help_popover(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_width = HELP_LINES.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$}  ", keys, width = key_width),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(*desc, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let width = HELP_LINES
        .iter()
        .map(|(_, d)| d.width())
        .max()
        .unwrap_or(0)
        + key_width
        + 6;
    let area = centered_rect(width as u16, HELP_LINES.len() as u16 + 2, frame.area());
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(" Help ", Style::default().fg(theme.accent))),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
