//! Rendering for the terminal UI.

use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::stats::aggregate;
use crate::task::{Priority, Task};

use super::app::{AppState, DeleteConfirmState, StatusKind};
use super::editor::EditorState;

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let now = Utc::now();
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    render_stats(frame, app, chunks[0], now);
    render_filter_bar(frame, app, chunks[1]);

    if app.show_detail {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(chunks[2]);
        render_list(frame, app, main[0], now);
        render_detail(frame, app, main[1]);
    } else {
        render_list(frame, app, chunks[2], now);
    }

    render_footer(frame, app, chunks[3]);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(confirm) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, confirm);
    }
    if app.show_help {
        render_help_modal(frame, area);
    }
}

fn render_stats(frame: &mut Frame, app: &AppState, area: Rect, now: DateTime<Utc>) {
    let stats = aggregate(app.store.tasks(), now);
    let cards = [
        ("Total", stats.total, COLOR_ACCENT),
        ("Completed", stats.completed, COLOR_SUCCESS),
        ("Pending", stats.pending, COLOR_WARNING),
        ("Overdue", stats.overdue, COLOR_ERROR),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ]
            .as_ref(),
        )
        .split(area);

    for ((label, count, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        let line = Line::from(vec![
            Span::styled(
                count.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {label}"), Style::default().fg(COLOR_MUTED)),
        ]);
        let card = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BG_MUTED)),
        );
        frame.render_widget(card, *chunk);
    }
}

fn render_filter_bar(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = Vec::new();

    let search_label = if app.search_active {
        format!(" search: {}_ ", app.search)
    } else if app.search.trim().is_empty() {
        " / search ".to_string()
    } else {
        format!(" search: {} ", app.search)
    };
    let search_style = if app.search_active || !app.search.trim().is_empty() {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_MUTED)
    };
    spans.push(Span::styled(search_label, search_style));

    spans.push(filter_span(
        "category",
        app.category_filter.as_deref(),
    ));
    spans.push(filter_span(
        "priority",
        app.priority_filter.map(|priority| priority.as_str()),
    ));
    spans.push(filter_span(
        "state",
        app.completed_filter
            .map(|completed| if completed { "completed" } else { "pending" }),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn filter_span(label: &str, value: Option<&str>) -> Span<'static> {
    match value {
        Some(value) => Span::styled(
            format!(" {label}: {value} "),
            Style::default().fg(COLOR_ACCENT),
        ),
        None => Span::styled(
            format!(" {label}: all "),
            Style::default().fg(COLOR_MUTED),
        ),
    }
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect, now: DateTime<Utc>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tasks ({}) ", app.visible.len()))
        .border_style(Style::default().fg(COLOR_BG_MUTED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.visible.is_empty() {
        let empty = Paragraph::new("no tasks match - a to add, esc to clear filters")
            .style(Style::default().fg(COLOR_MUTED));
        frame.render_widget(empty, inner);
        return;
    }

    let height = inner.height as usize;
    let selected = app.selected.unwrap_or(0);
    // Keep the selection on screen.
    let first = selected.saturating_sub(height.saturating_sub(1));

    let mut lines = Vec::new();
    for (pos, idx) in app.visible.iter().enumerate().skip(first).take(height) {
        let Some(task) = app.store.tasks().get(*idx) else {
            continue;
        };
        lines.push(task_row(task, Some(pos) == app.selected, now));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn task_row(task: &Task, selected: bool, now: DateTime<Utc>) -> Line<'static> {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mark_style = if task.completed {
        Style::default().fg(COLOR_SUCCESS)
    } else {
        Style::default().fg(COLOR_MUTED)
    };

    let title_style = if task.completed {
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };

    let mut spans = vec![
        Span::styled(mark.to_string(), mark_style),
        Span::styled(
            format!(" {:<6}", task.priority.as_str()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(format!("{} ", task.title), title_style),
        Span::styled(
            format!("({})", task.category),
            Style::default().fg(COLOR_INFO),
        ),
    ];
    if let Some(due) = task.due_date {
        let due_style = if task.is_overdue(now) {
            Style::default().fg(COLOR_ERROR)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(format!(" due {due}"), due_style));
    }

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }
    Line::from(spans)
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => COLOR_ERROR,
        Priority::Medium => COLOR_WARNING,
        Priority::Low => COLOR_MUTED,
    }
}

fn render_detail(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Detail ")
        .border_style(Style::default().fg(COLOR_BG_MUTED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(task) = app.selected_task() else {
        let empty = Paragraph::new("nothing selected").style(Style::default().fg(COLOR_MUTED));
        frame.render_widget(empty, inner);
        return;
    };

    let state = if task.completed { "completed" } else { "pending" };
    let mut lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            task.id.clone(),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        detail_line("state", state.to_string()),
        detail_line("priority", task.priority.to_string()),
        detail_line("category", task.category.clone()),
    ];
    if let Some(due) = task.due_date {
        lines.push(detail_line("due", due.to_string()));
    }
    lines.push(detail_line(
        "created",
        task.created_at.format("%Y-%m-%d %H:%M").to_string(),
    ));
    lines.push(detail_line(
        "updated",
        task.updated_at.format("%Y-%m-%d %H:%M").to_string(),
    ));
    if let Some(description) = task.description.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(COLOR_TEXT),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(COLOR_MUTED)),
        Span::styled(value, Style::default().fg(COLOR_TEXT)),
    ])
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(area);

    if let Some((message, kind)) = app.status_line() {
        let style = match kind {
            StatusKind::Error => Style::default().fg(COLOR_ERROR),
            StatusKind::Info => Style::default().fg(COLOR_INFO),
        };
        frame.render_widget(Paragraph::new(message).style(style), chunks[0]);
    }

    let hint = Paragraph::new(app.footer_hint()).style(Style::default().fg(COLOR_MUTED));
    frame.render_widget(hint, chunks[1]);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let height = editor.fields().len() as u16 + 4;
    let modal = centered_rect(60, height, area);
    frame.render_widget(Clear, modal);

    let title = match editor.task_id() {
        Some(id) => format!(" Edit {id} "),
        None => " New Task ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(COLOR_ACCENT));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let active = idx == editor.active_index() && !editor.confirming();
        let label_style = if active {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        let marker = if field.required { "*" } else { " " };
        let cursor = if active { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<18}", field.label), label_style),
            Span::styled(
                format!("{}{cursor}", field.value),
                Style::default().fg(COLOR_TEXT),
            ),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    } else if editor.confirming() {
        lines.push(Line::from(Span::styled(
            "save? enter/y confirm, e edit, esc cancel",
            Style::default().fg(COLOR_WARNING),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, confirm: &DeleteConfirmState) {
    let modal = centered_rect(50, 5, area);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete Task ")
        .border_style(Style::default().fg(COLOR_ERROR));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines = vec![
        Line::from(Span::styled(
            format!("delete '{}' ({})?", confirm.title, confirm.task_id),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y delete  esc cancel",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let entries: [(&str, &str); 13] = [
        ("j/k", "move selection"),
        ("g/G", "first/last task"),
        ("/", "search title and description"),
        ("c", "cycle category filter"),
        ("p", "cycle priority filter"),
        ("f", "cycle pending/completed filter"),
        ("a or n", "add task"),
        ("e", "edit selected task"),
        ("x or space", "toggle completion"),
        ("d", "delete selected task"),
        ("enter", "toggle detail pane"),
        ("esc", "clear filters, then quit"),
        ("q", "quit"),
    ];

    let modal = centered_rect(54, entries.len() as u16 + 2, area);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(COLOR_INFO));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<12}"), Style::default().fg(COLOR_ACCENT)),
                Span::styled(action.to_string(), Style::default().fg(COLOR_TEXT)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * width_pct / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(area.height),
    }
}
