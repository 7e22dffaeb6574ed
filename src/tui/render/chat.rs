//! Chat pane: welcome panel, message history and input box

use crate::app::{App, Focus, Message, Mode, Role};
use crate::client::AnswerSource;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::colors;
use super::header::SUBTITLE;

/// Shown instead of sending when no slot is enabled
pub const NO_MODELS_NOTICE: &str = "Please enable at least one LLM model to continue";

/// Heading above every assistant answer
pub const FINAL_RESPONSE_TITLE: &str = "MAIRE Final Response";

/// Heading above the per-model layers of an answer
pub const TRACE_TITLE: &str = "Full Reasoning Trace";

const MAX_INPUT_LINES: usize = 5;

/// Split `text` into lines no wider than `width` characters.
///
/// Explicit line breaks are kept. Words longer than `width` are cut.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;
        for word in raw.split(' ') {
            let word_len = word.chars().count();
            let needed = if line_len == 0 { word_len } else { word_len + 1 };
            if line_len > 0 && line_len + needed > width {
                out.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            let mut chars = word.chars().peekable();
            while chars.peek().is_some() {
                if line_len == width {
                    out.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                if let Some(c) = chars.next() {
                    line.push(c);
                    line_len += 1;
                }
            }
        }
        out.push(line);
    }
    out
}

fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    prefix: &'static str,
    width: usize,
    style: Style,
) {
    let prefix_len = prefix.chars().count();
    for part in wrap_text(text, width.saturating_sub(prefix_len)) {
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(colors::TEXT_MUTED)),
            Span::styled(part, style),
        ]));
    }
}

const fn source_tag(source: Option<AnswerSource>) -> &'static str {
    match source {
        Some(AnswerSource::Mock) => " · mock",
        Some(AnswerSource::Local) => " · local engine",
        Some(AnswerSource::Remote) | None => "",
    }
}

fn message_lines(app: &App, index: usize, message: &Message, width: usize) -> Vec<Line<'static>> {
    let highlighted = app.focus == Focus::History && app.ui.selected_message == Some(index);
    let heading_bg = if highlighted {
        colors::SURFACE_HIGHLIGHT
    } else {
        colors::SURFACE
    };
    let time = message.timestamp.format("%H:%M").to_string();
    let mut lines = Vec::new();

    match message.role {
        Role::User => {
            lines.push(Line::from(vec![
                Span::styled(
                    "You",
                    Style::default()
                        .fg(colors::TEXT_DIM)
                        .bg(heading_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {time}"), Style::default().fg(colors::TEXT_MUTED)),
            ]));
            push_wrapped(
                &mut lines,
                &message.content,
                "  ",
                width,
                Style::default()
                    .fg(colors::TEXT_PRIMARY)
                    .bg(colors::USER_BUBBLE),
            );
        }
        Role::Assistant => {
            let tag_color = if message.source == Some(AnswerSource::Mock) {
                colors::WARNING
            } else {
                colors::TEXT_MUTED
            };
            lines.push(Line::from(vec![
                Span::styled(
                    FINAL_RESPONSE_TITLE,
                    Style::default()
                        .fg(colors::ACCENT)
                        .bg(heading_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(source_tag(message.source), Style::default().fg(tag_color)),
                Span::styled(format!("  {time}"), Style::default().fg(colors::TEXT_MUTED)),
            ]));
            push_wrapped(
                &mut lines,
                &message.content,
                "  ",
                width,
                Style::default().fg(colors::TEXT_PRIMARY),
            );

            if let Some(stack) = message.header_stack.as_ref().filter(|s| !s.is_empty()) {
                let expanded = app.conversation.is_trace_expanded(message.id);
                let arrow = if expanded { "▾" } else { "▸" };
                lines.push(Line::from(Span::styled(
                    format!("{arrow} {TRACE_TITLE} ({} layers)", stack.len()),
                    Style::default().fg(colors::TEXT_DIM),
                )));
                if expanded {
                    for layer in stack {
                        lines.push(Line::from(vec![
                            Span::styled("  ┃ ", Style::default().fg(colors::TEXT_MUTED)),
                            Span::styled(
                                layer.model.clone(),
                                Style::default()
                                    .fg(colors::TRACE_MODEL)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        ]));
                        push_wrapped(
                            &mut lines,
                            &layer.response,
                            "  ┃   ",
                            width,
                            Style::default().fg(colors::TEXT_DIM),
                        );
                    }
                }
            }
        }
    }
    lines
}

fn welcome_lines(app: &App) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Welcome to MAIRE",
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(colors::TEXT_DIM))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Using {} with {} models",
                app.topology.label(),
                app.slots.active_count()
            ),
            Style::default().fg(colors::TEXT_PRIMARY),
        )),
    ]
}

fn render_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let border_color = if app.focus == Focus::History {
        colors::BORDER_FOCUSED
    } else {
        colors::BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(colors::SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewport = usize::from(inner.height);
    app.ui.viewport_height.set(viewport);

    if app.conversation.is_empty() {
        let welcome = welcome_lines(app);
        let top = inner
            .height
            .saturating_sub(u16::try_from(welcome.len()).unwrap_or(0))
            / 2;
        let area = Rect {
            y: inner.y + top,
            height: inner.height - top,
            ..inner
        };
        frame.render_widget(Paragraph::new(welcome).alignment(Alignment::Center), area);
        app.ui.rendered_offset.set(0);
        app.ui.max_scroll.set(0);
        return;
    }

    let width = usize::from(inner.width);
    let mut lines = Vec::new();
    for (index, message) in app.conversation.messages().iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(message_lines(app, index, message, width));
    }
    if app.is_running() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "MAIRE is reasoning…",
            Style::default()
                .fg(colors::ACCENT_SOFT)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let max_scroll = lines.len().saturating_sub(viewport);
    let offset = if app.ui.follow {
        max_scroll
    } else {
        app.ui.history_scroll.min(max_scroll)
    };
    app.ui.max_scroll.set(max_scroll);
    app.ui.rendered_offset.set(offset);

    let scroll = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn render_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border_color = if focused {
        colors::BORDER_FOCUSED
    } else {
        colors::BORDER
    };
    let title = if app.is_running() {
        " Message (waiting for MAIRE…) "
    } else {
        " Message "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(colors::INPUT_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.input.buffer.is_empty() {
        let placeholder = if app.slots.active_count() == 0 {
            "Enable a model in the sidebar to start"
        } else {
            "Ask MAIRE anything… (Enter to send, Alt+Enter for a new line)"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                placeholder,
                Style::default().fg(colors::TEXT_MUTED),
            )),
            inner,
        );
    } else {
        let (cursor_line, _) = app.input.cursor_position();
        let visible = usize::from(inner.height).max(1);
        let scroll = cursor_line.saturating_sub(visible - 1);
        let lines: Vec<Line<'_>> = app
            .input
            .buffer
            .split('\n')
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors::TEXT_PRIMARY))))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(0), 0)),
            inner,
        );
    }

    if focused && app.mode == Mode::Normal {
        let (line, column) = app.input.cursor_position();
        let visible = usize::from(inner.height).max(1);
        let row = line.min(visible - 1);
        let x = inner.x
            + u16::try_from(column)
                .unwrap_or(u16::MAX)
                .min(inner.width.saturating_sub(1));
        let y = inner.y + u16::try_from(row).unwrap_or(0);
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Height of the input box including borders
#[must_use]
pub fn input_height(app: &App) -> u16 {
    let lines = app.input.line_count().clamp(1, MAX_INPUT_LINES);
    u16::try_from(lines).unwrap_or(1) + 2
}

/// Render the chat pane
pub fn render_chat(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let show_notice = app.slots.active_count() == 0;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(u16::from(show_notice)),
            Constraint::Length(input_height(app)),
        ])
        .split(area);

    render_history(frame, app, chunks[0]);
    if show_notice {
        frame.render_widget(
            Paragraph::new(Span::styled(
                NO_MODELS_NOTICE,
                Style::default()
                    .fg(colors::WARNING)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[1],
        );
    }
    render_input(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_keeps_newlines_and_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_cuts_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert_eq!(wrap_text("ab", 0), vec!["a", "b"]);
    }
}
