//! Modal overlays: keybinding help and the model picker

use crate::app::App;
use crate::config::Action;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::colors;

/// Create a centered rect with percentage width and absolute height
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER_FOCUSED))
}

/// Render the keybinding help overlay
pub fn render_help_overlay(frame: &mut Frame<'_>, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let mut current_group = None;
    for &action in Action::ALL_FOR_HELP {
        let group = action.group();
        if current_group != Some(group) {
            if current_group.is_some() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                group.title(),
                Style::default().fg(colors::TEXT_DIM),
            )));
            current_group = Some(group);
        }
        lines.push(Line::from(Span::styled(
            app.config.keys.help_line(action),
            Style::default().fg(colors::TEXT_PRIMARY),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "In the input box: Enter sends, Alt+Enter adds a line",
        Style::default().fg(colors::TEXT_MUTED),
    )));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let max_height = frame.area().height.saturating_sub(2);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(max_height);
    let area = centered_rect_absolute(70, height, frame.area());

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Help "))
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Render the model picker overlay for the slot being edited
pub fn render_model_picker_overlay(frame: &mut Frame<'_>, app: &App) {
    let filtered = app.picker_models();
    let position = app
        .picker
        .slot_id
        .as_deref()
        .and_then(|id| app.slots.slots().iter().position(|s| s.id == id));
    let current = position.and_then(|p| app.slots.get(p));
    let slot_label = position.map_or_else(|| " ".to_string(), |p| format!(" for Model {} ", p + 1));

    let mut lines: Vec<Line<'_>> = vec![
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(colors::TEXT_DIM)),
            Span::styled(
                format!("{}_", app.picker.filter),
                Style::default().fg(colors::TEXT_PRIMARY),
            ),
        ]),
        Line::from(""),
    ];

    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "No matching models",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    } else {
        for (idx, model) in filtered.iter().enumerate() {
            let is_cursor = idx == app.picker.selected;
            let is_current = current.is_some_and(|s| s.selected_model_id == model.id);
            let style = if is_cursor {
                Style::default()
                    .fg(colors::TEXT_PRIMARY)
                    .bg(colors::SURFACE_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::TEXT_PRIMARY)
            };
            let cursor = if is_cursor { "▶ " } else { "  " };
            let check = if is_current { "✓ " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(format!("{cursor}{check}{}", model.name), style),
                Span::styled(
                    format!("  {}", model.id),
                    Style::default().fg(colors::TEXT_MUTED),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select • Enter confirm • Esc cancel • Type to filter",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let max_height = frame.area().height.saturating_sub(2);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(max_height);
    let area = centered_rect_absolute(55, height, frame.area());

    let title = format!(" Choose model{slot_label}");
    let paragraph = Paragraph::new(lines)
        .block(modal_block(&title))
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
