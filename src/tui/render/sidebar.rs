//! Configuration sidebar: topology choice and model slots

use crate::app::{App, Focus};
use crate::topology::Topology;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::colors;

/// Width of the sidebar in columns
pub const SIDEBAR_WIDTH: u16 = 40;

/// Footer shown at the bottom of the sidebar
pub const FOOTER: &str = "Immutable provenance • Full ledger • Truth over speed";

/// Label shown for a slot whose model is not in the model list
pub const UNKNOWN_MODEL: &str = "Choose model";

fn row_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .bg(colors::SURFACE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT_PRIMARY)
    }
}

fn section_title(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(colors::TEXT_DIM)
            .add_modifier(Modifier::BOLD),
    ))
}

fn topology_lines(app: &App, focused: bool) -> Vec<Line<'static>> {
    Topology::ALL
        .iter()
        .enumerate()
        .map(|(row, &topology)| {
            let highlighted = focused && app.ui.sidebar_cursor == row;
            let active = app.topology == topology;
            let marker = if active { "● " } else { "○ " };
            let marker_color = if active { colors::ACCENT } else { colors::TEXT_MUTED };

            let mut spans = vec![
                Span::raw(if highlighted { "▶ " } else { "  " }),
                Span::styled(marker, Style::default().fg(marker_color)),
                Span::styled(topology.label(), row_style(highlighted)),
            ];
            if let Some(badge) = topology.badge() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!(" {badge} "),
                    Style::default().fg(colors::SURFACE).bg(colors::ACCENT_SOFT),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

fn slot_lines(app: &App, focused: bool) -> Vec<Line<'static>> {
    if app.slots.is_empty() {
        let text = if app.is_loading_models() {
            "Loading models…"
        } else {
            "No models available"
        };
        return vec![Line::from(Span::styled(
            format!("  {text}"),
            Style::default().fg(colors::TEXT_MUTED),
        ))];
    }

    app.slots
        .slots()
        .iter()
        .enumerate()
        .map(|(position, slot)| {
            let highlighted =
                focused && app.ui.sidebar_cursor == Topology::ALL.len() + position;
            let name = app
                .model_name(&slot.selected_model_id)
                .unwrap_or(UNKNOWN_MODEL)
                .to_string();
            let (switch, switch_color) = if slot.enabled {
                ("[ON] ", colors::SWITCH_ON)
            } else {
                ("[OFF]", colors::SWITCH_OFF)
            };
            let name_style = if slot.enabled {
                row_style(highlighted)
            } else {
                row_style(highlighted).fg(colors::TEXT_MUTED)
            };

            Line::from(vec![
                Span::raw(if highlighted { "▶ " } else { "  " }),
                Span::styled(switch, Style::default().fg(switch_color)),
                Span::styled(
                    format!(" Model {} ", position + 1),
                    Style::default().fg(colors::TEXT_DIM),
                ),
                Span::styled(name, name_style),
            ])
        })
        .collect()
}

/// Render the configuration sidebar
pub fn render_sidebar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Sidebar;
    let border_color = if focused {
        colors::BORDER_FOCUSED
    } else {
        colors::BORDER
    };
    let block = Block::default()
        .title(" Configuration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(colors::SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let mut lines = vec![section_title("Topology")];
    lines.extend(topology_lines(app, focused));
    lines.push(Line::from(""));
    lines.push(section_title("Model Assignment"));
    lines.extend(slot_lines(app, focused));

    frame.render_widget(Paragraph::new(lines), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER, Style::default().fg(colors::TEXT_MUTED)))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}
