//! TUI rendering
//!
//! This module contains all rendering logic for the TUI, organized into:
//! - `colors`: Color palette definitions
//! - `header`: Title bar
//! - `sidebar`: Topology and model slot configuration
//! - `chat`: Message history and input box
//! - `modals`: Help and model picker overlays

pub mod chat;
pub mod colors;
pub mod header;
pub mod modals;
pub mod sidebar;

use crate::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

/// Render the full application UI
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render_header(frame, app, chunks[0]);

    let chat_area = if app.config_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar::SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);
        sidebar::render_sidebar(frame, app, columns[0]);
        columns[1]
    } else {
        chunks[1]
    };
    chat::render_chat(frame, app, chat_area);
    render_status_bar(frame, app, chunks[2]);

    match app.mode {
        Mode::Normal => {}
        Mode::Help => modals::render_help_overlay(frame, app),
        Mode::ModelPicker => modals::render_model_picker_overlay(frame, app),
    }
}

/// Render the bottom status bar
pub fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let left = if app.is_running() {
        Span::styled(
            " waiting for MAIRE… ",
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    } else if let Some(status) = &app.ui.status_message {
        Span::styled(format!(" {status} "), Style::default().fg(colors::TEXT_PRIMARY))
    } else {
        Span::styled(
            format!(" {} ", app.config.endpoint),
            Style::default().fg(colors::TEXT_MUTED),
        )
    };

    let hints = app.config.keys.status_hints();
    let hints_width = u16::try_from(hints.chars().count().saturating_add(1))
        .unwrap_or(0)
        .min(area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hints_width)])
        .split(area);

    frame.render_widget(
        Paragraph::new(left).style(Style::default().bg(colors::SURFACE)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(colors::TEXT_DIM)))
            .style(Style::default().bg(colors::SURFACE))
            .alignment(Alignment::Right),
        chunks[1],
    );
}
