//! Header bar: title, subtitle, version badge and sidebar hint

use crate::app::App;
use crate::config::Action;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::colors;

/// Title shown in the header
pub const TITLE: &str = "MAIRE";

/// Subtitle shown in the header and the welcome panel
pub const SUBTITLE: &str = "Multi-Anchor Immutable Reasoning Engine";

/// Render the header bar
pub fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = Line::from(vec![
        Span::styled(
            format!(" {TITLE} "),
            Style::default()
                .fg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(colors::SURFACE).bg(colors::ACCENT_SOFT),
        ),
        Span::styled(
            format!("  {SUBTITLE}"),
            Style::default().fg(colors::TEXT_DIM),
        ),
    ]);

    let verb = if app.config_open { "hide" } else { "show" };
    let hint = format!(
        "{} [{}] {verb} config ",
        app.topology.label(),
        app.config.keys.format_keys(Action::ToggleConfig)
    );
    let hint_width = u16::try_from(hint.chars().count())
        .unwrap_or(0)
        .min(inner.width);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hint_width)])
        .split(inner);

    frame.render_widget(Paragraph::new(title), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(colors::TEXT_MUTED)))
            .alignment(Alignment::Right),
        chunks[1],
    );
}
