//! Terminal User Interface for MAIRE

mod input;
pub mod render;

pub use input::handle_key_event;

use crate::app::{Actions, App, Event, Handler};
use anyhow::Result;
use ratatui::crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{debug, info};

/// Run the TUI application until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to
pub fn run(mut app: App, actions: &Actions) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Without this, Shift+Enter arrives as a plain Enter
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    debug!(enhanced_keys, "Terminal keyboard support");
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = Handler::new(app.config.poll_interval_ms);
    actions.start(&mut app);
    info!("TUI started");

    let result = run_loop(&mut terminal, &mut app, &event_handler, actions);

    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("TUI stopped");

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &Handler,
    actions: &Actions,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick | Event::Resize(_, _) => {}
            Event::Key(key) => handle_key_event(app, actions, key.code, key.modifiers),
        }
        actions.poll(app);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
