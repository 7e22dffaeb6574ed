//! Mode- and focus-specific key handling

use crate::app::{Actions, App, Focus, Mode};
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

/// Handle a key press based on the current mode and focus
pub fn handle_key_event(app: &mut App, actions: &Actions, code: KeyCode, modifiers: KeyModifiers) {
    match app.mode {
        // Any key closes help
        Mode::Help => app.exit_mode(),
        Mode::ModelPicker => handle_picker_key(app, code, modifiers),
        Mode::Normal => {
            if app.focus == Focus::Input && handle_text_key(app, code, modifiers) {
                return;
            }
            dispatch_binding(app, actions, code, modifiers);
        }
    }
}

fn dispatch_binding(app: &mut App, actions: &Actions, code: KeyCode, modifiers: KeyModifiers) {
    if let Some(action) = app.config.keys.get_action(code, modifiers) {
        actions.handle_action(app, action);
    }
}

/// Edit the input buffer. Returns `false` for keys that should go through
/// the keybindings instead.
fn handle_text_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let input = &mut app.input;

    match code {
        KeyCode::Enter if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            input.insert_newline();
        }
        KeyCode::Char('w') if ctrl => input.delete_word(),
        KeyCode::Char(c) if !ctrl && !alt => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.cursor_left(),
        KeyCode::Right => input.cursor_right(),
        KeyCode::Home => input.cursor_home(),
        KeyCode::End => input.cursor_end(),
        KeyCode::Up if input.line_count() > 1 => input.cursor_up(),
        KeyCode::Down if input.line_count() > 1 => input.cursor_down(),
        _ => return false,
    }
    true
}

fn handle_picker_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let code = match code {
        KeyCode::Char('p') if ctrl => KeyCode::Up,
        KeyCode::Char('n') if ctrl => KeyCode::Down,
        KeyCode::Char('c') if ctrl => KeyCode::Esc,
        other => other,
    };
    match code {
        KeyCode::Esc => app.exit_mode(),
        KeyCode::Enter => app.confirm_picker(),
        KeyCode::Up | KeyCode::BackTab => app.picker_prev(),
        KeyCode::Down | KeyCode::Tab => app.picker_next(),
        KeyCode::Backspace => app.picker.handle_filter_backspace(),
        KeyCode::Char(c) if !ctrl => app.picker.handle_filter_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fallback::stub_models;
    use crate::client::{LocalBackend, ModelList, ModelSource};
    use crate::topology::Topology;
    use std::sync::Arc;

    fn setup() -> (App, Actions) {
        let mut app = App::default();
        app.apply_models(ModelList {
            models: stub_models(),
            source: ModelSource::Backend,
        });
        (app, Actions::new(Arc::new(LocalBackend::new())))
    }

    fn press(app: &mut App, actions: &Actions, code: KeyCode) {
        handle_key_event(app, actions, code, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, actions: &Actions, text: &str) {
        for c in text.chars() {
            press(app, actions, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_letters_type_into_input() {
        let (mut app, actions) = setup();
        type_text(&mut app, &actions, "quit? jk");
        assert_eq!(app.input.buffer, "quit? jk");
        assert!(!app.should_quit);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut app, actions) = setup();
        type_text(&mut app, &actions, "a");
        handle_key_event(&mut app, &actions, KeyCode::Enter, KeyModifiers::SHIFT);
        handle_key_event(&mut app, &actions, KeyCode::Enter, KeyModifiers::ALT);
        type_text(&mut app, &actions, "b");
        assert_eq!(app.input.buffer, "a\n\nb");
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn test_enter_sends() {
        let (mut app, actions) = setup();
        type_text(&mut app, &actions, "hello");
        press(&mut app, &actions, KeyCode::Enter);
        assert!(app.input.buffer.is_empty());
        assert_eq!(app.conversation.len(), 1);
        assert!(app.is_running());
    }

    #[test]
    fn test_enter_on_blank_input_does_nothing() {
        let (mut app, actions) = setup();
        type_text(&mut app, &actions, "  ");
        press(&mut app, &actions, KeyCode::Enter);
        assert_eq!(app.input.buffer, "  ");
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn test_ctrl_keys_reach_bindings() {
        let (mut app, actions) = setup();
        handle_key_event(&mut app, &actions, KeyCode::Char('b'), KeyModifiers::CONTROL);
        assert!(!app.config_open);
        handle_key_event(&mut app, &actions, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(app.topology, Topology::StandardChain);
        assert!(app.input.buffer.is_empty());
    }

    #[test]
    fn test_ctrl_w_deletes_word() {
        let (mut app, actions) = setup();
        type_text(&mut app, &actions, "one two");
        handle_key_event(&mut app, &actions, KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(app.input.buffer, "one ");
    }

    #[test]
    fn test_sidebar_navigation_keys() {
        let (mut app, actions) = setup();
        press(&mut app, &actions, KeyCode::Tab);
        press(&mut app, &actions, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Sidebar);

        // Down to the first slot, then disable it
        for _ in 0..3 {
            press(&mut app, &actions, KeyCode::Char('j'));
        }
        press(&mut app, &actions, KeyCode::Char(' '));
        assert_eq!(app.slots.active_count(), 2);

        handle_key_event(&mut app, &actions, KeyCode::Char('J'), KeyModifiers::SHIFT);
        assert_eq!(app.slots.get(1).map(|s| s.id.as_str()), Some("slot1"));

        press(&mut app, &actions, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_picker_flow() {
        let (mut app, actions) = setup();
        app.focus = Focus::Sidebar;
        app.ui.sidebar_cursor = 3;
        press(&mut app, &actions, KeyCode::Enter);
        assert_eq!(app.mode, Mode::ModelPicker);

        type_text(&mut app, &actions, "gpt");
        press(&mut app, &actions, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.slots.get(0).map(|s| s.selected_model_id.as_str()),
            Some("gpt-4")
        );
    }

    #[test]
    fn test_picker_escape_cancels() {
        let (mut app, actions) = setup();
        app.open_picker(0);
        press(&mut app, &actions, KeyCode::Down);
        press(&mut app, &actions, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.slots.get(0).map(|s| s.selected_model_id.as_str()),
            Some("grok")
        );
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let (mut app, actions) = setup();
        press(&mut app, &actions, KeyCode::F(1));
        assert_eq!(app.mode, Mode::Help);
        press(&mut app, &actions, KeyCode::Char('x'));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.input.buffer.is_empty());
    }

    #[test]
    fn test_quit_from_history_focus() {
        let (mut app, actions) = setup();
        app.focus = Focus::History;
        press(&mut app, &actions, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_input() {
        let (mut app, actions) = setup();
        handle_key_event(&mut app, &actions, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
