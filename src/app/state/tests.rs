use super::*;
use crate::client::fallback::{mock_answer, stub_models};
use crate::client::HeaderLayer;
use pretty_assertions::assert_eq;

fn loaded_app() -> App {
    let mut app = App::default();
    app.apply_models(ModelList {
        models: stub_models(),
        source: ModelSource::Backend,
    });
    app
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.input.insert_char(c);
    }
}

#[test]
fn test_app_new() {
    let app = App::default();
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.focus, Focus::Input);
    assert_eq!(app.topology, Topology::StarTopology);
    assert!(app.config_open);
    assert!(app.slots.is_empty());
    assert!(app.conversation.is_empty());
    assert_eq!(app.request, Request::Idle);
    assert!(!app.should_quit);
}

#[test]
fn test_app_uses_configured_topology() {
    let config = Config {
        default_topology: Topology::DoubleHelix,
        ..Config::default()
    };
    assert_eq!(App::new(config).topology, Topology::DoubleHelix);
}

#[test]
fn test_apply_models_initializes_slots_once() {
    let mut app = loaded_app();
    assert_eq!(app.slots.len(), 5);
    assert_eq!(app.slots.active_count(), 3);
    assert_eq!(app.model_source, Some(ModelSource::Backend));

    app.slots.toggle("slot1");
    app.apply_models(ModelList {
        models: vec![AvailableModel::new("o3", "O3")],
        source: ModelSource::Backend,
    });
    assert_eq!(app.slots.active_count(), 2);
    assert_eq!(app.models.len(), 1);
    assert_eq!(
        app.slots.get(1).map(|s| s.selected_model_id.as_str()),
        Some("grok")
    );
}

#[test]
fn test_apply_stub_models_sets_status() {
    let mut app = App::default();
    app.request = Request::LoadingModels;
    app.apply_models(ModelList {
        models: stub_models(),
        source: ModelSource::Stub,
    });
    assert_eq!(app.request, Request::Idle);
    assert!(
        app.ui
            .status_message
            .as_deref()
            .is_some_and(|s| s.contains("stub"))
    );
}

#[test]
fn test_submit_blank_input_is_noop() {
    let mut app = loaded_app();
    type_text(&mut app, "   \n ");
    assert_eq!(app.submit_input(), None);
    assert!(app.conversation.is_empty());
    assert_eq!(app.input.buffer, "   \n ");
    assert_eq!(app.request, Request::Idle);
}

#[test]
fn test_submit_trims_and_clears() {
    let mut app = loaded_app();
    app.slots.select_model("slot2", "claude");
    type_text(&mut app, "  What is truth?  ");

    let job = app.submit_input();
    assert_eq!(
        job,
        Some(RunJob {
            prompt: "What is truth?".to_string(),
            topology: Topology::StarTopology,
            active: vec![
                ActiveSlot {
                    position: 0,
                    model_id: "grok".to_string(),
                },
                ActiveSlot {
                    position: 1,
                    model_id: "claude".to_string(),
                },
                ActiveSlot {
                    position: 2,
                    model_id: "grok".to_string(),
                },
            ],
        })
    );
    assert!(app.input.buffer.is_empty());
    assert_eq!(app.request, Request::Running);
    assert_eq!(app.conversation.len(), 1);
    assert_eq!(
        app.conversation.last().map(|m| m.content.as_str()),
        Some("What is truth?")
    );
}

#[test]
fn test_submit_requires_enabled_slot() {
    let mut app = loaded_app();
    for id in ["slot1", "slot2", "slot3"] {
        app.slots.toggle(id);
    }
    type_text(&mut app, "hello");
    assert!(!app.can_send());
    assert_eq!(app.submit_input(), None);
    assert_eq!(app.input.buffer, "hello");
}

#[test]
fn test_submit_blocked_while_pending() {
    let mut app = loaded_app();
    type_text(&mut app, "first");
    assert!(app.submit_input().is_some());
    type_text(&mut app, "second");
    assert_eq!(app.submit_input(), None);
    assert_eq!(app.conversation.len(), 1);
    assert_eq!(app.input.buffer, "second");
}

#[test]
fn test_submit_blocked_while_loading_models() {
    let mut app = loaded_app();
    app.request = Request::LoadingModels;
    type_text(&mut app, "hello");
    assert!(!app.can_send());
    assert_eq!(app.submit_input(), None);
    assert_eq!(app.request, Request::LoadingModels);
}

#[test]
fn test_models_arriving_mid_run_keep_run_pending() {
    let mut app = loaded_app();
    type_text(&mut app, "hello");
    assert!(app.submit_input().is_some());
    app.apply_models(ModelList {
        models: stub_models(),
        source: ModelSource::Backend,
    });
    assert_eq!(app.request, Request::Running);
}

#[test]
fn test_apply_answer_clears_pending() {
    let mut app = loaded_app();
    type_text(&mut app, "hello");
    let job = app.submit_input();
    let active = job.map(|j| j.active).unwrap_or_default();

    app.apply_answer(mock_answer("hello", &active));
    assert_eq!(app.request, Request::Idle);
    assert_eq!(app.conversation.len(), 2);
    let last = app.conversation.last();
    assert_eq!(last.map(|m| m.role), Some(Role::Assistant));
    assert_eq!(last.map(Message::has_trace), Some(true));
    assert!(app.ui.follow);
}

#[test]
fn test_toggle_config_moves_focus_off_sidebar() {
    let mut app = loaded_app();
    app.focus = Focus::Sidebar;
    app.toggle_config();
    assert!(!app.config_open);
    assert_eq!(app.focus, Focus::Input);
    app.toggle_config();
    assert!(app.config_open);
}

#[test]
fn test_focus_cycle_skips_hidden_sidebar() {
    let mut app = loaded_app();
    app.focus_next();
    assert_eq!(app.focus, Focus::History);
    app.focus_next();
    assert_eq!(app.focus, Focus::Sidebar);
    app.focus_next();
    assert_eq!(app.focus, Focus::Input);

    app.toggle_config();
    app.focus_next();
    app.focus_next();
    assert_eq!(app.focus, Focus::Input);
    app.focus_prev();
    assert_eq!(app.focus, Focus::History);
}

#[test]
fn test_sidebar_rows() {
    let mut app = loaded_app();
    app.focus = Focus::Sidebar;
    assert_eq!(app.sidebar_len(), 8);
    assert_eq!(
        app.sidebar_row(),
        Some(SidebarRow::Topology(Topology::StandardChain))
    );
    app.select_prev();
    assert_eq!(app.sidebar_row(), Some(SidebarRow::Slot(4)));
    app.select_next();
    app.select_next();
    app.select_next();
    assert_eq!(
        app.sidebar_row(),
        Some(SidebarRow::Topology(Topology::StarTopology))
    );
}

#[test]
fn test_activate_topology_row() {
    let mut app = loaded_app();
    app.focus = Focus::Sidebar;
    app.ui.sidebar_cursor = 1;
    app.activate();
    assert_eq!(app.topology, Topology::DoubleHelix);
}

#[test]
fn test_toggle_and_move_selected_slot() {
    let mut app = loaded_app();
    app.focus = Focus::Sidebar;
    app.ui.sidebar_cursor = 3 + 3;
    app.toggle_selected_slot();
    assert_eq!(app.slots.active_count(), 4);

    app.move_selected_slot_up();
    assert_eq!(app.ui.sidebar_cursor, 5);
    assert_eq!(app.slots.get(2).map(|s| s.id.as_str()), Some("slot4"));

    app.ui.sidebar_cursor = 3 + 4;
    app.move_selected_slot_down();
    assert_eq!(app.ui.sidebar_cursor, 7);
}

#[test]
fn test_picker_assigns_model() {
    let mut app = loaded_app();
    app.focus = Focus::Sidebar;
    app.ui.sidebar_cursor = 3 + 1;
    app.activate();
    assert_eq!(app.mode, Mode::ModelPicker);
    assert_eq!(app.picker.slot_id.as_deref(), Some("slot2"));

    app.picker.handle_filter_char('c');
    app.confirm_picker();
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.slots.active_model_ids(), vec!["grok", "claude", "grok"]);
    assert!(app.picker.slot_id.is_none());
}

#[test]
fn test_picker_cancel_keeps_model() {
    let mut app = loaded_app();
    app.open_picker(0);
    app.picker_next();
    app.exit_mode();
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(
        app.slots.get(0).map(|s| s.selected_model_id.as_str()),
        Some("grok")
    );
}

#[test]
fn test_open_picker_without_models() {
    let mut app = App::default();
    app.open_picker(0);
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn test_history_selection_and_trace_toggle() {
    let mut app = loaded_app();
    app.conversation.push_user("q");
    let id = app.conversation.push_assistant(
        "a",
        Some(vec![HeaderLayer {
            model: "Model 1".to_string(),
            response: "r".to_string(),
        }]),
        AnswerSource::Remote,
    );
    app.focus = Focus::History;

    app.select_next();
    assert_eq!(app.ui.selected_message, Some(1));
    app.activate();
    assert!(!app.conversation.is_trace_expanded(id));

    app.select_prev();
    assert_eq!(app.ui.selected_message, Some(0));
    app.activate();
    assert_eq!(
        app.ui.status_message.as_deref(),
        Some("No reasoning trace for this message")
    );
}

#[test]
fn test_model_name() {
    let app = loaded_app();
    assert_eq!(app.model_name("claude"), Some("Claude (Stub)"));
    assert_eq!(app.model_name("missing"), None);
}
