//! Action handlers for the application
//!
//! `Actions` turns keybinding actions into state changes and owns the
//! background worker that talks to the backend.

use super::state::{App, Focus, Mode, Request};
use super::worker::{Worker, WorkerEvent};
use crate::client::fallback::{mock_answer, stub_models};
use crate::client::{Backend, ModelList, ModelSource};
use crate::config::Action;
use std::sync::Arc;
use tracing::{info, warn};

/// Handler for application actions
#[derive(Debug)]
pub struct Actions {
    worker: Worker,
}

impl Actions {
    /// Create a handler sending calls to `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            worker: Worker::new(backend),
        }
    }

    /// Kick off the startup model fetch
    pub fn start(&self, app: &mut App) {
        self.refresh_models(app);
    }

    /// Handle a keybinding action
    pub fn handle_action(&self, app: &mut App, action: Action) {
        match action {
            Action::ToggleConfig => app.toggle_config(),
            Action::CycleTopology => app.cycle_topology(),
            Action::RefreshModels => self.refresh_models(app),
            Action::Activate => {
                if app.focus == Focus::Input {
                    self.submit(app);
                } else {
                    app.activate();
                }
            }
            Action::ToggleSlot => app.toggle_selected_slot(),
            Action::MoveSlotUp => app.move_selected_slot_up(),
            Action::MoveSlotDown => app.move_selected_slot_down(),
            Action::FocusNext => app.focus_next(),
            Action::FocusPrev => app.focus_prev(),
            Action::NextItem => app.select_next(),
            Action::PrevItem => app.select_prev(),
            Action::ScrollUp => {
                let page = app.ui.page_size();
                app.ui.scroll_up(page);
            }
            Action::ScrollDown => {
                let page = app.ui.page_size();
                app.ui.scroll_down(page);
            }
            Action::ScrollTop => app.ui.scroll_to_top(),
            Action::ScrollBottom => app.ui.scroll_to_bottom(),
            Action::Help => app.show_help(),
            Action::Quit => app.should_quit = true,
            Action::Cancel => {
                if app.mode == Mode::Normal {
                    app.focus = Focus::Input;
                } else {
                    app.exit_mode();
                }
            }
        }
    }

    /// Send the typed prompt, if sending is allowed.
    ///
    /// If the background task cannot start, the prompt is answered in mock
    /// mode right away.
    pub fn submit(&self, app: &mut App) {
        if let Some(job) = app.submit_input() {
            let prompt = job.prompt.clone();
            let active = job.active.clone();
            if !self.worker.submit(job) {
                warn!("Run could not start, answering in mock mode");
                app.apply_answer(mock_answer(&prompt, &active));
            }
        } else if !app.input.is_blank() {
            match app.request {
                Request::Running => app.ui.set_status("Waiting for the previous answer"),
                Request::LoadingModels => app.ui.set_status("Waiting for the model list"),
                Request::Idle if app.slots.active_count() == 0 => {
                    app.ui.set_status("Enable at least one model to send");
                }
                Request::Idle => {}
            }
        }
    }

    /// Re-fetch the available models unless a call is already in flight.
    ///
    /// If the background task cannot start, the stub models are used.
    pub fn refresh_models(&self, app: &mut App) {
        match app.request {
            Request::LoadingModels => return,
            Request::Running => {
                app.ui.set_status("Waiting for the previous answer");
                return;
            }
            Request::Idle => {}
        }
        app.request = Request::LoadingModels;
        app.ui.set_status("Loading models…");
        if !self.worker.fetch_models() {
            app.apply_models(ModelList {
                models: stub_models(),
                source: ModelSource::Stub,
            });
        }
    }

    /// Apply every finished background call. Returns whether any arrived.
    pub fn poll(&self, app: &mut App) -> bool {
        let mut changed = false;
        while let Some(event) = self.worker.try_recv() {
            Self::apply(app, event);
            changed = true;
        }
        changed
    }

    fn apply(app: &mut App, event: WorkerEvent) {
        match event {
            WorkerEvent::Models(list) => {
                info!(count = list.models.len(), source = ?list.source, "Models loaded");
                app.apply_models(list);
            }
            WorkerEvent::Answer(answer) => {
                info!(source = ?answer.source, "Answer received");
                app.apply_answer(answer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AnswerSource, LocalBackend};
    use crate::topology::Topology;
    use std::io;
    use std::time::Duration;

    fn handler() -> Actions {
        Actions::new(Arc::new(LocalBackend::new()))
    }

    /// Block until the next background result and apply it
    fn settle(handler: &Actions, app: &mut App) -> bool {
        handler
            .worker
            .wait(Duration::from_secs(5))
            .map(|event| Actions::apply(app, event))
            .is_some()
    }

    fn started_app(handler: &Actions) -> App {
        let mut app = App::default();
        handler.start(&mut app);
        assert!(app.is_loading_models());
        assert!(settle(handler, &mut app));
        app
    }

    #[test]
    fn test_start_loads_models() {
        let handler = handler();
        let app = started_app(&handler);
        assert_eq!(app.request, Request::Idle);
        assert_eq!(app.model_source, Some(ModelSource::Backend));
        assert_eq!(app.slots.len(), 5);
    }

    #[test]
    fn test_refresh_ignored_while_loading() {
        let handler = handler();
        let mut app = App::default();
        app.request = Request::LoadingModels;
        handler.handle_action(&mut app, Action::RefreshModels);
        assert!(handler.worker.wait(Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_submit_round_trip() {
        let handler = handler();
        let mut app = started_app(&handler);
        app.set_topology(Topology::StandardChain);
        app.input.set("explain ledgers");

        handler.handle_action(&mut app, Action::Activate);
        assert!(app.is_running());
        assert!(settle(&handler, &mut app));
        assert_eq!(app.request, Request::Idle);

        let answer = app.conversation.last();
        assert_eq!(answer.and_then(|m| m.source), Some(AnswerSource::Local));
        assert_eq!(
            answer
                .and_then(|m| m.header_stack.as_ref())
                .map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn test_submit_while_pending_sets_status() {
        let handler = handler();
        let mut app = started_app(&handler);
        app.request = Request::Running;
        app.input.set("again");
        handler.submit(&mut app);
        assert_eq!(
            app.ui.status_message.as_deref(),
            Some("Waiting for the previous answer")
        );
        assert_eq!(app.input.buffer, "again");
    }

    #[test]
    fn test_activate_outside_input_does_not_submit() {
        let handler = handler();
        let mut app = started_app(&handler);
        app.focus = Focus::Sidebar;
        app.input.set("not yet");
        handler.handle_action(&mut app, Action::Activate);
        assert!(!app.is_running());
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn test_cancel_returns_focus_then_closes_modal() {
        let handler = handler();
        let mut app = started_app(&handler);
        app.focus = Focus::History;
        handler.handle_action(&mut app, Action::Cancel);
        assert_eq!(app.focus, Focus::Input);

        handler.handle_action(&mut app, Action::Help);
        assert_eq!(app.mode, Mode::Help);
        handler.handle_action(&mut app, Action::Cancel);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_simple_actions() {
        let handler = handler();
        let mut app = App::default();
        handler.handle_action(&mut app, Action::ToggleConfig);
        assert!(!app.config_open);
        handler.handle_action(&mut app, Action::CycleTopology);
        assert_eq!(app.topology, Topology::StandardChain);
        handler.handle_action(&mut app, Action::ScrollTop);
        assert!(!app.ui.follow);
        handler.handle_action(&mut app, Action::ScrollBottom);
        assert!(app.ui.follow);
        handler.handle_action(&mut app, Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_poll_without_results() {
        let handler = handler();
        let mut app = App::default();
        assert!(!handler.poll(&mut app));
    }

    #[test]
    fn test_refresh_blocked_while_running() {
        let handler = handler();
        let mut app = started_app(&handler);
        app.request = Request::Running;
        handler.refresh_models(&mut app);
        assert_eq!(app.request, Request::Running);
        assert_eq!(
            app.ui.status_message.as_deref(),
            Some("Waiting for the previous answer")
        );
        assert!(handler.worker.wait(Duration::from_millis(100)).is_none());
    }

    fn refuse(_name: &str, task: Box<dyn FnOnce() + Send>) -> io::Result<()> {
        drop(task);
        Err(io::Error::other("thread limit reached"))
    }

    fn refusing_handler() -> Actions {
        Actions {
            worker: Worker::with_spawner(Arc::new(LocalBackend::new()), refuse),
        }
    }

    #[test]
    fn test_refresh_without_thread_uses_stub_models() {
        let handler = refusing_handler();
        let mut app = App::default();
        handler.start(&mut app);

        assert_eq!(app.request, Request::Idle);
        assert_eq!(app.model_source, Some(ModelSource::Stub));
        assert_eq!(app.models, stub_models());
        assert_eq!(app.slots.len(), 5);
    }

    #[test]
    fn test_submit_without_thread_answers_in_mock_mode() {
        let handler = refusing_handler();
        let mut app = App::default();
        handler.start(&mut app);

        app.input.set("still there?");
        handler.submit(&mut app);
        assert_eq!(app.request, Request::Idle);
        assert_eq!(app.conversation.len(), 2);
        let answer = app.conversation.last();
        assert_eq!(answer.and_then(|m| m.source), Some(AnswerSource::Mock));
        assert_eq!(
            answer
                .and_then(|m| m.header_stack.as_ref())
                .map(|layers| layers[0].response.clone()),
            Some("[grok] still there?…".to_string())
        );

        // Sending keeps working afterwards
        app.input.set("again");
        handler.submit(&mut app);
        assert_eq!(app.conversation.len(), 4);
    }
}
