//! Application state
//!
//! This module contains the main `App` struct and its sub-states,
//! organized into focused modules by domain.

mod conversation;
mod input;
mod navigation;
mod picker;
mod slots;
mod ui;

pub use conversation::{Conversation, Message, Role};
pub use input::InputState;
pub use navigation::SidebarRow;
pub use picker::ModelPickerState;
pub use slots::{ModelSlot, SlotBoard};
pub use ui::UiState;

use crate::client::{ActiveSlot, Answer, AnswerSource, AvailableModel, ModelList, ModelSource};
use crate::config::Config;
use crate::topology::Topology;
use tracing::{debug, info};

/// A prompt ready to be sent, captured at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunJob {
    /// Trimmed prompt text
    pub prompt: String,
    /// Topology selected when the prompt was sent
    pub topology: Topology,
    /// Enabled slots in order
    pub active: Vec<ActiveSlot>,
}

/// Backend call in flight. At most one runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Request {
    /// Nothing in flight
    #[default]
    Idle,
    /// The model listing is in flight
    LoadingModels,
    /// A run request is in flight
    Running,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Selected topology
    pub topology: Topology,

    /// Models offered for slot assignment
    pub models: Vec<AvailableModel>,

    /// Where `models` came from, once loaded
    pub model_source: Option<ModelSource>,

    /// Model slot assignments
    pub slots: SlotBoard,

    /// Message history
    pub conversation: Conversation,

    /// Whether the configuration sidebar is visible
    pub config_open: bool,

    /// Pane receiving navigation keys
    pub focus: Focus,

    /// Current application mode
    pub mode: Mode,

    /// Chat input buffer
    pub input: InputState,

    /// Model picker state
    pub picker: ModelPickerState,

    /// UI state (cursors, scrolling, status)
    pub ui: UiState,

    /// Backend call in flight
    pub request: Request,

    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application from the given config
    #[must_use]
    pub fn new(config: Config) -> Self {
        let topology = config.default_topology;
        Self {
            config,
            topology,
            models: Vec::new(),
            model_source: None,
            slots: SlotBoard::new(),
            conversation: Conversation::new(),
            config_open: true,
            focus: Focus::Input,
            mode: Mode::Normal,
            input: InputState::new(),
            picker: ModelPickerState::new(),
            ui: UiState::new(),
            request: Request::Idle,
            should_quit: false,
        }
    }

    /// Install a fetched model list and create the slots on first load
    pub fn apply_models(&mut self, list: ModelList) {
        if self.request == Request::LoadingModels {
            self.request = Request::Idle;
        }
        self.models = list.models;
        self.model_source = Some(list.source);
        if self
            .slots
            .initialize(&self.models, self.config.slot_count, self.config.enabled_slots)
        {
            info!(slots = self.slots.len(), "Initialized model slots");
        }
        match list.source {
            ModelSource::Backend => {
                self.ui.set_status(format!("Loaded {} models", self.models.len()));
            }
            ModelSource::Stub => self.ui.set_status("MAIRE unreachable, using stub models"),
        }
    }

    /// Select a topology
    pub fn set_topology(&mut self, topology: Topology) {
        debug!(%topology, "Topology selected");
        self.topology = topology;
    }

    /// Switch to the next topology
    pub fn cycle_topology(&mut self) {
        self.set_topology(self.topology.next());
    }

    /// Show or hide the configuration sidebar
    pub fn toggle_config(&mut self) {
        self.config_open = !self.config_open;
        if !self.config_open && self.focus == Focus::Sidebar {
            self.focus = Focus::Input;
        }
    }

    /// Whether a run request is in flight
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.request == Request::Running
    }

    /// Whether the model listing is in flight
    #[must_use]
    pub fn is_loading_models(&self) -> bool {
        self.request == Request::LoadingModels
    }

    /// Whether a prompt may be sent right now
    #[must_use]
    pub fn can_send(&self) -> bool {
        self.slots.active_count() > 0 && self.request == Request::Idle
    }

    /// Take the input as a prompt.
    ///
    /// Blank input, no enabled slot or a call in flight leave everything
    /// untouched and return `None`. Otherwise the user message is recorded,
    /// the input is cleared and the job to run is returned.
    pub fn submit_input(&mut self) -> Option<RunJob> {
        if self.input.is_blank() || !self.can_send() {
            return None;
        }
        let prompt = self.input.trimmed().to_string();
        self.conversation.push_user(prompt.clone());
        self.input.clear();
        self.request = Request::Running;
        self.ui.scroll_to_bottom();
        self.ui.clear_status();
        Some(RunJob {
            prompt,
            topology: self.topology,
            active: self.slots.active_slots(),
        })
    }

    /// Record the answer to the prompt in flight
    pub fn apply_answer(&mut self, answer: Answer) {
        if self.request == Request::Running {
            self.request = Request::Idle;
        }
        if answer.source == AnswerSource::Mock {
            self.ui.set_status("MAIRE unreachable, answered in mock mode");
        }
        self.conversation
            .push_assistant(answer.content, answer.header_stack, answer.source);
        self.ui.scroll_to_bottom();
    }

    /// Display name of a model id, if the model is known
    #[must_use]
    pub fn model_name(&self, model_id: &str) -> Option<&str> {
        self.models
            .iter()
            .find(|m| m.id == model_id)
            .map(|m| m.name.as_str())
    }

    /// Enter a mode
    pub const fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Return to normal mode, closing any modal
    pub fn exit_mode(&mut self) {
        if self.mode == Mode::ModelPicker {
            self.picker.clear();
        }
        self.mode = Mode::Normal;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Chatting and navigating
    #[default]
    Normal,
    /// Showing the help overlay
    Help,
    /// Choosing a model for a slot
    ModelPicker,
}

/// Pane receiving navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The chat input box
    #[default]
    Input,
    /// The message history
    History,
    /// The configuration sidebar
    Sidebar,
}

#[cfg(test)]
mod tests;
