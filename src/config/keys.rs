//! Keybinding configuration

use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Show or hide the configuration sidebar
    ToggleConfig,
    /// Cycle to the next topology
    CycleTopology,
    /// Re-fetch the available models
    RefreshModels,
    /// Select topology / open model picker / toggle trace
    Activate,
    /// Enable or disable the highlighted slot
    ToggleSlot,
    /// Move the highlighted slot up
    MoveSlotUp,
    /// Move the highlighted slot down
    MoveSlotDown,
    /// Focus the next pane
    FocusNext,
    /// Focus the previous pane
    FocusPrev,
    /// Highlight the next item in the focused pane
    NextItem,
    /// Highlight the previous item in the focused pane
    PrevItem,
    /// Scroll the chat history up
    ScrollUp,
    /// Scroll the chat history down
    ScrollDown,
    /// Scroll to the oldest message
    ScrollTop,
    /// Scroll to the newest message
    ScrollBottom,
    /// Show help
    Help,
    /// Quit application
    Quit,
    /// Cancel current operation / return to the input box
    Cancel,
}

/// Categories for grouping actions in help display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGroup {
    /// Chat session actions
    Chat,
    /// Topology and slot configuration actions
    Configuration,
    /// Focus and scrolling actions
    Navigation,
    /// Miscellaneous actions
    Other,
    /// Actions not shown in help
    Hidden,
}

impl ActionGroup {
    /// Get the display title for this group
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Configuration => "Configuration",
            Self::Navigation => "Navigation",
            Self::Other => "Other",
            Self::Hidden => "",
        }
    }
}

impl Action {
    /// Get the display description for this action
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ToggleConfig => "Show/hide config sidebar",
            Self::CycleTopology => "Cycle topology",
            Self::RefreshModels => "Refresh models",
            Self::Activate => "Select / pick model / toggle trace",
            Self::ToggleSlot => "Enable/disable slot",
            Self::MoveSlotUp => "Move slot up",
            Self::MoveSlotDown => "Move slot down",
            Self::FocusNext => "Focus next pane",
            Self::FocusPrev => "Focus previous pane",
            Self::NextItem => "Select next",
            Self::PrevItem => "Select previous",
            Self::ScrollUp => "Scroll up",
            Self::ScrollDown => "Scroll down",
            Self::ScrollTop => "Scroll to top",
            Self::ScrollBottom => "Scroll to bottom",
            Self::Help => "Show this help",
            Self::Quit => "Quit",
            Self::Cancel => "Back to input",
        }
    }

    /// Get the group this action belongs to
    #[must_use]
    pub const fn group(self) -> ActionGroup {
        match self {
            Self::ToggleConfig | Self::CycleTopology | Self::RefreshModels => ActionGroup::Chat,
            Self::Activate | Self::ToggleSlot | Self::MoveSlotUp | Self::MoveSlotDown => {
                ActionGroup::Configuration
            }
            Self::FocusNext
            | Self::FocusPrev
            | Self::NextItem
            | Self::PrevItem
            | Self::ScrollUp
            | Self::ScrollDown
            | Self::ScrollTop
            | Self::ScrollBottom => ActionGroup::Navigation,
            Self::Help | Self::Quit => ActionGroup::Other,
            Self::Cancel => ActionGroup::Hidden,
        }
    }

    /// All actions in display order for help
    pub const ALL_FOR_HELP: &'static [Self] = &[
        // Chat
        Self::ToggleConfig,
        Self::CycleTopology,
        Self::RefreshModels,
        // Configuration
        Self::Activate,
        Self::ToggleSlot,
        Self::MoveSlotUp,
        Self::MoveSlotDown,
        // Navigation
        Self::FocusNext,
        Self::FocusPrev,
        Self::NextItem,
        Self::PrevItem,
        Self::ScrollUp,
        Self::ScrollDown,
        Self::ScrollTop,
        Self::ScrollBottom,
        // Other
        Self::Help,
        Self::Quit,
    ];
}

/// Keybinding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Map of key strings to actions (for serialization)
    bindings: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert("Ctrl+b".to_string(), Action::ToggleConfig);
        bindings.insert("Ctrl+t".to_string(), Action::CycleTopology);
        bindings.insert("Ctrl+r".to_string(), Action::RefreshModels);
        bindings.insert("Enter".to_string(), Action::Activate);
        bindings.insert(" ".to_string(), Action::ToggleSlot);
        bindings.insert("K".to_string(), Action::MoveSlotUp);
        bindings.insert("Shift+Up".to_string(), Action::MoveSlotUp);
        bindings.insert("J".to_string(), Action::MoveSlotDown);
        bindings.insert("Shift+Down".to_string(), Action::MoveSlotDown);
        bindings.insert("Tab".to_string(), Action::FocusNext);
        bindings.insert("BackTab".to_string(), Action::FocusPrev);
        bindings.insert("Shift+BackTab".to_string(), Action::FocusPrev);
        bindings.insert("j".to_string(), Action::NextItem);
        bindings.insert("Down".to_string(), Action::NextItem);
        bindings.insert("k".to_string(), Action::PrevItem);
        bindings.insert("Up".to_string(), Action::PrevItem);
        bindings.insert("PageUp".to_string(), Action::ScrollUp);
        bindings.insert("Ctrl+u".to_string(), Action::ScrollUp);
        bindings.insert("PageDown".to_string(), Action::ScrollDown);
        bindings.insert("Ctrl+d".to_string(), Action::ScrollDown);
        bindings.insert("g".to_string(), Action::ScrollTop);
        bindings.insert("G".to_string(), Action::ScrollBottom);
        bindings.insert("?".to_string(), Action::Help);
        bindings.insert("F1".to_string(), Action::Help);
        bindings.insert("q".to_string(), Action::Quit);
        bindings.insert("Ctrl+c".to_string(), Action::Quit);
        bindings.insert("Esc".to_string(), Action::Cancel);

        Self { bindings }
    }
}

impl KeyBindings {
    /// Merge in any missing default keybindings
    ///
    /// This ensures that new keybindings added in updates are available
    /// even if the user has an older saved config.
    pub fn merge_defaults(&mut self) {
        let defaults = Self::default();
        for (key, action) in defaults.bindings {
            self.bindings.entry(key).or_insert(action);
        }
    }

    /// Get the action for a key event
    #[must_use]
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let key_str = key_to_string(code, modifiers);
        self.bindings.get(&key_str).copied()
    }

    /// Set a keybinding
    pub fn set(&mut self, key: &str, action: Action) {
        self.bindings.insert(key.to_string(), action);
    }

    /// Get all bindings for an action, simplest keys first
    #[must_use]
    pub fn keys_for_action(&self, action: Action) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter_map(|(k, &v)| if v == action { Some(k.clone()) } else { None })
            .collect();
        // Prefer single chars over multi-char keys
        keys.sort_by(|a, b| {
            let a_simple = a.chars().count() == 1;
            let b_simple = b.chars().count() == 1;
            match (a_simple, b_simple) {
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                _ => a.cmp(b),
            }
        });
        keys
    }

    /// Format key(s) for an action for display (e.g., "j/Down")
    #[must_use]
    pub fn format_keys(&self, action: Action) -> String {
        self.keys_for_action(action)
            .iter()
            .map(|k| {
                if k == " " {
                    "Space".to_string()
                } else {
                    k.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Generate a formatted help line for an action: "  keys    description"
    #[must_use]
    pub fn help_line(&self, action: Action) -> String {
        let keys = self.format_keys(action);
        format!("  {keys:<18} {}", action.description())
    }

    /// Generate status bar hint text
    #[must_use]
    pub fn status_hints(&self) -> String {
        let hints = [
            (Action::ToggleConfig, "config"),
            (Action::FocusNext, "focus"),
            (Action::CycleTopology, "topology"),
            (Action::Help, "help"),
            (Action::Quit, "quit"),
        ];

        hints
            .iter()
            .map(|(action, label)| {
                let key = self
                    .keys_for_action(*action)
                    .into_iter()
                    .find(|k| k.starts_with("Ctrl") || k.chars().count() > 1)
                    .unwrap_or_default();
                format!("[{key}]{label}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Convert a key code and modifiers to a string representation
#[must_use]
pub fn key_to_string(code: KeyCode, modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
        parts.push("Shift".to_string());
    }

    let key_part = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return String::new(),
    };

    parts.push(key_part);
    parts.join("+")
}
