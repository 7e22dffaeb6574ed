//! Focus, sidebar and history navigation

use super::{App, Focus, Mode};
use crate::topology::Topology;

/// A selectable row of the configuration sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    /// A topology choice
    Topology(Topology),
    /// A model slot, by position
    Slot(usize),
}

impl App {
    /// Number of selectable sidebar rows
    #[must_use]
    pub fn sidebar_len(&self) -> usize {
        Topology::ALL.len() + self.slots.len()
    }

    /// Row under the sidebar cursor
    #[must_use]
    pub fn sidebar_row(&self) -> Option<SidebarRow> {
        let cursor = self.ui.sidebar_cursor;
        Topology::ALL.get(cursor).map_or_else(
            || {
                let slot = cursor - Topology::ALL.len();
                (slot < self.slots.len()).then_some(SidebarRow::Slot(slot))
            },
            |&t| Some(SidebarRow::Topology(t)),
        )
    }

    /// Move focus to the next pane, skipping the hidden sidebar
    pub const fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::History,
            Focus::History if self.config_open => Focus::Sidebar,
            Focus::History | Focus::Sidebar => Focus::Input,
        };
    }

    /// Move focus to the previous pane, skipping the hidden sidebar
    pub const fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.config_open => Focus::Sidebar,
            Focus::Input | Focus::Sidebar => Focus::History,
            Focus::History => Focus::Input,
        };
    }

    /// Move the highlight in the focused pane down
    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let len = self.sidebar_len();
                if len > 0 {
                    self.ui.sidebar_cursor = (self.ui.sidebar_cursor + 1) % len;
                }
            }
            Focus::History => self.select_next_message(),
            Focus::Input => {}
        }
    }

    /// Move the highlight in the focused pane up
    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let len = self.sidebar_len();
                if len > 0 {
                    self.ui.sidebar_cursor = self
                        .ui
                        .sidebar_cursor
                        .checked_sub(1)
                        .unwrap_or(len - 1);
                }
            }
            Focus::History => self.select_prev_message(),
            Focus::Input => {}
        }
    }

    fn select_next_message(&mut self) {
        let count = self.conversation.len();
        if count == 0 {
            return;
        }
        self.ui.selected_message = Some(
            self.ui
                .selected_message
                .map_or(count - 1, |i| (i + 1).min(count - 1)),
        );
    }

    fn select_prev_message(&mut self) {
        let count = self.conversation.len();
        if count == 0 {
            return;
        }
        self.ui.selected_message = Some(
            self.ui
                .selected_message
                .map_or(count - 1, |i| i.saturating_sub(1)),
        );
    }

    /// Act on the highlighted item of the focused pane.
    ///
    /// In the sidebar this selects a topology or opens the model picker for
    /// a slot. In the history it collapses or expands the highlighted trace.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Sidebar => match self.sidebar_row() {
                Some(SidebarRow::Topology(topology)) => self.set_topology(topology),
                Some(SidebarRow::Slot(index)) => self.open_picker(index),
                None => {}
            },
            Focus::History => {
                let Some(id) = self
                    .ui
                    .selected_message
                    .and_then(|i| self.conversation.get(i))
                    .map(|m| m.id)
                else {
                    return;
                };
                if self.conversation.toggle_trace(id).is_none() {
                    self.ui.set_status("No reasoning trace for this message");
                }
            }
            Focus::Input => {}
        }
    }

    /// Enable or disable the highlighted slot
    pub fn toggle_selected_slot(&mut self) {
        if let Some(SidebarRow::Slot(index)) = self.sidebar_row() {
            let Some(id) = self.slots.get(index).map(|s| s.id.clone()) else {
                return;
            };
            self.slots.toggle(&id);
        }
    }

    /// Move the highlighted slot one position up, keeping it highlighted
    pub fn move_selected_slot_up(&mut self) {
        if let Some(SidebarRow::Slot(index)) = self.sidebar_row()
            && let Some(target) = self.slots.move_up(index)
        {
            self.ui.sidebar_cursor = Topology::ALL.len() + target;
        }
    }

    /// Move the highlighted slot one position down, keeping it highlighted
    pub fn move_selected_slot_down(&mut self) {
        if let Some(SidebarRow::Slot(index)) = self.sidebar_row()
            && let Some(target) = self.slots.move_down(index)
        {
            self.ui.sidebar_cursor = Topology::ALL.len() + target;
        }
    }

    /// Show the help overlay
    pub fn show_help(&mut self) {
        self.enter_mode(Mode::Help);
    }
}
