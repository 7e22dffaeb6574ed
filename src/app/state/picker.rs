//! Model picker state: choosing the model of one slot

use super::{App, Mode};
use crate::client::AvailableModel;

/// State for the model picker modal
#[derive(Debug, Default, Clone)]
pub struct ModelPickerState {
    /// Slot whose model is being chosen
    pub slot_id: Option<String>,

    /// Current filter text
    pub filter: String,

    /// Selected index in the filtered list
    pub selected: usize,
}

impl ModelPickerState {
    /// Create an idle picker
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot_id: None,
            filter: String::new(),
            selected: 0,
        }
    }

    /// Open the picker for a slot, highlighting its current model
    pub fn start(&mut self, slot_id: &str, current_model: &str, models: &[AvailableModel]) {
        self.slot_id = Some(slot_id.to_string());
        self.filter.clear();
        self.selected = models
            .iter()
            .position(|m| m.id == current_model)
            .unwrap_or(0);
    }

    /// Models matching the filter by name or id (case-insensitive)
    #[must_use]
    pub fn filtered<'a>(&self, models: &'a [AvailableModel]) -> Vec<&'a AvailableModel> {
        let needle = self.filter.to_lowercase();
        models
            .iter()
            .filter(|m| {
                needle.is_empty()
                    || m.name.to_lowercase().contains(&needle)
                    || m.id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Highlight the next match, wrapping around
    pub fn select_next(&mut self, models: &[AvailableModel]) {
        let count = self.filtered(models).len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Highlight the previous match, wrapping around
    pub fn select_prev(&mut self, models: &[AvailableModel]) {
        let count = self.filtered(models).len();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// The highlighted model, if any match
    #[must_use]
    pub fn selected_model<'a>(&self, models: &'a [AvailableModel]) -> Option<&'a AvailableModel> {
        self.filtered(models).get(self.selected).copied()
    }

    /// Append to the filter
    pub fn handle_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    /// Remove the last filter character
    pub fn handle_filter_backspace(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }

    /// Close the picker
    pub fn clear(&mut self) {
        self.slot_id = None;
        self.filter.clear();
        self.selected = 0;
    }
}

impl App {
    /// Open the model picker for the slot at `index`
    pub fn open_picker(&mut self, index: usize) {
        let Some(slot) = self.slots.get(index) else {
            return;
        };
        if self.models.is_empty() {
            self.ui.set_status("No models loaded yet");
            return;
        }
        self.picker
            .start(&slot.id, &slot.selected_model_id, &self.models);
        self.enter_mode(Mode::ModelPicker);
    }

    /// Models matching the picker filter
    #[must_use]
    pub fn picker_models(&self) -> Vec<&AvailableModel> {
        self.picker.filtered(&self.models)
    }

    /// Highlight the next model in the picker
    pub fn picker_next(&mut self) {
        self.picker.select_next(&self.models);
    }

    /// Highlight the previous model in the picker
    pub fn picker_prev(&mut self) {
        self.picker.select_prev(&self.models);
    }

    /// Assign the highlighted model to the picker's slot and close the picker
    pub fn confirm_picker(&mut self) {
        let chosen = self.picker.selected_model(&self.models).map(|m| m.id.clone());
        if let (Some(slot_id), Some(model_id)) = (self.picker.slot_id.clone(), chosen) {
            self.slots.select_model(&slot_id, &model_id);
        }
        self.exit_mode();
    }
}
