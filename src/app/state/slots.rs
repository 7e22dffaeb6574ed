//! Model slot assignments
//!
//! A slot pairs a position in the run order with a chosen model and an
//! enabled flag. Only enabled slots take part in a run, in slot order.

use crate::client::{ActiveSlot, AvailableModel};

/// One assignable position in the run order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSlot {
    /// Stable identifier (`slot1`, `slot2`, ...)
    pub id: String,
    /// Model chosen for this slot
    pub selected_model_id: String,
    /// Whether the slot takes part in runs
    pub enabled: bool,
}

/// Ordered list of model slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBoard {
    slots: Vec<ModelSlot>,
}

impl SlotBoard {
    /// Create an empty board
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Populate the board once models are known.
    ///
    /// Does nothing if `models` is empty or the board already has slots.
    /// Returns whether slots were created.
    pub fn initialize(
        &mut self,
        models: &[AvailableModel],
        count: usize,
        enabled_count: usize,
    ) -> bool {
        let Some(first) = models.first() else {
            return false;
        };
        if !self.slots.is_empty() {
            return false;
        }
        self.slots = (0..count)
            .map(|i| ModelSlot {
                id: format!("slot{}", i + 1),
                selected_model_id: first.id.clone(),
                enabled: i < enabled_count,
            })
            .collect();
        true
    }

    /// All slots in order
    #[must_use]
    pub fn slots(&self) -> &[ModelSlot] {
        &self.slots
    }

    /// Slot at a position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ModelSlot> {
        self.slots.get(index)
    }

    /// Number of slots
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the board has no slots
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Flip the enabled flag of one slot. Returns the new state.
    pub fn toggle(&mut self, slot_id: &str) -> Option<bool> {
        let slot = self.slots.iter_mut().find(|s| s.id == slot_id)?;
        slot.enabled = !slot.enabled;
        Some(slot.enabled)
    }

    /// Change the model of one slot. Returns whether the slot exists.
    pub fn select_model(&mut self, slot_id: &str, model_id: &str) -> bool {
        match self.slots.iter_mut().find(|s| s.id == slot_id) {
            Some(slot) => {
                slot.selected_model_id = model_id.to_string();
                true
            }
            None => false,
        }
    }

    /// Move the slot at `from` so it lands at `to`, shifting the others.
    ///
    /// Out-of-range indices and `from == to` leave the board unchanged.
    /// Returns whether anything moved.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.slots.len() || to >= self.slots.len() {
            return false;
        }
        let moved = self.slots.remove(from);
        self.slots.insert(to, moved);
        true
    }

    /// Move a slot one position up. Returns its new index.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        let target = index.checked_sub(1)?;
        self.reorder(index, target).then_some(target)
    }

    /// Move a slot one position down. Returns its new index.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        let target = index + 1;
        self.reorder(index, target).then_some(target)
    }

    /// Model ids of enabled slots, in slot order
    #[must_use]
    pub fn active_model_ids(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.selected_model_id.clone())
            .collect()
    }

    /// Enabled slots with their positions, in slot order
    #[must_use]
    pub fn active_slots(&self) -> Vec<ActiveSlot> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.enabled)
            .map(|(position, s)| ActiveSlot {
                position,
                model_id: s.selected_model_id.clone(),
            })
            .collect()
    }

    /// Number of enabled slots
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.enabled).count()
    }
}
