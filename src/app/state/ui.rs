//! UI-related state: cursor positions, scrolling, status line

use std::cell::Cell;

/// UI-related state for the application
#[derive(Debug, Default)]
pub struct UiState {
    /// Highlighted row in the sidebar (topologies first, then slots)
    pub sidebar_cursor: usize,

    /// Highlighted message in the history, if any
    pub selected_message: Option<usize>,

    /// Requested first visible line of the history
    pub history_scroll: usize,

    /// Whether the history sticks to the bottom as messages arrive
    pub follow: bool,

    /// First visible history line as last rendered
    pub rendered_offset: Cell<usize>,

    /// Largest valid scroll offset as last rendered
    pub max_scroll: Cell<usize>,

    /// Height of the history viewport as last rendered
    pub viewport_height: Cell<usize>,

    /// Status message to display
    pub status_message: Option<String>,
}

impl UiState {
    /// Create a new UI state following the bottom of the history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sidebar_cursor: 0,
            selected_message: None,
            history_scroll: 0,
            follow: true,
            rendered_offset: Cell::new(0),
            max_scroll: Cell::new(0),
            viewport_height: Cell::new(0),
            status_message: None,
        }
    }

    /// Scroll the history up, leaving follow mode
    pub const fn scroll_up(&mut self, amount: usize) {
        self.history_scroll = self.rendered_offset.get().saturating_sub(amount);
        self.follow = false;
    }

    /// Scroll the history down, re-entering follow mode at the bottom
    pub fn scroll_down(&mut self, amount: usize) {
        let max = self.max_scroll.get();
        self.history_scroll = self.rendered_offset.get().saturating_add(amount).min(max);
        self.follow = self.history_scroll >= max;
    }

    /// Jump to the first line of the history
    pub const fn scroll_to_top(&mut self) {
        self.history_scroll = 0;
        self.follow = false;
    }

    /// Jump to the bottom and follow new messages
    pub const fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }

    /// Half of the last rendered viewport, at least one line
    #[must_use]
    pub fn page_size(&self) -> usize {
        (self.viewport_height.get() / 2).max(1)
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
