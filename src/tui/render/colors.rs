//! Color palette for the TUI
//!
//! Dark surfaces with an orange accent for MAIRE's own output

#![expect(missing_docs, reason = "color names are self-describing")]

use ratatui::style::Color;

// UI Chrome
pub const BORDER: Color = Color::Rgb(70, 74, 86);
pub const BORDER_FOCUSED: Color = Color::Rgb(235, 140, 60);
pub const SURFACE: Color = Color::Rgb(24, 24, 28);
pub const SURFACE_HIGHLIGHT: Color = Color::Rgb(48, 44, 42);

// Text
pub const TEXT_PRIMARY: Color = Color::Rgb(225, 225, 230);
pub const TEXT_DIM: Color = Color::Rgb(140, 140, 150);
pub const TEXT_MUTED: Color = Color::Rgb(95, 95, 105);

// Brand
pub const ACCENT: Color = Color::Rgb(235, 140, 60);
pub const ACCENT_SOFT: Color = Color::Rgb(190, 120, 70);

// Messages
pub const USER_BUBBLE: Color = Color::Rgb(40, 44, 56);
pub const TRACE_MODEL: Color = Color::Rgb(120, 170, 220);

// Switches
pub const SWITCH_ON: Color = Color::Rgb(120, 180, 120);
pub const SWITCH_OFF: Color = Color::Rgb(110, 110, 120);

// Notices
pub const WARNING: Color = Color::Rgb(220, 170, 80);

// Modals
pub const MODAL_BG: Color = Color::Rgb(28, 28, 34);
pub const INPUT_BG: Color = Color::Rgb(34, 36, 44);
