//! State of the numeric text-entry overlay.
//!
//! The host renders the overlay; the knob decides when it is shown, owns the
//! typed text, and keeps its style in step with the knob's foreground color
//! and value font size.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Visual parameters the host should apply to the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryStyle {
    pub text_color: Color,
    pub font_size: f64,
}

impl Default for EntryStyle {
    fn default() -> Self {
        Self {
            text_color: Color::from_rgba8(0xff, 0x88, 0x00, 0xff),
            font_size: 16.0,
        }
    }
}

/// Change in overlay state reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryChange {
    Shown,
    Hidden,
    /// The typed text changed while the overlay stayed open.
    Edited,
}

/// Numeric entry overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryOverlay {
    visible: bool,
    text: String,
    style: EntryStyle,
}

impl EntryOverlay {
    /// Create a hidden overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the overlay is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Text typed so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the typed text (for hosts with a native text field).
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Append typed characters.
    pub fn push_str(&mut self, chars: &str) {
        self.text.push_str(chars);
    }

    /// Remove the last typed character.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Current overlay style.
    pub fn style(&self) -> EntryStyle {
        self.style
    }

    pub(crate) fn set_style(&mut self, style: EntryStyle) {
        self.style = style;
    }

    pub(crate) fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the overlay and hand back whatever was typed.
    pub(crate) fn hide(&mut self) -> String {
        self.visible = false;
        std::mem::take(&mut self.text)
    }
}
