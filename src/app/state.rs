//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use super::audio::AudioCues;
use crate::config::AppConfig;
use crate::core::picker::Picker;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Wheel,
    BulkLoad,
    Help,
}

/// Where typed keys go while the wheel view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Wheel,
    AddField,
}

/// Top-level application state.
pub struct AppState {
    /// Items, winners and the spin state machine.
    pub picker: Picker,
    /// User-configurable keybindings and defaults.
    pub config: AppConfig,
    /// Audio cue handle (gated until the first interaction).
    pub audio: AudioCues,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    pub focus: Focus,
    /// Contents of the single-item add field.
    pub add_input: String,
    /// Contents of the bulk-load editor.  Kept between openings.
    pub bulk_input: String,
    /// Whether the winners list (and its actions) are shown.
    pub show_winners: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Frames drawn while spinning (drives the spinner glyph).
    pub frame: u64,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(picker: Picker, config: AppConfig, audio: AudioCues) -> Self {
        Self {
            show_winners: config.show_winners,
            picker,
            config,
            audio,
            active_view: ActiveView::default(),
            focus: Focus::default(),
            add_input: String::new(),
            bulk_input: String::new(),
            status_message: None,
            should_quit: false,
            frame: 0,
            terminal_area: Rect::default(),
        }
    }

    /// Label of the spin control.
    pub fn spin_label(&self) -> &'static str {
        if self.picker.is_spinning() {
            "Spinning..."
        } else if self.picker.wheel().is_empty() {
            "No Items"
        } else {
            "Spin Random"
        }
    }

    /// Label of the auto-remove toggle.
    pub fn auto_remove_label(&self) -> &'static str {
        if self.picker.auto_remove() {
            "Auto ✓"
        } else {
            "Auto"
        }
    }

    /// Label of the winners show/hide toggle.
    pub fn winners_toggle_label(&self) -> &'static str {
        if self.show_winners {
            "Hide"
        } else {
            "Show"
        }
    }
}
