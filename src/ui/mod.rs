//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* picker state and turns it into cells on the
//! terminal.  No state is mutated here.

pub mod input;
pub mod layout;
pub mod popup;
pub mod spinner;
pub mod theme;
pub mod wheel_widget;
pub mod winners;
