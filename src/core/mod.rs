//! Core picker logic — item list, spin animation, winners.
//!
//! Nothing in this module depends on any TUI, audio or rendering crate.
//! Time is passed in explicitly so every operation is testable.

pub mod input;
pub mod picker;
pub mod spin;
pub mod wheel;
pub mod winners;
