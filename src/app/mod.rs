//! Application orchestration — state, event plumbing, input handling, audio.

pub mod audio;
pub mod event;
pub mod handler;
pub mod state;
