//! Input handling — maps key/mouse events and frame ticks to state mutations.
//!
//! Requests the picker turns down (spin while spinning, blank input, empty
//! wheel) are logged at debug level and otherwise ignored.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::picker::Rejected;
use crate::ui::layout::AppLayout;

use super::audio::Cue;
use super::state::{ActiveView, AppState, Focus};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    state.audio.unlock();

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Wheel => match state.focus {
            Focus::Wheel => handle_wheel_key(state, key),
            Focus::AddField => handle_add_key(state, key),
        },
        ActiveView::BulkLoad => handle_bulk_key(state, key),
        ActiveView::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?')) {
                state.active_view = ActiveView::Wheel;
            }
        }
    }
}

// ── Wheel view (configurable bindings) ──────────────────────────

fn handle_wheel_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.active_view = ActiveView::Help,
        Action::Spin => start_spin(state, SpinRequest::Random),
        Action::SpinToPointer => start_spin(state, SpinRequest::Pointer),
        Action::ScrollUp => state.picker.scroll_by(-1),
        Action::ScrollDown => state.picker.scroll_by(1),
        Action::FocusAdd => state.focus = Focus::AddField,
        Action::BulkLoad => open_bulk_load(state),
        Action::Reset => match state.picker.reset() {
            Ok(()) => {
                state.add_input.clear();
                state.bulk_input.clear();
                state.status_message = Some("Wheel reset".into());
            }
            Err(reason) => ignored("reset", reason),
        },
        Action::ClearWinners => {
            state.picker.clear_winners();
            state.status_message = Some("Winners cleared".into());
        }
        Action::RemoveWinners => match state.picker.remove_winners_from_wheel() {
            Ok(removed) => {
                state.status_message = Some(format!(
                    "Removed {removed} item(s) · {}",
                    state.picker.count_label()
                ));
            }
            Err(reason) => ignored("remove winners", reason),
        },
        Action::ToggleWinners => state.show_winners = !state.show_winners,
        Action::ToggleAutoRemove => {
            let on = state.picker.toggle_auto_remove();
            state.status_message = Some(format!(
                "Auto-remove winners: {}",
                if on { "on" } else { "off" }
            ));
        }
    }
}

// ── Add field ────────────────────────────────────────────────────

fn handle_add_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => state.focus = Focus::Wheel,
        KeyCode::Enter => match state.picker.add(&state.add_input) {
            Ok(()) => {
                state.add_input.clear();
                state.status_message = Some(state.picker.count_label());
            }
            Err(reason) => ignored("add", reason),
        },
        KeyCode::Backspace => {
            state.add_input.pop();
        }
        KeyCode::Char(c) if !has_command_modifier(key) => state.add_input.push(c),
        _ => {}
    }
}

// ── Bulk-load popup ──────────────────────────────────────────────

fn open_bulk_load(state: &mut AppState) {
    if state.picker.is_spinning() {
        ignored("bulk load", Rejected::Spinning);
        return;
    }
    state.active_view = ActiveView::BulkLoad;
}

fn handle_bulk_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        match state.picker.load(&state.bulk_input) {
            Ok(count) => {
                state.active_view = ActiveView::Wheel;
                state.status_message = Some(format!("Loaded {count} item(s)"));
            }
            Err(reason) => ignored("load", reason),
        }
        return;
    }

    match key.code {
        KeyCode::Esc => state.active_view = ActiveView::Wheel,
        KeyCode::Enter => state.bulk_input.push('\n'),
        KeyCode::Backspace => {
            state.bulk_input.pop();
        }
        KeyCode::Char(c) if !has_command_modifier(key) => state.bulk_input.push(c),
        _ => {}
    }
}

/// Pasted text goes wherever typing would go.  Pasting on the wheel itself
/// opens the bulk editor with the text appended.
pub fn handle_paste(state: &mut AppState, text: &str) {
    state.audio.unlock();
    match (state.active_view, state.focus) {
        (ActiveView::Wheel, Focus::AddField) => {
            state.add_input.push_str(&text.replace(['\r', '\n'], " "));
        }
        (ActiveView::BulkLoad, _) => state.bulk_input.push_str(text),
        (ActiveView::Wheel, Focus::Wheel) => {
            if !state.bulk_input.is_empty() && !state.bulk_input.ends_with('\n') {
                state.bulk_input.push('\n');
            }
            state.bulk_input.push_str(text);
            open_bulk_load(state);
        }
        (ActiveView::Help, _) => {}
    }
}

// ── Mouse ────────────────────────────────────────────────────────

/// Scroll over the wheel scrolls it one row; a left click on it spins.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown | MouseEventKind::Down(_) => {
            state.audio.unlock();
        }
        _ => return,
    }
    if state.active_view != ActiveView::Wheel {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area);
    if !point_in_rect(layout.wheel_area, mouse.column, mouse.row) {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => state.picker.scroll_by(-1),
        MouseEventKind::ScrollDown => state.picker.scroll_by(1),
        MouseEventKind::Down(MouseButton::Left) => {
            state.focus = Focus::Wheel;
            start_spin(state, SpinRequest::Random);
        }
        _ => {}
    }
}

// ── Spinning ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum SpinRequest {
    Random,
    Pointer,
}

fn start_spin(state: &mut AppState, request: SpinRequest) {
    let now = Instant::now();
    let started = match request {
        SpinRequest::Random => state.picker.spin_random(now),
        SpinRequest::Pointer => state.picker.spin_to_pointer(now),
    };
    match started {
        Ok(index) => {
            tracing::debug!(index, ?request, "spin requested");
            state.frame = 0;
            state.status_message = None;
            state.audio.play(Cue::SpinStart);
        }
        Err(reason) => ignored("spin", reason),
    }
}

/// Advance the spin animation by one frame.
pub fn on_frame(state: &mut AppState, now: Instant) {
    state.frame = state.frame.wrapping_add(1);
    let Some(outcome) = state.picker.on_frame(now) else {
        return;
    };

    state.audio.play(Cue::SpinStop);
    state.audio.play(Cue::Tick);

    state.status_message = Some(match (&outcome.winner, outcome.wheel_emptied) {
        (Some(name), true) => format!("Winner: {name} · wheel is empty, load more items"),
        (Some(name), false) if outcome.removed > 0 => {
            format!("Winner: {name} (removed from wheel)")
        }
        (Some(name), false) => format!("Winner: {name}"),
        (None, _) => "Spin finished".into(),
    });
}

// ── helpers ──────────────────────────────────────────────────────

fn ignored(request: &str, reason: Rejected) {
    tracing::debug!(request, %reason, "request ignored");
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn point_in_rect(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
