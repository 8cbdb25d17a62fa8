//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: wheel and winners side by side, the add field
/// under them, then the control bar and the status bar.
pub struct AppLayout {
    pub wheel_area: Rect,
    pub winners_area: Rect,
    pub input_area: Rect,
    pub controls_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(7),    // wheel + winners
                Constraint::Length(3), // add field
                Constraint::Length(1), // control bar
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[0]);

        Self {
            wheel_area: panes[0],
            winners_area: panes[1],
            input_area: rows[1],
            controls_area: rows[2],
            status_area: rows[3],
        }
    }
}
