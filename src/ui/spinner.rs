//! Spinning indicator — a small spinner + label rendered in the top-right
//! corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each frame.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A "spinning…" indicator with a spinning icon and the spin's progress.
///
/// Render this on top of the wheel's border.  It picks its own position
/// (top-right of `area`) and is invisible when `progress` is `None`.
pub struct SpinIndicator {
    /// Linear progress of the current spin, `None` when idle.
    pub progress: Option<f64>,
    /// Monotonically increasing frame counter (drives the spinner glyph).
    pub frame: u64,
}

impl Widget for SpinIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(progress) = self.progress else {
            return;
        };
        if area.width < 20 || area.height == 0 {
            return;
        }

        // Advance the glyph every third frame so it stays readable at 60 Hz.
        let glyph = SPINNER_FRAMES[(self.frame / 3) as usize % SPINNER_FRAMES.len()];
        let label = format!(" {glyph} spinning {:>3}% ", (progress * 100.0).round() as u32);

        let label_width = label.chars().count() as u16;
        // Position: top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let y = area.y; // top border row

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, y, &line, label_width);
    }
}
