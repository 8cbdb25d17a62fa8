//! Custom Ratatui widget that renders the wheel's viewport: five rendered
//! rows with the middle one under the pointer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::core::wheel::{Wheel, POINTER_ROW, VISIBLE_ROWS};

use super::theme::Theme;

/// The wheel widget itself — created fresh each frame.
pub struct WheelWidget<'a> {
    wheel: &'a Wheel,
    block: Option<Block<'a>>,
    /// Shown instead of rows when the wheel has no items.
    empty_hint: Option<String>,
}

impl<'a> WheelWidget<'a> {
    pub fn new(wheel: &'a Wheel) -> Self {
        Self {
            wheel,
            block: None,
            empty_hint: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn empty_hint(mut self, hint: String) -> Self {
        self.empty_hint = Some(hint);
        self
    }
}

impl Widget for WheelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width < 5 || inner.height == 0 {
            return;
        }

        // The pointer row sits on the vertical centre; other slots are laid
        // out around it and clipped to the area.
        let center_y = inner.y + inner.height / 2;

        if self.wheel.is_empty() {
            if let Some(hint) = self.empty_hint {
                Paragraph::new(Line::styled(hint, Theme::hint_style()))
                    .alignment(Alignment::Center)
                    .render(Rect::new(inner.x, center_y, inner.width, 1), buf);
            }
            return;
        }

        let rows = self.wheel.rows();
        let top = self.wheel.top_row();
        let text_area_width = inner.width.saturating_sub(4);

        for slot in 0..VISIBLE_ROWS {
            let offset = slot as i32 - POINTER_ROW as i32;
            let y = i32::from(center_y) + offset;
            if y < i32::from(inner.y) || y >= i32::from(inner.y + inner.height) {
                continue;
            }
            let y = y as u16;

            let label = usize::try_from(top + slot as isize)
                .ok()
                .and_then(|idx| rows.get(idx))
                .map(String::as_str)
                .unwrap_or("");
            let distance = offset.unsigned_abs() as usize;
            let style = Theme::row_style(distance);

            if distance == 0 {
                buf.set_style(Rect::new(inner.x + 1, y, inner.width - 2, 1), style);
                buf.set_string(inner.x, y, "▶", Theme::pointer_marker_style());
                buf.set_string(inner.x + inner.width - 1, y, "◀", Theme::pointer_marker_style());
            }

            Paragraph::new(Line::styled(label.to_string(), style))
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x + 2, y, text_area_width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn pointer_row_is_centred_and_marked() {
        let mut wheel = Wheel::new();
        wheel.set_items(["A", "B", "C", "D", "E"]);

        let area = Rect::new(0, 0, 20, 7);
        let mut buf = Buffer::empty(area);
        WheelWidget::new(&wheel).render(area, &mut buf);

        let pointer = line_text(&buf, 3);
        assert!(pointer.starts_with('▶'));
        assert!(pointer.trim_end().ends_with('◀'));
        assert!(pointer.contains('C'));
        assert!(line_text(&buf, 1).contains('A'));
        assert!(line_text(&buf, 5).contains('E'));
    }

    #[test]
    fn single_item_is_drawn_on_the_pointer_row() {
        let mut wheel = Wheel::new();
        wheel.set_items(["A"]);

        let area = Rect::new(0, 0, 20, 7);
        let mut buf = Buffer::empty(area);
        WheelWidget::new(&wheel).render(area, &mut buf);

        let pointer = line_text(&buf, 3);
        assert!(pointer.starts_with('▶'));
        assert!(pointer.contains('A'));
        // Only three rendered rows: the slots below the pointer stay blank.
        assert!(!line_text(&buf, 4).contains('A'));
        assert!(!line_text(&buf, 5).contains('A'));
    }

    #[test]
    fn empty_wheel_shows_hint() {
        let wheel = Wheel::new();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        WheelWidget::new(&wheel)
            .empty_hint("no items".into())
            .render(area, &mut buf);
        assert!(line_text(&buf, 2).contains("no items"));
    }
}
