//! Winners panel: the ordered record of spin results and its actions.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::winners::Winners;
use crate::ui::theme::Theme;

pub struct WinnersPanel<'a> {
    pub block: Block<'a>,
    pub winners: &'a Winners,
    /// When `false` only a one-line hint is drawn.
    pub visible: bool,
    /// Footer hint for the panel's actions (clear, remove from wheel).
    pub actions_hint: String,
    pub show_hint: String,
}

impl Widget for WinnersPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if !self.visible {
            Paragraph::new(Line::styled(self.show_hint, Theme::hint_style()))
                .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
            return;
        }

        // Last row is reserved for the actions hint.
        let list_height = inner.height.saturating_sub(1) as usize;
        let entries = self.winners.entries();

        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::styled("No winners yet", Theme::hint_style())]
        } else {
            // Keep the newest winners in view.
            let skip = entries.len().saturating_sub(list_height);
            entries
                .iter()
                .enumerate()
                .skip(skip)
                .map(|(i, w)| {
                    Line::from(vec![
                        Span::styled(format!("{:>3}. ", i + 1), Theme::timestamp_style()),
                        Span::styled(w.name.clone(), Theme::winner_style()),
                        Span::styled(
                            format!("  {}", w.won_at.format("%H:%M:%S")),
                            Theme::timestamp_style(),
                        ),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines).render(
            Rect::new(inner.x, inner.y, inner.width, list_height as u16),
            buf,
        );

        if inner.height > 1 {
            Paragraph::new(Line::styled(self.actions_hint, Theme::hint_style())).render(
                Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
                buf,
            );
        }
    }
}
