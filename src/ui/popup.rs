//! Popup overlay widgets for the bulk-load editor and the help screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};
use crate::core::input::parse_bulk;

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

// ───────────────────────────────────────── bulk load ─────────

/// Multi-line editor: one item per line.
pub struct BulkLoadPopup<'a> {
    pub text: &'a str,
}

impl Widget for BulkLoadPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(56, area.height.saturating_sub(4).max(8), area);
        Clear.render(popup, buf);

        let block = popup_block(" Load items (one per line) ");
        let inner = block.inner(popup);
        block.render(popup, buf);
        if inner.height < 3 {
            return;
        }

        // Editor fills everything but the two footer rows.
        let editor_height = inner.height - 2;
        let mut lines: Vec<Line> = self.text.split('\n').map(Line::raw).collect();
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        // Keep the cursor line in view.
        let skip = lines.len().saturating_sub(editor_height as usize);
        let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
        Paragraph::new(visible).render(
            Rect::new(inner.x, inner.y, inner.width, editor_height),
            buf,
        );

        let dim = Style::default().fg(Color::DarkGray);
        let count = parse_bulk(self.text).len();
        let footer = vec![
            Line::from(Span::styled(format!("  {count} item(s) will be loaded"), dim)),
            Line::from(Span::styled("  Ctrl+S: load  Enter: new line  Esc: cancel", dim)),
        ];
        Paragraph::new(footer).render(
            Rect::new(inner.x, inner.y + editor_height, inner.width, 2),
            buf,
        );
    }
}

// ───────────────────────────────────────── help popup ────────

/// Read-only list of every action and its bindings.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Action::ALL.len() actions + 2 blanks + 1 hint + 2 border
        let height = (Action::ALL.len() as u16) + 5;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default().fg(Color::Yellow);
        let mut lines = vec![Line::raw("")];

        // Fixed-width columns: label left-aligned, keys right-aligned.
        for &action in Action::ALL {
            let label_col = format!("   {:<28}", action.label());
            let keys_width = (inner.width as usize).saturating_sub(label_col.len()).max(1);
            let keys_col = format!("{:>keys_width$}", self.config.display_bindings(action));
            lines.push(Line::from(vec![
                Span::raw(label_col),
                Span::styled(keys_col, key_style),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Mouse: scroll the wheel, click to spin  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_fixed(80, 40, area), area);
    }
}
