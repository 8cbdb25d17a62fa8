//! Single-line "add item" field and the control bar under the panes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// The add-item text field.
pub struct AddField<'a> {
    pub text: &'a str,
    pub focused: bool,
    /// Shown while unfocused and empty.
    pub placeholder: String,
}

impl Widget for AddField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        };
        let block = Block::default()
            .title(" Add item ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(border);

        let line = if self.focused {
            Line::from(vec![
                Span::styled("> ", Theme::input_style()),
                Span::styled(self.text, Theme::input_style()),
                Span::styled("▏", Theme::input_style().add_modifier(Modifier::SLOW_BLINK)),
            ])
        } else if self.text.is_empty() {
            Line::styled(self.placeholder, Theme::hint_style())
        } else {
            Line::from(vec![Span::raw("> "), Span::raw(self.text)])
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

/// One-line bar of the main controls with their current labels.
pub struct ControlBar<'a> {
    pub spin_key: String,
    pub spin_label: &'a str,
    pub spin_enabled: bool,
    pub auto_key: String,
    pub auto_label: &'a str,
    pub auto_on: bool,
    pub winners_key: String,
    pub winners_label: &'a str,
    pub count_label: String,
}

impl Widget for ControlBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spin_style = if self.spin_enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Theme::disabled_style()
        };
        let auto_style = if self.auto_on {
            Theme::active_toggle_style()
        } else {
            Style::default()
        };

        let line = Line::from(vec![
            Span::styled(format!(" [{}] ", self.spin_key), Theme::key_style()),
            Span::styled(self.spin_label, spin_style),
            Span::styled(format!("   [{}] ", self.auto_key), Theme::key_style()),
            Span::styled(self.auto_label, auto_style),
            Span::styled(format!("   [{}] ", self.winners_key), Theme::key_style()),
            Span::raw(self.winners_label),
            Span::styled(format!("   {}", self.count_label), Theme::hint_style()),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}
