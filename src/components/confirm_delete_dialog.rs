//! Row deletion confirmation

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct ConfirmDeleteDialog {
    row_id: Option<String>,
}

impl ConfirmDeleteDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, row_id: &str) {
        self.row_id = Some(row_id.to_string());
    }
}

impl Component for ConfirmDeleteDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => match self.row_id.take() {
                Some(id) => Some(Action::ConfirmDeleteRow(id)),
                None => Some(Action::CloseModal),
            },
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.row_id = None;
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_palette(frame, area, &Palette::light())
    }
}

impl ConfirmDeleteDialog {
    pub fn draw_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let popup_area = centered_popup(area, 50, 8);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to delete this row? This action cannot be undone.",
                Style::default().fg(palette.text),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", palette.key_hint(palette.error)),
                Span::raw("Delete  "),
                Span::styled(" n/Esc ", palette.key_hint(palette.accent)),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .style(palette.base())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.error))
                    .title(" Delete row? ")
                    .title_style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut ConfirmDeleteDialog, c: char) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_yes_confirms_opened_row() {
        let mut dialog = ConfirmDeleteDialog::new();
        dialog.open("row-7");
        assert_eq!(press(&mut dialog, 'y'), Some(Action::ConfirmDeleteRow("row-7".into())));
        // consumed
        assert_eq!(press(&mut dialog, 'y'), Some(Action::CloseModal));
    }

    #[test]
    fn test_no_cancels() {
        let mut dialog = ConfirmDeleteDialog::new();
        dialog.open("row-7");
        assert_eq!(press(&mut dialog, 'n'), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, 'y'), Some(Action::CloseModal));
    }
}
