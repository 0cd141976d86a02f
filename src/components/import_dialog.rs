//! CSV import prompt

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Path input for the file to import
#[derive(Default)]
pub struct ImportDialog {
    pub path: String,
}

impl ImportDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for ImportDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => {
                let path = self.path.trim();
                (!path.is_empty()).then(|| Action::ImportFile(path.to_string()))
            }
            KeyCode::Backspace => {
                self.path.pop();
                None
            }
            KeyCode::Char(c) => {
                self.path.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_palette(frame, area, &Palette::light())
    }
}

impl ImportDialog {
    pub fn draw_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let popup_area = centered_popup(area, 64, 8);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(Span::styled(
                "Path to a CSV file (first row is the header):",
                Style::default().fg(palette.text_dim),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(palette.accent)),
                Span::styled(
                    format!("{}_", self.path),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Enter ", palette.key_hint(palette.success)),
                Span::raw("Import  "),
                Span::styled(" Esc ", palette.key_hint(palette.warning)),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content).style(palette.base()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border_focus))
                .title(" Import CSV ")
                .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
