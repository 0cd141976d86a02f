//! Blocking error notification

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
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct ErrorDialog;

impl Component for ErrorDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_message(frame, area, "", &Palette::light())
    }
}

impl ErrorDialog {
    pub fn draw_with_message(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        message: &str,
        palette: &Palette,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 64, 9);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(message.to_string(), Style::default().fg(palette.text))),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Enter/Esc ", palette.key_hint(palette.accent)),
                Span::raw("Dismiss"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .style(palette.base())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.error))
                    .title(" Error ")
                    .title_style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
