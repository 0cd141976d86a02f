//! Quit confirmation dialog component

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
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Quit confirmation dialog
#[derive(Default)]
pub struct QuitDialog;

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_palette(frame, area, &Palette::light(), false)
    }
}

impl QuitDialog {
    /// Staged edits are lost on quit, so the dialog says so
    pub fn draw_with_palette(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        has_pending_edits: bool,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 44, if has_pending_edits { 8 } else { 7 });

        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to quit?",
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
        ];
        if has_pending_edits {
            content.push(Line::from(Span::styled(
                "Unsaved inline edits will be discarded.",
                Style::default().fg(palette.pending),
            )));
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(" y ", palette.key_hint(palette.success)),
            Span::raw("Yes, quit  "),
            Span::styled(" n/Esc ", palette.key_hint(palette.error)),
            Span::raw("No, cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.warning))
                    .title(" Quit? ")
                    .title_style(Style::default().fg(palette.warning).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
