//! Cell editor popup used while inline editing

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::theme::Palette;
use crate::model::{Column, ColumnKind};
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
pub struct CellEditor {
    pub row_id: String,
    pub key: String,
    label: String,
    kind: ColumnKind,
    options: Vec<String>,
    pub input: String,
    /// Rejection message for the last commit
    pub error: Option<String>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the editor at a cell, prefilled with its current text
    pub fn open(&mut self, row_id: &str, column: &Column, current: String) {
        self.row_id = row_id.to_string();
        self.key = column.key.clone();
        self.label = column.label.clone();
        self.kind = column.kind;
        self.options = column.select_options().to_vec();
        self.input = current;
        self.error = None;
    }

    /// Replace the input with the option after the current one
    fn cycle_option(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = self
            .options
            .iter()
            .position(|o| *o == self.input)
            .map(|i| (i + 1) % self.options.len())
            .unwrap_or(0);
        self.input = self.options[next].clone();
    }
}

impl Component for CellEditor {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::CommitCellEdit {
                row_id: self.row_id.clone(),
                key: self.key.clone(),
                input: self.input.clone(),
            }),
            KeyCode::Tab if self.kind == ColumnKind::Select => {
                self.cycle_option();
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
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

impl CellEditor {
    pub fn draw_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let popup_area = centered_popup(area, 56, 10);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} ({})", self.label, self.kind.name().to_lowercase()),
                Style::default().fg(palette.text_dim),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(palette.accent)),
                Span::styled(
                    format!("{}_", self.input),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(palette.error),
            )));
        } else if !self.options.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Options: {}", self.options.join(", ")),
                Style::default().fg(palette.text_dim),
            )));
        }

        let mut hints = vec![
            Span::styled(" Enter ", palette.key_hint(palette.success)),
            Span::raw("Stage  "),
            Span::styled(" Esc ", palette.key_hint(palette.warning)),
            Span::raw("Cancel"),
        ];
        if self.kind == ColumnKind::Select {
            hints.push(Span::styled("  Tab ", palette.key_hint(palette.accent)));
            hints.push(Span::raw("Next option"));
        }
        lines.push(Line::from(hints));

        let paragraph = Paragraph::new(lines)
            .style(palette.base())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border_focus))
                    .title(" Edit Cell ")
                    .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
