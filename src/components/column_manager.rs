//! Manage Columns panel
//!
//! Lists every column in display order with a visibility checkbox. Columns
//! are reordered one step at a time.

use crate::action::Action;
use crate::component::Component;
use crate::components::theme::Palette;
use crate::model::Column;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct ColumnManager {
    /// Column keys in display order, refreshed from the table
    keys: Vec<String>,
    list_state: ListState,
}

impl ColumnManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the key list and keep the selection in range
    pub fn set_columns(&mut self, columns: &[Column]) {
        self.keys = columns.iter().map(|c| c.key.clone()).collect();
        let selected = match self.list_state.selected() {
            _ if self.keys.is_empty() => None,
            Some(i) => Some(i.min(self.keys.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|i| self.keys.get(i))
            .map(String::as_str)
    }

    fn select_next(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if i + 1 < self.keys.len() {
                self.list_state.select(Some(i + 1));
            }
        }
    }

    fn select_prev(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }
}

impl Component for ColumnManager {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let selected = self.selected_key().map(str::to_string);

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Char(' ') => selected.map(Action::ToggleColumnVisibility),
            // selection follows the moved column
            KeyCode::Char('J') => selected.map(|k| {
                self.select_next();
                Action::MoveColumnDown(k)
            }),
            KeyCode::Char('K') => selected.map(|k| {
                self.select_prev();
                Action::MoveColumnUp(k)
            }),
            KeyCode::Char('a') => Some(Action::OpenAddColumn),
            KeyCode::Esc | KeyCode::Char('c') => Some(Action::CloseManageColumns),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_with_columns
        Ok(())
    }
}

impl ColumnManager {
    pub fn draw_with_columns(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        columns: &[Column],
        palette: &Palette,
        focused: bool,
    ) -> Result<()> {
        self.set_columns(columns);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style(focused))
            .title(" Manage Columns ")
            .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
            .style(palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let items: Vec<ListItem> = columns
            .iter()
            .map(|column| {
                let checkbox = if column.visible { "[x] " } else { "[ ] " };
                let label_style = if column.visible {
                    Style::default().fg(palette.text)
                } else {
                    Style::default().fg(palette.text_dim)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(checkbox, Style::default().fg(palette.accent)),
                    Span::styled(column.label.clone(), label_style),
                    Span::styled(
                        format!("  {} · {}", column.key, column.kind.name()),
                        Style::default().fg(palette.text_dim),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(palette.cursor_bg)
                    .fg(palette.cursor_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let hints = vec![
            Line::from(vec![
                Span::styled("Space", palette.key_hint(palette.success)),
                Span::raw(" show/hide  "),
                Span::styled("J/K", palette.key_hint(palette.accent)),
                Span::raw(" move"),
            ]),
            Line::from(vec![
                Span::styled("a", palette.key_hint(palette.success)),
                Span::raw(" add column  "),
                Span::styled("Esc", palette.key_hint(palette.warning)),
                Span::raw(" close"),
            ]),
        ];
        frame.render_widget(Paragraph::new(hints), chunks[1]);
        Ok(())
    }
}
