//! Help dialog component
//!
//! Lists every keyboard shortcut, grouped by where it applies.

use crate::action::Action;
use crate::component::Component;
use crate::components::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
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

impl HelpDialog {
    pub fn draw_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content(palette);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(palette.border_focus)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default().fg(palette.warning).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(palette.border),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(palette.text)),
        ]));
    };

    add_section(&mut lines, "Grid");
    add_shortcut(&mut lines, "h j k l", "Move the cell cursor (arrows work too)");
    add_shortcut(&mut lines, "n / p", "Next / previous page");
    add_shortcut(&mut lines, "+", "Cycle rows per page (5, 10, 25, 50)");
    add_shortcut(&mut lines, "s", "Sort by cursor column (again to flip)");
    add_shortcut(&mut lines, "/", "Search all cells");

    add_section(&mut lines, "Rows");
    add_shortcut(&mut lines, "a", "Add a blank row at the top");
    add_shortcut(&mut lines, "d", "Delete the row under the cursor");

    add_section(&mut lines, "Inline Editing");
    add_shortcut(&mut lines, "e", "Start editing");
    add_shortcut(&mut lines, "Enter", "Edit the cursor cell");
    add_shortcut(&mut lines, "Ctrl+s", "Save all staged edits");
    add_shortcut(&mut lines, "Esc", "Cancel all staged edits");

    add_section(&mut lines, "Columns");
    add_shortcut(&mut lines, "c", "Open / close Manage Columns");
    add_shortcut(&mut lines, "Space", "Show / hide selected column");
    add_shortcut(&mut lines, "J / K", "Move selected column down / up");
    add_shortcut(&mut lines, "a", "Add a column (in the panel)");

    add_section(&mut lines, "Files & Display");
    add_shortcut(&mut lines, "i", "Import a CSV file");
    add_shortcut(&mut lines, "x", "Export visible columns to CSV");
    add_shortcut(&mut lines, "t", "Toggle light / dark theme");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit");

    // Footer
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(palette.text_dim),
    )));

    lines
}
