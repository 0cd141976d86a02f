//! Add Column form
//!
//! Label, key, kind and (for select columns) a comma separated option list.
//! The form validates locally; the table itself rejects duplicate keys.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::theme::Palette;
use crate::model::ColumnKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;

/// Column keys: letters, digits and underscores, not starting with a digit
static KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Label,
    Key,
    Kind,
    Options,
}

impl FormField {
    fn next(self, kind: ColumnKind) -> FormField {
        match self {
            FormField::Label => FormField::Key,
            FormField::Key => FormField::Kind,
            FormField::Kind if kind == ColumnKind::Select => FormField::Options,
            FormField::Kind | FormField::Options => FormField::Label,
        }
    }

    fn prev(self, kind: ColumnKind) -> FormField {
        match self {
            FormField::Label if kind == ColumnKind::Select => FormField::Options,
            FormField::Label => FormField::Kind,
            FormField::Key => FormField::Label,
            FormField::Kind => FormField::Key,
            FormField::Options => FormField::Kind,
        }
    }
}

/// Validate a proposed column key
pub fn validate_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Key required");
    }
    if !KEY_REGEX.is_match(key) {
        return Err("Use letters/numbers/_ (start with letter/_)");
    }
    Ok(())
}

/// Split a comma separated option list, dropping blanks
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Default)]
pub struct AddColumnDialog {
    pub label: String,
    pub key: String,
    pub kind: ColumnKind,
    pub options: String,
    pub focus: FormField,
    /// Validation or rejection message shown under the form
    pub error: Option<String>,
}

impl AddColumnDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Label => Some(&mut self.label),
            FormField::Key => Some(&mut self.key),
            FormField::Options => Some(&mut self.options),
            FormField::Kind => None,
        }
    }

    /// Validate the form and build the submit action
    pub fn submit(&mut self) -> Option<Action> {
        let label = self.label.trim();
        if label.is_empty() {
            self.error = Some("Label required".to_string());
            return None;
        }
        let key = self.key.trim();
        if let Err(message) = validate_key(key) {
            self.error = Some(message.to_string());
            return None;
        }

        let options = (self.kind == ColumnKind::Select).then(|| parse_options(&self.options));
        self.error = None;
        Some(Action::SubmitAddColumn {
            key: key.to_string(),
            label: label.to_string(),
            kind: self.kind,
            options,
        })
    }
}

impl Component for AddColumnDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next(self.kind);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev(self.kind);
                None
            }
            KeyCode::Left | KeyCode::Right if self.focus == FormField::Kind => {
                self.kind = if key.code == KeyCode::Left {
                    self.kind.prev()
                } else {
                    self.kind.next()
                };
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
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

impl AddColumnDialog {
    pub fn draw_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let popup_area = centered_popup(area, 60, 14);
        frame.render_widget(Clear, popup_area);

        let field = |name: &str, value: String, field: FormField| -> Line<'static> {
            let focused = self.focus == field;
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            let cursor = if focused && field != FormField::Kind { "_" } else { "" };
            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(palette.accent)),
                Span::styled(format!("{:<9}", name), Style::default().fg(palette.text_dim)),
                Span::styled(format!("{}{}", value, cursor), value_style),
            ])
        };

        let mut lines = vec![
            Line::from(""),
            field("Label", self.label.clone(), FormField::Label),
            field("Key", self.key.clone(), FormField::Key),
            field("Kind", format!("◀ {} ▶", self.kind.name()), FormField::Kind),
        ];
        if self.kind == ColumnKind::Select {
            lines.push(field("Options", self.options.clone(), FormField::Options));
            lines.push(Line::from(Span::styled(
                "           comma separated, e.g. admin, editor, viewer",
                Style::default().fg(palette.text_dim),
            )));
        }
        lines.push(Line::from(""));
        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled(" Tab ", palette.key_hint(palette.accent)),
            Span::raw("Next field  "),
            Span::styled(" ←/→ ", palette.key_hint(palette.accent)),
            Span::raw("Kind  "),
            Span::styled(" Enter ", palette.key_hint(palette.success)),
            Span::raw("Add  "),
            Span::styled(" Esc ", palette.key_hint(palette.warning)),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(lines).style(palette.base()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border_focus))
                .title(" Add Column ")
                .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut AddColumnDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(dialog: &mut AddColumnDialog, text: &str) {
        for c in text.chars() {
            press(dialog, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_validate_key() {
        assert_eq!(validate_key(""), Err("Key required"));
        assert_eq!(validate_key("1abc"), Err("Use letters/numbers/_ (start with letter/_)"));
        assert_eq!(validate_key("has space"), Err("Use letters/numbers/_ (start with letter/_)"));
        assert!(validate_key("_private").is_ok());
        assert!(validate_key("Role2").is_ok());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(parse_options(" a, b ,,c , "), vec!["a", "b", "c"]);
        assert!(parse_options("").is_empty());
    }

    #[test]
    fn test_label_required_first() {
        let mut dialog = AddColumnDialog::new();
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert_eq!(dialog.error.as_deref(), Some("Label required"));

        type_text(&mut dialog, "Status");
        assert_eq!(press(&mut dialog, KeyCode::Enter), None);
        assert_eq!(dialog.error.as_deref(), Some("Key required"));
    }

    #[test]
    fn test_submit_select_column() {
        let mut dialog = AddColumnDialog::new();
        type_text(&mut dialog, "Status");
        press(&mut dialog, KeyCode::Tab);
        type_text(&mut dialog, "status");
        press(&mut dialog, KeyCode::Tab);
        // text -> number -> email -> select
        for _ in 0..3 {
            press(&mut dialog, KeyCode::Right);
        }
        assert_eq!(dialog.kind, ColumnKind::Select);
        press(&mut dialog, KeyCode::Tab);
        assert_eq!(dialog.focus, FormField::Options);
        type_text(&mut dialog, "open, closed");

        let action = press(&mut dialog, KeyCode::Enter);
        assert_eq!(
            action,
            Some(Action::SubmitAddColumn {
                key: "status".into(),
                label: "Status".into(),
                kind: ColumnKind::Select,
                options: Some(vec!["open".into(), "closed".into()]),
            })
        );
        assert!(dialog.error.is_none());
    }

    #[test]
    fn test_options_skipped_for_other_kinds() {
        let mut dialog = AddColumnDialog::new();
        press(&mut dialog, KeyCode::Tab);
        press(&mut dialog, KeyCode::Tab);
        assert_eq!(dialog.focus, FormField::Kind);
        press(&mut dialog, KeyCode::Tab);
        assert_eq!(dialog.focus, FormField::Label);
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut dialog = AddColumnDialog::new();
        type_text(&mut dialog, "Notes");
        dialog.error = Some("boom".into());
        dialog.reset();
        assert!(dialog.label.is_empty());
        assert!(dialog.error.is_none());
        assert_eq!(dialog.focus, FormField::Label);
    }
}
