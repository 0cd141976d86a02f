//! Light and dark palettes

use crate::model::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub header: Color,
    pub border: Color,
    pub border_focus: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub row_alt_bg: Color,
    pub pending: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 250),
            text: Color::Rgb(33, 33, 33),
            text_dim: Color::Rgb(117, 117, 117),
            accent: Color::Rgb(25, 118, 210),
            header: Color::Rgb(13, 71, 161),
            border: Color::Rgb(189, 189, 189),
            border_focus: Color::Rgb(25, 118, 210),
            cursor_bg: Color::Rgb(187, 222, 251),
            cursor_fg: Color::Rgb(13, 71, 161),
            row_alt_bg: Color::Rgb(240, 240, 240),
            pending: Color::Rgb(230, 81, 0),
            success: Color::Rgb(46, 125, 50),
            warning: Color::Rgb(237, 108, 2),
            error: Color::Rgb(211, 47, 47),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 18),
            text: Color::Rgb(238, 238, 238),
            text_dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(144, 202, 249),
            header: Color::Rgb(100, 181, 246),
            border: Color::Rgb(66, 66, 66),
            border_focus: Color::Rgb(144, 202, 249),
            cursor_bg: Color::Rgb(21, 101, 192),
            cursor_fg: Color::Rgb(255, 255, 255),
            row_alt_bg: Color::Rgb(30, 30, 30),
            pending: Color::Rgb(255, 183, 77),
            success: Color::Rgb(102, 187, 106),
            warning: Color::Rgb(255, 167, 38),
            error: Color::Rgb(244, 67, 54),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Base style for panels and backgrounds
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    /// Bold key hint, e.g. " q " in the help bar
    pub fn key_hint(&self, color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focus)
        } else {
            Style::default().fg(self.border)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Palette::for_mode(ThemeMode::Light), Palette::for_mode(ThemeMode::Dark));
        assert_eq!(Palette::for_mode(ThemeMode::Dark), Palette::dark());
    }
}
