//! User preferences - independent of table data

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn name(&self) -> &str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: ThemeMode,
    /// Global search text applied to every cell
    pub global_search: String,
    /// Whether the Manage Columns panel is open
    pub manage_columns_open: bool,
}

impl Preferences {
    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
    }

    pub fn set_search(&mut self, text: &str) {
        self.global_search = text.to_string();
    }

    pub fn set_manage_columns_open(&mut self, open: bool) {
        self.manage_columns_open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, ThemeMode::Light);
        assert!(prefs.global_search.is_empty());
        assert!(!prefs.manage_columns_open);
    }

    #[test]
    fn test_toggle_theme() {
        let mut prefs = Preferences::default();
        prefs.toggle_theme();
        assert_eq!(prefs.theme, ThemeMode::Dark);
        prefs.toggle_theme();
        assert_eq!(prefs.theme, ThemeMode::Light);
    }

    #[test]
    fn test_serialized_shape() {
        let mut prefs = Preferences::default();
        prefs.set_search("ada");
        prefs.set_manage_columns_open(true);
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["global_search"], "ada");
        assert_eq!(json["manage_columns_open"], true);
    }
}
