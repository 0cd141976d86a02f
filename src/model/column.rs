//! Column definitions - the field schema of the table

use serde::{Deserialize, Serialize};

/// Value kind of a column
///
/// Determines input validation and rendering. Stored values stay either
/// text or numbers regardless of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Email,
    Select,
}

impl ColumnKind {
    pub fn all() -> [ColumnKind; 4] {
        [
            ColumnKind::Text,
            ColumnKind::Number,
            ColumnKind::Email,
            ColumnKind::Select,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            ColumnKind::Text => "Text",
            ColumnKind::Number => "Number",
            ColumnKind::Email => "Email",
            ColumnKind::Select => "Select",
        }
    }

    /// Next kind in the cycle used by the add-column form
    pub fn next(&self) -> ColumnKind {
        match self {
            ColumnKind::Text => ColumnKind::Number,
            ColumnKind::Number => ColumnKind::Email,
            ColumnKind::Email => ColumnKind::Select,
            ColumnKind::Select => ColumnKind::Text,
        }
    }

    pub fn prev(&self) -> ColumnKind {
        match self {
            ColumnKind::Text => ColumnKind::Select,
            ColumnKind::Number => ColumnKind::Text,
            ColumnKind::Email => ColumnKind::Number,
            ColumnKind::Select => ColumnKind::Email,
        }
    }

    /// Infer a kind from a CSV header.
    pub fn infer_from_header(header: &str) -> ColumnKind {
        let lower = header.to_lowercase();
        if lower.contains("age") || lower.contains("count") || lower.contains("num") {
            ColumnKind::Number
        } else if lower.contains("mail") {
            ColumnKind::Email
        } else {
            ColumnKind::Text
        }
    }
}

fn default_visible() -> bool {
    true
}

/// A single column of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier, unique within the column set
    pub key: String,
    /// Display label
    pub label: String,
    pub kind: ColumnKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Display position, dense 0..n-1 across the column set
    #[serde(default)]
    pub order: usize,
    /// Allowed values for select columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            visible: true,
            order: 0,
            options: None,
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Number
    }

    /// Options offered by a select column (empty for every other kind)
    pub fn select_options(&self) -> &[String] {
        match (&self.kind, &self.options) {
            (ColumnKind::Select, Some(options)) => options,
            _ => &[],
        }
    }
}

/// Turn a header label into a column key.
///
/// Lowercases, collapses runs of non-alphanumeric characters into a single
/// underscore and trims leading/trailing underscores.
pub fn slugify(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_sep = false;

    for c in label.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.push(c);
        } else {
            pending_sep = true;
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Name"), "name");
        assert_eq!(slugify("  First Name "), "first_name");
        assert_eq!(slugify("E-mail / Address"), "e_mail_address");
        assert_eq!(slugify("__id__"), "id");
        assert_eq!(slugify("Ünïcode"), "n_code");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_infer_kind_from_header() {
        assert_eq!(ColumnKind::infer_from_header("Age"), ColumnKind::Number);
        assert_eq!(ColumnKind::infer_from_header("Item Count"), ColumnKind::Number);
        assert_eq!(ColumnKind::infer_from_header("Phone Number"), ColumnKind::Number);
        assert_eq!(ColumnKind::infer_from_header("Email"), ColumnKind::Email);
        assert_eq!(ColumnKind::infer_from_header("Mailbox"), ColumnKind::Email);
        assert_eq!(ColumnKind::infer_from_header("Name"), ColumnKind::Text);
        // substring match
        assert_eq!(ColumnKind::infer_from_header("Page"), ColumnKind::Number);
    }

    #[test]
    fn test_kind_cycle_round_trips() {
        for kind in ColumnKind::all() {
            assert_eq!(kind.next().prev(), kind);
        }
    }

    #[test]
    fn test_column_deserialize_defaults_visible() {
        let column: Column =
            serde_json::from_str(r#"{"key":"name","label":"Name","kind":"text"}"#).unwrap();
        assert!(column.visible);
        assert_eq!(column.order, 0);
        assert!(column.options.is_none());
    }

    #[test]
    fn test_select_options_only_for_select_kind() {
        let opts = vec!["a".to_string(), "b".to_string()];
        let select = Column::new("s", "S", ColumnKind::Select).with_options(opts.clone());
        let text = Column::new("t", "T", ColumnKind::Text).with_options(opts);
        assert_eq!(select.select_options().len(), 2);
        assert!(text.select_options().is_empty());
    }
}
