//! Rows and cell values

use super::column::ColumnKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Scalar stored in a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Default value for a freshly created cell of the given kind
    pub fn default_for(kind: ColumnKind) -> CellValue {
        match kind {
            ColumnKind::Number => CellValue::Number(0.0),
            _ => CellValue::Text(String::new()),
        }
    }

    pub fn text(value: impl Into<String>) -> CellValue {
        CellValue::Text(value.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// Coerce raw input to a number, or 0 when it is not a finite number.
    pub fn number_or_zero(raw: &str) -> CellValue {
        CellValue::Number(parse_number(raw).unwrap_or(0.0))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Parse user or CSV input as a finite number.
///
/// Blank input counts as zero; `inf`/`NaN` spellings are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Generate a fresh row identifier
pub fn new_row_id() -> String {
    Uuid::new_v4().to_string()
}

/// A table row: permanent id plus one value per column key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Empty ids are replaced with generated ones when rows enter the table
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub values: BTreeMap<String, CellValue>,
}

impl Row {
    /// Create a row with a generated id
    pub fn new(values: BTreeMap<String, CellValue>) -> Self {
        Self {
            id: new_row_id(),
            values,
        }
    }

    pub fn with_id(id: impl Into<String>, values: BTreeMap<String, CellValue>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    /// Stringified value for display and export, empty when missing
    pub fn display_value(&self, key: &str) -> String {
        self.values
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}
