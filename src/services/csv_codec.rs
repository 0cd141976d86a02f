//! CSV import and export
//!
//! Decoding treats the first record as headers, derives column keys and kinds
//! from them, and coerces number-column cells. Encoding quotes every field.

use crate::model::{slugify, CellValue, Column, ColumnKind, Row};
use chrono::Utc;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("Empty CSV")]
    Empty,
    #[error("No headers detected")]
    NoHeaders,
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
    #[error("{0}")]
    Parse(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Columns and rows decoded from CSV text
#[derive(Debug, Clone)]
pub struct ImportedTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

/// Read an import file from disk
pub fn read_file(path: &Path) -> Result<String, CsvError> {
    Ok(fs::read_to_string(path)?)
}

/// Decode CSV text into columns and rows.
///
/// Nothing is produced unless the whole input decodes.
pub fn decode(text: &str) -> Result<ImportedTable, CsvError> {
    let text = text.trim_start_matches('\u{feff}').trim();
    check_quotes(text)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    let mut records = records.into_iter();
    let header = records.next().ok_or(CsvError::Empty)?;
    let headers: Vec<&str> = header.iter().map(str::trim).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let columns = build_columns(&headers);

    let rows = records
        .map(|record| {
            let values = columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let raw = record.get(i).unwrap_or("");
                    let value = if column.is_numeric() {
                        CellValue::number_or_zero(raw)
                    } else {
                        CellValue::text(raw)
                    };
                    (column.key.clone(), value)
                })
                .collect::<BTreeMap<_, _>>();
            Row::new(values)
        })
        .collect();

    Ok(ImportedTable { columns, rows })
}

fn build_columns(headers: &[&str]) -> Vec<Column> {
    let mut taken = HashSet::new();

    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let mut base = slugify(header);
            if base.is_empty() {
                base = format!("column_{}", i + 1);
            }
            let mut key = base.clone();
            let mut suffix = 2;
            while !taken.insert(key.clone()) {
                key = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            let label = if header.is_empty() {
                format!("Column {}", i + 1)
            } else {
                header.to_string()
            };

            Column::new(key, label, ColumnKind::infer_from_header(header)).with_order(i)
        })
        .collect()
}

/// Reject input whose last quoted field never closes.
///
/// The csv reader silently reads an unterminated field to end of input, so
/// this is checked up front.
fn check_quotes(text: &str) -> Result<(), CsvError> {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => {
                at_field_start = true;
                continue;
            }
            '\n' => {
                line += 1;
                at_field_start = true;
                continue;
            }
            '\r' => continue,
            _ => {}
        }
        at_field_start = false;
    }

    if in_quotes {
        Err(CsvError::UnterminatedQuote { line: quote_line })
    } else {
        Ok(())
    }
}

/// Encode the given columns (in the given order) for every row
pub fn encode(columns: &[&Column], rows: &[Row]) -> Result<String, CsvError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| row.display_value(&c.key)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name used for exports taken at the given instant
pub fn export_filename(epoch_millis: i64) -> String {
    format!("table-export-{}.csv", epoch_millis)
}

/// Encode and write an export file into `dir`, returning its path
pub fn export_to_dir(dir: &Path, columns: &[&Column], rows: &[Row]) -> Result<PathBuf, CsvError> {
    let contents = encode(columns, rows)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(Utc::now().timestamp_millis()));
    fs::write(&path, contents)?;

    tracing::info!(path = %path.display(), rows = rows.len(), columns = columns.len(), "exported csv");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(table: &'a ImportedTable, row: usize, key: &str) -> Option<&'a CellValue> {
        table.rows[row].get(key)
    }

    #[test]
    fn test_decode_example() {
        let table = decode("Name,Age\nAda,28\nAlan,31").unwrap();

        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].key, "name");
        assert_eq!(table.columns[0].kind, ColumnKind::Text);
        assert_eq!(table.columns[1].key, "age");
        assert_eq!(table.columns[1].kind, ColumnKind::Number);
        assert!(table.columns.iter().all(|c| c.visible));
        assert_eq!(table.columns[1].order, 1);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(value(&table, 0, "name"), Some(&CellValue::text("Ada")));
        assert_eq!(value(&table, 0, "age"), Some(&CellValue::Number(28.0)));
        assert_eq!(value(&table, 1, "name"), Some(&CellValue::text("Alan")));
        assert_eq!(value(&table, 1, "age"), Some(&CellValue::Number(31.0)));
        assert_ne!(table.rows[0].id, table.rows[1].id);
    }

    #[test]
    fn test_decode_empty_input_fails() {
        assert!(matches!(decode(""), Err(CsvError::Empty)));
        assert!(matches!(decode("  \n\n "), Err(CsvError::Empty)));
    }

    #[test]
    fn test_decode_blank_headers_fail() {
        assert!(matches!(decode(",,\n1,2,3"), Err(CsvError::NoHeaders)));
    }

    #[test]
    fn test_decode_unterminated_quote_fails() {
        let err = decode("Name,Note\nAda,\"never closed\nAlan,x").unwrap_err();
        assert!(matches!(err, CsvError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_decode_quoted_fields() {
        let table = decode("Name,Note\n\"Lovelace, Ada\",\"said \"\"hi\"\"\nthen left\"").unwrap();
        assert_eq!(value(&table, 0, "name"), Some(&CellValue::text("Lovelace, Ada")));
        assert_eq!(
            value(&table, 0, "note"),
            Some(&CellValue::text("said \"hi\"\nthen left"))
        );
    }

    #[test]
    fn test_decode_coerces_numbers_and_pads_short_rows() {
        let table = decode("Name,Count,Email\nAda,lots\nAlan,7,alan@logic.ai").unwrap();
        assert_eq!(value(&table, 0, "count"), Some(&CellValue::Number(0.0)));
        assert_eq!(value(&table, 0, "email"), Some(&CellValue::text("")));
        assert_eq!(value(&table, 1, "count"), Some(&CellValue::Number(7.0)));
        assert_eq!(table.columns[2].kind, ColumnKind::Email);
    }

    #[test]
    fn test_decode_makes_keys_unique() {
        let table = decode("First Name,first-name,,!!\na,b,c,d").unwrap();
        let keys: Vec<&str> = table.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["first_name", "first_name_2", "column_3", "column_4"]);
        assert_eq!(table.columns[2].label, "Column 3");
        assert_eq!(table.columns[3].label, "!!");
    }

    #[test]
    fn test_decode_strips_bom() {
        let table = decode("\u{feff}Name\nAda").unwrap();
        assert_eq!(table.columns[0].key, "name");
    }

    #[test]
    fn test_encode_quotes_everything() {
        let name = Column::new("name", "Name", ColumnKind::Text);
        let age = Column::new("age", "Age", ColumnKind::Number);
        let rows = vec![Row::new(BTreeMap::from([
            ("name".into(), CellValue::text("Ada \"the\" first, countess")),
            ("age".into(), CellValue::Number(28.0)),
        ]))];

        let csv = encode(&[&name, &age], &rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\"Name\",\"Age\"");
        assert_eq!(lines[1], "\"Ada \"\"the\"\" first, countess\",\"28\"");
    }

    #[test]
    fn test_encode_missing_values_are_empty() {
        let name = Column::new("name", "Name", ColumnKind::Text);
        let extra = Column::new("extra", "Extra", ColumnKind::Text);
        let rows = vec![Row::new(BTreeMap::from([(
            "name".into(),
            CellValue::text("Ada"),
        )]))];
        let csv = encode(&[&name, &extra], &rows).unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"Ada\",\"\""));
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let columns = vec![
            Column::new("name", "Name", ColumnKind::Text).with_order(0),
            Column::new("email", "Email", ColumnKind::Email).with_order(1),
            Column::new("age", "Age", ColumnKind::Number).with_order(2),
        ];
        let rows = vec![
            Row::new(BTreeMap::from([
                ("name".into(), CellValue::text("Ada, Countess of \"Lovelace\"")),
                ("email".into(), CellValue::text("ada@algo.dev")),
                ("age".into(), CellValue::Number(28.5)),
            ])),
            Row::new(BTreeMap::from([
                ("name".into(), CellValue::text("multi\nline")),
                ("email".into(), CellValue::text("")),
                ("age".into(), CellValue::Number(-3.0)),
            ])),
        ];

        let refs: Vec<&Column> = columns.iter().collect();
        let csv = encode(&refs, &rows).unwrap();
        let decoded = decode(&csv).unwrap();

        assert_eq!(decoded.columns.len(), 3);
        for (column, original) in decoded.columns.iter().zip(&columns) {
            assert_eq!(column.key, original.key);
            assert_eq!(column.kind, original.kind);
        }
        for (decoded_row, original_row) in decoded.rows.iter().zip(&rows) {
            assert_eq!(decoded_row.values, original_row.values);
        }
    }

    #[test]
    fn test_export_writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = Column::new("name", "Name", ColumnKind::Text);
        let rows = vec![Row::new(BTreeMap::from([(
            "name".into(),
            CellValue::text("Ada"),
        )]))];

        let path = export_to_dir(&dir.path().join("exports"), &[&name], &rows).unwrap();
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("table-export-"));
        assert!(file_name.ends_with(".csv"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("\"Name\""));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(1700000000123), "table-export-1700000000123.csv");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
