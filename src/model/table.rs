//! Table state - the single source of truth for table content
//!
//! All mutation of columns, rows, sorting, pagination and the pending edit
//! buffer goes through the transition methods on [`TableState`]. Every
//! transition either applies completely or leaves the state untouched.

use super::column::{Column, ColumnKind};
use super::row::{new_row_id, parse_number, CellValue, Row};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Page sizes offered by the pagination footer
pub const ALLOWED_PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Staged per-row patches, keyed by row id then column key
pub type EditBuffer = BTreeMap<String, BTreeMap<String, CellValue>>;

/// Errors raised by rejected transitions or rejected cell input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("A column with key '{0}' already exists")]
    DuplicateColumnKey(String),
    #[error("'{value}' is not a valid number for column '{key}'")]
    InvalidNumber { key: String, value: String },
    #[error("'{value}' is not one of the options for column '{key}'")]
    InvalidOption { key: String, value: String },
    #[error("Rows per page must be greater than zero")]
    InvalidPageSize,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// `None` keeps the stored row order
    pub order_by: Option<String>,
    pub direction: SortDirection,
}

/// Direction for single-step column moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Complete table model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    columns: Vec<Column>,
    rows: Vec<Row>,
    sort: SortState,
    page: usize,
    rows_per_page: usize,
    /// Staged edits live only for the session
    #[serde(skip)]
    editing: EditBuffer,
    #[serde(skip)]
    is_editing: bool,
}

impl Default for TableState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl TableState {
    /// A table with no columns and no rows
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            sort: SortState::default(),
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            editing: EditBuffer::new(),
            is_editing: false,
        }
    }

    /// The starter table shown on first launch
    pub fn seeded() -> Self {
        let columns = vec![
            Column::new("name", "Name", ColumnKind::Text).with_order(0),
            Column::new("email", "Email", ColumnKind::Email).with_order(1),
            Column::new("age", "Age", ColumnKind::Number).with_order(2),
            Column::new("role", "Role", ColumnKind::Text).with_order(3),
        ];

        let seed = [
            ("Ada Lovelace", "ada@algo.dev", 28.0, "Engineer"),
            ("Alan Turing", "alan@logic.ai", 31.0, "Scientist"),
            ("Grace Hopper", "grace@navy.mil", 35.0, "Admiral"),
            ("Linus Torvalds", "linus@kernel.org", 30.0, "Maintainer"),
        ];
        let rows = seed
            .iter()
            .map(|(name, email, age, role)| {
                Row::new(BTreeMap::from([
                    ("name".to_string(), CellValue::from(*name)),
                    ("email".to_string(), CellValue::from(*email)),
                    ("age".to_string(), CellValue::Number(*age)),
                    ("role".to_string(), CellValue::from(*role)),
                ]))
            })
            .collect();

        Self {
            columns,
            rows,
            ..Self::empty()
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        if rows_per_page > 0 {
            self.rows_per_page = rows_per_page;
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────────

    /// All columns, in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Visible columns, in display order
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.visible).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.editing
    }

    /// Staged value for a cell, if the current edit session touched it
    pub fn pending_value(&self, row_id: &str, key: &str) -> Option<&CellValue> {
        self.editing.get(row_id).and_then(|patch| patch.get(key))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_column_visibility(&mut self, key: &str, visible: bool) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.key == key) {
            column.visible = visible;
        }
    }

    /// Append a column and backfill every row with the kind's default value
    pub fn add_column(
        &mut self,
        key: &str,
        label: &str,
        kind: ColumnKind,
        options: Option<Vec<String>>,
    ) -> Result<(), TableError> {
        if self.column(key).is_some() {
            return Err(TableError::DuplicateColumnKey(key.to_string()));
        }

        let order = self.columns.iter().map(|c| c.order + 1).max().unwrap_or(0);
        let options = options.filter(|_| kind == ColumnKind::Select);

        self.columns.push(Column {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            visible: true,
            order,
            options,
        });

        let default = CellValue::default_for(kind);
        for row in &mut self.rows {
            row.values.insert(key.to_string(), default.clone());
        }
        Ok(())
    }

    /// Give a column a new order hint and renumber all columns.
    ///
    /// The hint may be out of range or collide with another column; columns
    /// are stably sorted by hint, so ties keep their previous relative order.
    pub fn reorder_columns(&mut self, key: &str, new_order: i64) {
        let Some(target) = self.columns.iter().position(|c| c.key == key) else {
            return;
        };

        let mut hinted: Vec<(i64, Column)> = self
            .columns
            .drain(..)
            .enumerate()
            .map(|(idx, c)| {
                let hint = if idx == target { new_order } else { c.order as i64 };
                (hint, c)
            })
            .collect();
        hinted.sort_by_key(|(hint, _)| *hint);

        self.columns = hinted.into_iter().map(|(_, c)| c).collect();
        self.renumber_columns();
    }

    /// Move a column one position, expressed as a reorder hint
    pub fn move_column(&mut self, key: &str, direction: MoveDirection) {
        let Some(index) = self.columns.iter().position(|c| c.key == key) else {
            return;
        };

        match direction {
            MoveDirection::Down => {
                if index + 1 < self.columns.len() {
                    // Past the next column's slot; ties go to the earlier column
                    let hint = self.columns[index].order as i64 + 2;
                    self.reorder_columns(key, hint);
                }
            }
            MoveDirection::Up => {
                if index > 0 {
                    let previous = self.columns[index - 1].key.clone();
                    self.move_column(&previous, MoveDirection::Down);
                }
            }
        }
    }

    /// Replace the whole column set
    pub fn set_all_columns(&mut self, columns: Vec<Column>) {
        let mut seen = HashSet::new();
        let mut columns: Vec<Column> = columns
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.key.clone());
                if !fresh {
                    tracing::warn!(key = %c.key, "dropping duplicate column key");
                }
                fresh
            })
            .collect();
        columns.sort_by_key(|c| c.order);

        self.columns = columns;
        self.renumber_columns();
        self.conform_rows();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rows
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a blank row at the top, returning its id
    pub fn add_row(&mut self) -> String {
        let values = self
            .columns
            .iter()
            .map(|c| (c.key.clone(), CellValue::default_for(c.kind)))
            .collect();
        let row = Row::new(values);
        let id = row.id.clone();
        self.rows.insert(0, row);
        id
    }

    pub fn delete_row(&mut self, id: &str) {
        self.editing.remove(id);
        self.rows.retain(|r| r.id != id);
    }

    /// Replace the whole row set
    pub fn replace_all_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows
            .into_iter()
            .map(|mut row| {
                if row.id.is_empty() {
                    row.id = new_row_id();
                }
                row
            })
            .collect();
        self.conform_rows();
        self.page = 0;
    }

    /// Swap in an imported table in one step
    pub fn import(&mut self, columns: Vec<Column>, rows: Vec<Row>) {
        self.set_all_columns(columns);
        self.replace_all_rows(rows);
        self.stop_editing();

        let sort_column_gone = self
            .sort
            .order_by
            .as_deref()
            .is_some_and(|key| self.column(key).is_none());
        if sort_column_gone {
            self.sort = SortState::default();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting & pagination
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_sort(&mut self, order_by: &str) {
        if self.sort.order_by.as_deref() == Some(order_by) {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort.order_by = Some(order_by.to_string());
            self.sort.direction = SortDirection::Asc;
        }
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), TableError> {
        if rows_per_page == 0 {
            return Err(TableError::InvalidPageSize);
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline editing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn start_editing(&mut self) {
        self.is_editing = true;
        self.editing.clear();
    }

    pub fn stop_editing(&mut self) {
        self.is_editing = false;
        self.editing.clear();
    }

    /// Stage a value; rows are untouched until [`TableState::save_all_edits`]
    pub fn edit_cell(&mut self, row_id: &str, key: &str, value: CellValue) {
        if !self.is_editing || self.column(key).is_none() {
            return;
        }
        self.editing
            .entry(row_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Merge staged patches into their rows and leave edit mode
    pub fn save_all_edits(&mut self) {
        let buffer = std::mem::take(&mut self.editing);
        for (row_id, patch) in buffer {
            if let Some(row) = self.rows.iter_mut().find(|r| r.id == row_id) {
                row.values.extend(patch);
            }
        }
        self.is_editing = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation & invariants
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate raw cell input against a column before it is staged
    pub fn validate_cell_input(column: &Column, raw: &str) -> Result<CellValue, TableError> {
        match column.kind {
            ColumnKind::Number => parse_number(raw).map(CellValue::Number).ok_or_else(|| {
                TableError::InvalidNumber {
                    key: column.key.clone(),
                    value: raw.to_string(),
                }
            }),
            ColumnKind::Select => {
                let options = column.select_options();
                if raw.is_empty() || options.is_empty() || options.iter().any(|o| o == raw) {
                    Ok(CellValue::text(raw))
                } else {
                    Err(TableError::InvalidOption {
                        key: column.key.clone(),
                        value: raw.to_string(),
                    })
                }
            }
            ColumnKind::Text | ColumnKind::Email => Ok(CellValue::text(raw)),
        }
    }

    /// Re-establish every invariant on state that came from outside
    /// (e.g. a persisted snapshot). Always leaves edit mode.
    pub fn normalize(mut self) -> Self {
        let columns = std::mem::take(&mut self.columns);
        self.set_all_columns(columns);

        for row in &mut self.rows {
            if row.id.is_empty() {
                row.id = new_row_id();
            }
        }
        self.stop_editing();
        if self.rows_per_page == 0 {
            self.rows_per_page = DEFAULT_ROWS_PER_PAGE;
        }
        self
    }

    fn renumber_columns(&mut self) {
        for (idx, column) in self.columns.iter_mut().enumerate() {
            column.order = idx;
        }
    }

    /// Give every row exactly one value per known column key
    fn conform_rows(&mut self) {
        let keys: HashSet<&str> = self.columns.iter().map(|c| c.key.as_str()).collect();
        for row in &mut self.rows {
            row.values.retain(|k, _| keys.contains(k.as_str()));
            for column in &self.columns {
                row.values
                    .entry(column.key.clone())
                    .or_insert_with(|| CellValue::default_for(column.kind));
            }
        }
    }
}
