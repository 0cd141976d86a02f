//! Store - owner of table and preference state
//!
//! The store is the only place where state changes. Callers describe a
//! change as a [`Transition`]; the store applies it and then notifies every
//! registered [`StoreListener`] (persistence, for instance).

use super::column::{Column, ColumnKind};
use super::prefs::Preferences;
use super::row::{CellValue, Row};
use super::table::{MoveDirection, TableError, TableState};

/// A named state change
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    // ─────────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────────
    ToggleColumnVisibility {
        key: String,
        visible: bool,
    },
    AddColumn {
        key: String,
        label: String,
        kind: ColumnKind,
        options: Option<Vec<String>>,
    },
    ReorderColumns {
        key: String,
        new_order: i64,
    },
    MoveColumn {
        key: String,
        direction: MoveDirection,
    },
    SetAllColumns(Vec<Column>),

    // ─────────────────────────────────────────────────────────────────────────
    // Rows
    // ─────────────────────────────────────────────────────────────────────────
    AddRow,
    DeleteRow(String),
    ReplaceAllRows(Vec<Row>),
    Import {
        columns: Vec<Column>,
        rows: Vec<Row>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting & pagination
    // ─────────────────────────────────────────────────────────────────────────
    SetSort(String),
    SetPage(usize),
    SetRowsPerPage(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Inline editing
    // ─────────────────────────────────────────────────────────────────────────
    StartEditing,
    StopEditing,
    EditCell {
        row_id: String,
        key: String,
        value: CellValue,
    },
    SaveAllEdits,

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────
    ToggleTheme,
    SetSearch(String),
    SetManageColumnsOpen(bool),
}

impl Transition {
    /// Short name for logs (payloads can be whole tables)
    pub fn name(&self) -> &'static str {
        match self {
            Transition::ToggleColumnVisibility { .. } => "toggle_column_visibility",
            Transition::AddColumn { .. } => "add_column",
            Transition::ReorderColumns { .. } => "reorder_columns",
            Transition::MoveColumn { .. } => "move_column",
            Transition::SetAllColumns(_) => "set_all_columns",
            Transition::AddRow => "add_row",
            Transition::DeleteRow(_) => "delete_row",
            Transition::ReplaceAllRows(_) => "replace_all_rows",
            Transition::Import { .. } => "import",
            Transition::SetSort(_) => "set_sort",
            Transition::SetPage(_) => "set_page",
            Transition::SetRowsPerPage(_) => "set_rows_per_page",
            Transition::StartEditing => "start_editing",
            Transition::StopEditing => "stop_editing",
            Transition::EditCell { .. } => "edit_cell",
            Transition::SaveAllEdits => "save_all_edits",
            Transition::ToggleTheme => "toggle_theme",
            Transition::SetSearch(_) => "set_search",
            Transition::SetManageColumnsOpen(_) => "set_manage_columns_open",
        }
    }
}

/// Observer notified after every applied transition
pub trait StoreListener {
    fn on_change(&mut self, table: &TableState, prefs: &Preferences);
}

/// State owner for the table and preferences
pub struct Store {
    table: TableState,
    prefs: Preferences,
    listeners: Vec<Box<dyn StoreListener>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(TableState::default(), Preferences::default())
    }
}

impl Store {
    pub fn new(table: TableState, prefs: Preferences) -> Self {
        Self {
            table,
            prefs,
            listeners: Vec::new(),
        }
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn subscribe(&mut self, listener: Box<dyn StoreListener>) {
        self.listeners.push(listener);
    }

    /// Apply a transition and notify listeners.
    ///
    /// A rejected transition leaves the state untouched and notifies no one.
    pub fn dispatch(&mut self, transition: Transition) -> Result<(), TableError> {
        let name = transition.name();

        if let Err(err) = self.apply(transition) {
            tracing::debug!(transition = name, error = %err, "transition rejected");
            return Err(err);
        }

        tracing::trace!(transition = name, "transition applied");
        for listener in &mut self.listeners {
            listener.on_change(&self.table, &self.prefs);
        }
        Ok(())
    }

    fn apply(&mut self, transition: Transition) -> Result<(), TableError> {
        let table = &mut self.table;

        match transition {
            Transition::ToggleColumnVisibility { key, visible } => {
                table.toggle_column_visibility(&key, visible)
            }
            Transition::AddColumn {
                key,
                label,
                kind,
                options,
            } => table.add_column(&key, &label, kind, options)?,
            Transition::ReorderColumns { key, new_order } => {
                table.reorder_columns(&key, new_order)
            }
            Transition::MoveColumn { key, direction } => table.move_column(&key, direction),
            Transition::SetAllColumns(columns) => table.set_all_columns(columns),

            Transition::AddRow => {
                table.add_row();
            }
            Transition::DeleteRow(id) => table.delete_row(&id),
            Transition::ReplaceAllRows(rows) => table.replace_all_rows(rows),
            Transition::Import { columns, rows } => table.import(columns, rows),

            Transition::SetSort(key) => table.set_sort(&key),
            Transition::SetPage(page) => table.set_page(page),
            Transition::SetRowsPerPage(n) => table.set_rows_per_page(n)?,

            Transition::StartEditing => table.start_editing(),
            Transition::StopEditing => table.stop_editing(),
            Transition::EditCell { row_id, key, value } => table.edit_cell(&row_id, &key, value),
            Transition::SaveAllEdits => table.save_all_edits(),

            Transition::ToggleTheme => self.prefs.toggle_theme(),
            Transition::SetSearch(text) => {
                self.prefs.set_search(&text);
                // a new filter invalidates the current page
                table.set_page(0);
            }
            Transition::SetManageColumnsOpen(open) => self.prefs.set_manage_columns_open(open),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prefs::ThemeMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records how many notifications arrived and the last seen row count
    struct Recorder {
        seen: Rc<RefCell<Vec<usize>>>,
    }

    impl StoreListener for Recorder {
        fn on_change(&mut self, table: &TableState, _prefs: &Preferences) {
            self.seen.borrow_mut().push(table.rows().len());
        }
    }

    fn store_with_recorder() -> (Store, Rc<RefCell<Vec<usize>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::default();
        store.subscribe(Box::new(Recorder { seen: seen.clone() }));
        (store, seen)
    }

    #[test]
    fn test_dispatch_notifies_listeners() {
        let (mut store, seen) = store_with_recorder();
        store.dispatch(Transition::AddRow).unwrap();
        store.dispatch(Transition::ToggleTheme).unwrap();

        assert_eq!(*seen.borrow(), vec![5, 5]);
        assert_eq!(store.prefs().theme, ThemeMode::Dark);
    }

    #[test]
    fn test_rejected_transition_is_silent() {
        let (mut store, seen) = store_with_recorder();
        let before = store.table().clone();

        let result = store.dispatch(Transition::AddColumn {
            key: "name".into(),
            label: "Name again".into(),
            kind: ColumnKind::Text,
            options: None,
        });

        assert!(matches!(result, Err(TableError::DuplicateColumnKey(_))));
        assert_eq!(store.table(), &before);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_search_resets_page() {
        let mut store = Store::default();
        store.dispatch(Transition::SetPage(3)).unwrap();
        store
            .dispatch(Transition::SetSearch("ada".into()))
            .unwrap();
        assert_eq!(store.table().page(), 0);
        assert_eq!(store.prefs().global_search, "ada");
    }

    #[test]
    fn test_edit_session_through_store() {
        let mut store = Store::default();
        let id = store.table().rows()[0].id.clone();

        store.dispatch(Transition::StartEditing).unwrap();
        store
            .dispatch(Transition::EditCell {
                row_id: id.clone(),
                key: "role".into(),
                value: CellValue::text("Countess"),
            })
            .unwrap();
        store.dispatch(Transition::SaveAllEdits).unwrap();

        assert_eq!(
            store.table().row(&id).unwrap().get("role"),
            Some(&CellValue::text("Countess"))
        );
        assert!(!store.table().is_editing());
    }

    #[test]
    fn test_transition_names_are_stable() {
        assert_eq!(Transition::AddRow.name(), "add_row");
        assert_eq!(Transition::SetSearch(String::new()).name(), "set_search");
    }
}
