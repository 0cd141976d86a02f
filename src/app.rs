//! App - Root component
//!
//! Owns the store, the modal stack and every child component. Key events are
//! routed to the top modal, then search input, then the Manage Columns panel,
//! and finally the grid. Actions come back through `update`, which turns them
//! into store transitions.

use crate::action::Action;
use crate::component::Component;
use crate::components::grid::cell_text;
use crate::components::{
    draw_main_screen, AddColumnDialog, CellEditor, ColumnManager, ConfirmDeleteDialog, DataGrid,
    ErrorDialog, HelpDialog, ImportDialog, Palette, QuitDialog, ScreenContext,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{
    project, Column, MoveDirection, Store, TableError, TableState, Transition, ALLOWED_PAGE_SIZES,
};
use crate::services::csv_codec;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::path::Path;

/// Main application state
pub struct App {
    /// Table and preference state
    pub store: Store,

    /// Loaded configuration
    pub config: Config,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// One-line feedback shown above the help bar
    pub status_message: Option<String>,

    /// Whether typed characters go to the search box
    pub search_mode: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub grid: DataGrid,
    pub column_manager: ColumnManager,
    pub cell_editor: CellEditor,
    pub add_column_dialog: AddColumnDialog,
    pub import_dialog: ImportDialog,
    pub confirm_delete_dialog: ConfirmDeleteDialog,
    pub error_dialog: ErrorDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Store::default(), Config::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance
    pub fn new(store: Store, config: Config) -> App {
        App {
            store,
            config,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            search_mode: false,
            grid: DataGrid::new(),
            column_manager: ColumnManager::new(),
            cell_editor: CellEditor::new(),
            add_column_dialog: AddColumnDialog::new(),
            import_dialog: ImportDialog::new(),
            confirm_delete_dialog: ConfirmDeleteDialog::new(),
            error_dialog: ErrorDialog,
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    pub fn table(&self) -> &TableState {
        self.store.table()
    }

    fn palette(&self) -> Palette {
        Palette::for_mode(self.store.prefs().theme)
    }

    /// Dispatch a transition whose rejection is only logged
    fn apply(&mut self, transition: Transition) {
        let name = transition.name();
        if let Err(err) = self.store.dispatch(transition) {
            tracing::warn!(transition = name, error = %err, "transition rejected");
        }
    }

    /// Number of rows on the current page
    fn page_len(&self) -> usize {
        project(self.table(), &self.store.prefs().global_search)
            .rows
            .len()
    }

    /// Id of the row under the cursor
    fn cursor_row_id(&self) -> Option<String> {
        project(self.table(), &self.store.prefs().global_search)
            .rows
            .get(self.grid.cursor_row)
            .map(|row| row.id.clone())
    }

    /// Visible column under the cursor
    fn cursor_column(&self) -> Option<Column> {
        self.table()
            .visible_columns()
            .get(self.grid.cursor_col)
            .map(|c| (*c).clone())
    }

    fn show_error(&mut self, message: String) {
        self.modals.push(Modal::Error { message });
    }

    /// Read, decode and swap in a CSV file; failures leave the table untouched
    pub fn import_csv_file(&mut self, path: &Path) {
        let result = csv_codec::read_file(path).and_then(|text| csv_codec::decode(&text));

        match result {
            Ok(imported) => {
                let (rows, columns) = (imported.rows.len(), imported.columns.len());
                self.apply(Transition::Import {
                    columns: imported.columns,
                    rows: imported.rows,
                });
                self.grid.reset_row();
                self.grid.cursor_col = 0;
                tracing::info!(path = %path.display(), rows, columns, "imported csv");
                self.status_message = Some(format!(
                    "Imported {} rows and {} columns from {}",
                    rows,
                    columns,
                    path.display()
                ));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "csv import failed");
                self.show_error(format!("CSV Import Error: {}", err));
            }
        }
    }

    /// Write the visible columns of every row to the export directory
    fn export_csv(&mut self) {
        let dir = self.config.export_dir();
        let result = {
            let table = self.store.table();
            let columns = table.visible_columns();
            csv_codec::export_to_dir(&dir, &columns, table.rows())
        };

        match result {
            Ok(path) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "csv export failed");
                self.show_error(format!("CSV Export Error: {}", err));
            }
        }
    }

    /// Report a rejected transition or input when configured to
    fn report(&mut self, err: &TableError) -> bool {
        if self.config.report_rejections {
            self.status_message = Some(err.to_string());
        }
        self.config.report_rejections
    }

    fn next_rows_per_page(current: usize) -> usize {
        ALLOWED_PAGE_SIZES
            .iter()
            .copied()
            .find(|&n| n > current)
            .unwrap_or(ALLOWED_PAGE_SIZES[0])
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        self.status_message = None;
        if self.search_mode {
            self.handle_search_key_event(key)
        } else if self.store.prefs().manage_columns_open {
            self.column_manager.set_columns(self.store.table().columns());
            self.column_manager.handle_key_event(key)
        } else {
            self.grid.editing = self.store.table().is_editing();
            self.grid.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                tracing::info!("quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Grid Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::CursorUp => self.grid.move_up(),
            Action::CursorDown => {
                let len = self.page_len();
                self.grid.move_down(len);
            }
            Action::CursorLeft => self.grid.move_left(),
            Action::CursorRight => {
                let count = self.table().visible_columns().len();
                self.grid.move_right(count);
            }
            Action::NextPage => {
                let projection = project(self.table(), &self.store.prefs().global_search);
                let (page, page_count) = (projection.page, projection.page_count);
                if page + 1 < page_count {
                    self.apply(Transition::SetPage(page + 1));
                    self.grid.reset_row();
                }
            }
            Action::PrevPage => {
                let page = project(self.table(), &self.store.prefs().global_search).page;
                if page > 0 {
                    self.apply(Transition::SetPage(page - 1));
                    self.grid.reset_row();
                }
            }
            Action::CycleRowsPerPage => {
                let next = Self::next_rows_per_page(self.table().rows_per_page());
                self.apply(Transition::SetRowsPerPage(next));
                self.grid.reset_row();
                self.status_message = Some(format!("Rows per page: {}", next));
            }
            Action::SortByCursorColumn => {
                if let Some(column) = self.cursor_column() {
                    self.apply(Transition::SetSort(column.key));
                    self.grid.reset_row();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.search_mode = true,
            Action::ExitSearchMode => self.search_mode = false,
            Action::SearchInput(c) => {
                let mut query = self.store.prefs().global_search.clone();
                query.push(c);
                self.apply(Transition::SetSearch(query));
                self.grid.reset_row();
            }
            Action::SearchBackspace => {
                let mut query = self.store.prefs().global_search.clone();
                query.pop();
                self.apply(Transition::SetSearch(query));
                self.grid.reset_row();
            }

            // ─────────────────────────────────────────────────────────────────
            // Rows
            // ─────────────────────────────────────────────────────────────────
            Action::AddRow => {
                self.apply(Transition::AddRow);
                self.apply(Transition::SetPage(0));
                self.grid.reset_row();
                self.status_message = Some("Row added".to_string());
            }
            Action::RequestDeleteRow => {
                if let Some(row_id) = self.cursor_row_id() {
                    self.confirm_delete_dialog.open(&row_id);
                    self.modals.push(Modal::ConfirmDelete { row_id });
                }
            }
            Action::ConfirmDeleteRow(row_id) => {
                self.modals.pop();
                self.apply(Transition::DeleteRow(row_id));
                let len = self.page_len();
                self.grid.clamp(len, usize::MAX);
                self.status_message = Some("Row deleted".to_string());
            }

            // ─────────────────────────────────────────────────────────────────
            // Inline Editing
            // ─────────────────────────────────────────────────────────────────
            Action::StartEditing => {
                self.apply(Transition::StartEditing);
                self.status_message = Some("Editing: Enter edits a cell, Ctrl+s saves all".to_string());
            }
            Action::SaveAllEdits => {
                let staged: usize = self.table().edit_buffer().values().map(|patch| patch.len()).sum();
                self.apply(Transition::SaveAllEdits);
                self.status_message = Some(format!("Saved {} edited cells", staged));
            }
            Action::CancelAllEdits => {
                self.apply(Transition::StopEditing);
                self.status_message = Some("Edits discarded".to_string());
            }
            Action::OpenCellEditor => {
                if !self.table().is_editing() {
                    return Ok(None);
                }
                let (Some(row_id), Some(column)) = (self.cursor_row_id(), self.cursor_column()) else {
                    return Ok(None);
                };
                let current = self
                    .table()
                    .row(&row_id)
                    .map(|row| cell_text(self.table(), row, &column).0)
                    .unwrap_or_default();
                self.cell_editor.open(&row_id, &column, current);
                self.modals.push(Modal::CellEditor);
            }
            Action::CommitCellEdit { row_id, key, input } => {
                let Some(column) = self.table().column(&key).cloned() else {
                    self.modals.pop();
                    return Ok(None);
                };
                match TableState::validate_cell_input(&column, &input) {
                    Ok(value) => {
                        self.apply(Transition::EditCell { row_id, key, value });
                        self.modals.pop();
                    }
                    Err(err) => {
                        if self.report(&err) {
                            self.cell_editor.error = Some(err.to_string());
                        } else {
                            self.modals.pop();
                        }
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Columns
            // ─────────────────────────────────────────────────────────────────
            Action::OpenManageColumns => {
                self.column_manager.set_columns(self.store.table().columns());
                self.apply(Transition::SetManageColumnsOpen(true));
            }
            Action::CloseManageColumns => self.apply(Transition::SetManageColumnsOpen(false)),
            Action::ToggleColumnVisibility(key) => {
                if let Some(column) = self.table().column(&key) {
                    let visible = !column.visible;
                    self.apply(Transition::ToggleColumnVisibility { key, visible });
                    let count = self.table().visible_columns().len();
                    self.grid.clamp(usize::MAX, count);
                }
            }
            Action::MoveColumnUp(key) => self.apply(Transition::MoveColumn {
                key,
                direction: MoveDirection::Up,
            }),
            Action::MoveColumnDown(key) => self.apply(Transition::MoveColumn {
                key,
                direction: MoveDirection::Down,
            }),
            Action::OpenAddColumn => {
                self.add_column_dialog.reset();
                self.modals.push(Modal::AddColumn);
            }
            Action::SubmitAddColumn {
                key,
                label,
                kind,
                options,
            } => {
                let result = self.store.dispatch(Transition::AddColumn {
                    key: key.clone(),
                    label: label.clone(),
                    kind,
                    options,
                });
                match result {
                    Ok(()) => {
                        self.modals.pop();
                        self.add_column_dialog.reset();
                        self.status_message = Some(format!("Added column '{}' ({})", label, key));
                    }
                    Err(err) => {
                        if self.report(&err) {
                            self.add_column_dialog.error = Some(err.to_string());
                        } else {
                            self.modals.pop();
                            self.add_column_dialog.reset();
                        }
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Import / Export
            // ─────────────────────────────────────────────────────────────────
            Action::OpenImport => self.modals.push(Modal::Import),
            Action::ImportFile(path) => {
                self.modals.pop();
                self.import_csv_file(Path::new(&path));
            }
            Action::ExportCsv => self.export_csv(),

            // ─────────────────────────────────────────────────────────────────
            // Modals & Preferences
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleTheme => self.apply(Transition::ToggleTheme),
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let palette = self.palette();
        let ctx = ScreenContext {
            table: self.store.table(),
            prefs: self.store.prefs(),
            palette: &palette,
            search_mode: self.search_mode,
            status_message: self.status_message.as_deref(),
        };
        draw_main_screen(frame, area, &mut self.grid, &mut self.column_manager, &ctx)?;

        // Draw modals bottom to top
        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal, &palette)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ConfirmDelete { .. } => self.confirm_delete_dialog.handle_key_event(key),
            Modal::CellEditor => self.cell_editor.handle_key_event(key),
            Modal::AddColumn => self.add_column_dialog.handle_key_event(key),
            Modal::Import => self.import_dialog.handle_key_event(key),
            Modal::Error { .. } => self.error_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal, palette: &Palette) -> Result<()> {
        match modal {
            Modal::QuitConfirm => {
                let pending = !self.store.table().edit_buffer().is_empty();
                self.quit_dialog.draw_with_palette(frame, area, palette, pending)?;
            }
            Modal::ConfirmDelete { .. } => {
                self.confirm_delete_dialog.draw_with_palette(frame, area, palette)?;
            }
            Modal::CellEditor => self.cell_editor.draw_with_palette(frame, area, palette)?,
            Modal::AddColumn => self.add_column_dialog.draw_with_palette(frame, area, palette)?,
            Modal::Import => self.import_dialog.draw_with_palette(frame, area, palette)?,
            Modal::Error { message } => {
                self.error_dialog.draw_with_message(frame, area, message, palette)?;
            }
            Modal::Help => self.help_dialog.draw_with_palette(frame, area, palette)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, ColumnKind, ThemeMode};
    use ratatui::{backend::TestBackend, Terminal};

    fn run(app: &mut App, action: Action) {
        let mut next = Some(action);
        while let Some(a) = next {
            next = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        press_with(app, code, KeyModifiers::NONE);
    }

    fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(action) = app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap() {
            run(app, action);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_quit_flow() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_delete_row_with_confirmation() {
        let mut app = App::default();
        let first = app.table().rows()[0].id.clone();

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.modals.top(), Some(Modal::ConfirmDelete { row_id }) if *row_id == first));
        press(&mut app, KeyCode::Char('y'));

        assert!(app.modals.is_empty());
        assert_eq!(app.table().rows().len(), 3);
        assert!(app.table().row(&first).is_none());
    }

    #[test]
    fn test_inline_edit_flow() {
        let mut app = App::default();
        let ada = app.table().rows()[0].id.clone();

        press(&mut app, KeyCode::Char('e'));
        assert!(app.table().is_editing());

        // name, email, age
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::CellEditor));
        assert_eq!(app.cell_editor.input, "28");

        // invalid number stays in the editor
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::CellEditor));
        assert!(app.cell_editor.error.is_some());
        assert!(app.table().edit_buffer().is_empty());

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "9");
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.table().pending_value(&ada, "age"), Some(&CellValue::Number(29.0)));

        press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!app.table().is_editing());
        assert_eq!(app.table().row(&ada).unwrap().get("age"), Some(&CellValue::Number(29.0)));
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut app = App::default();
        let ada = app.table().rows()[0].id.clone();

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, " II");
        press(&mut app, KeyCode::Enter);
        assert!(app.table().pending_value(&ada, "name").is_some());

        press(&mut app, KeyCode::Esc);
        assert!(!app.table().is_editing());
        assert_eq!(app.table().row(&ada).unwrap().display_value("name"), "Ada Lovelace");
    }

    #[test]
    fn test_rejected_input_is_silent_when_not_reported() {
        let mut app = App::new(
            Store::default(),
            Config {
                report_rejections: false,
                ..Config::default()
            },
        );
        press(&mut app, KeyCode::Char('e'));
        // name, email, age
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::CellEditor));

        app.status_message = None;
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Enter);

        assert!(app.modals.is_empty());
        assert!(app.status_message.is_none());
        assert!(app.cell_editor.error.is_none());
        assert!(app.table().edit_buffer().is_empty());
        assert!(app.table().is_editing());
    }

    #[test]
    fn test_rejected_transition_leaves_state() {
        let mut app = App::default();
        let before = app.table().clone();
        app.apply(Transition::SetRowsPerPage(0));
        assert_eq!(app.table(), &before);
        assert_eq!(app.table().rows_per_page(), 10);
    }

    #[test]
    fn test_search_filters_and_resets_page() {
        let mut app = App::default();
        run(&mut app, Action::CycleRowsPerPage);
        assert_eq!(app.table().rows_per_page(), 25);

        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_mode);
        type_text(&mut app, "grace");
        press(&mut app, KeyCode::Enter);
        assert!(!app.search_mode);

        assert_eq!(app.store.prefs().global_search, "grace");
        assert_eq!(app.page_len(), 1);
        assert_eq!(app.table().page(), 0);
    }

    #[test]
    fn test_rows_per_page_cycle() {
        assert_eq!(App::next_rows_per_page(5), 10);
        assert_eq!(App::next_rows_per_page(10), 25);
        assert_eq!(App::next_rows_per_page(25), 50);
        assert_eq!(App::next_rows_per_page(50), 5);
        assert_eq!(App::next_rows_per_page(7), 10);
    }

    #[test]
    fn test_sort_by_cursor_column_toggles() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.table().sort().order_by.as_deref(), Some("name"));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.table().sort().direction, crate::model::SortDirection::Desc);
    }

    #[test]
    fn test_manage_columns_panel() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.store.prefs().manage_columns_open);

        // hide "name", then move it below "email"
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.table().column("name").unwrap().visible);
        press(&mut app, KeyCode::Char('J'));
        let keys: Vec<&str> = app.table().columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["email", "name", "age", "role"]);

        press(&mut app, KeyCode::Esc);
        assert!(!app.store.prefs().manage_columns_open);
    }

    #[test]
    fn test_add_column_through_form() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.modals.top(), Some(&Modal::AddColumn));

        type_text(&mut app, "Team");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "team");
        press(&mut app, KeyCode::Enter);

        assert!(app.modals.is_empty());
        assert!(app.add_column_dialog.label.is_empty());
        let column = app.table().column("team").unwrap();
        assert_eq!(column.kind, ColumnKind::Text);
        assert_eq!(column.order, 4);
    }

    #[test]
    fn test_duplicate_column_key_is_reported_in_form() {
        let mut app = App::default();
        run(&mut app, Action::OpenAddColumn);
        run(
            &mut app,
            Action::SubmitAddColumn {
                key: "name".into(),
                label: "Other".into(),
                kind: ColumnKind::Text,
                options: None,
            },
        );
        assert_eq!(app.modals.top(), Some(&Modal::AddColumn));
        assert!(app.add_column_dialog.error.as_deref().unwrap().contains("already exists"));
        assert_eq!(app.table().columns().len(), 4);
    }

    #[test]
    fn test_import_error_opens_modal_and_keeps_table() {
        let mut app = App::default();
        let before = app.table().clone();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "   ").unwrap();

        run(&mut app, Action::OpenImport);
        run(&mut app, Action::ImportFile(path.display().to_string()));

        match app.modals.top() {
            Some(Modal::Error { message }) => assert!(message.starts_with("CSV Import Error: ")),
            other => panic!("expected error modal, got {:?}", other),
        }
        assert_eq!(app.table(), &before);
    }

    #[test]
    fn test_import_replaces_table() {
        let mut app = App::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "Name,Age\nAda,28\nAlan,31").unwrap();

        app.import_csv_file(&path);

        assert!(app.modals.is_empty());
        let keys: Vec<&str> = app.table().columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(app.table().rows().len(), 2);
        assert!(app.status_message.as_deref().unwrap().starts_with("Imported 2 rows"));
    }

    #[test]
    fn test_export_writes_visible_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            Store::default(),
            Config {
                export_dir: Some(dir.path().to_path_buf()),
                ..Config::default()
            },
        );
        run(&mut app, Action::ToggleColumnVisibility("email".into()));
        press(&mut app, KeyCode::Char('x'));

        let message = app.status_message.clone().unwrap();
        assert!(message.starts_with("Exported to "));
        let path = message.trim_start_matches("Exported to ");
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("\"Name\",\"Age\",\"Role\""));
        assert_eq!(contents.lines().count(), 5);
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.store.prefs().theme, ThemeMode::Dark);
    }

    #[test]
    fn test_draw_main_screen_and_modal() {
        let mut app = App::default();
        let text = screen(&mut app);
        assert!(text.contains("Tabula"));
        assert!(text.contains("Ada Lovelace"));

        press(&mut app, KeyCode::Char('?'));
        let text = screen(&mut app);
        assert!(text.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = App::default();
        run(&mut app, Action::OpenHelp);
        press_with(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
