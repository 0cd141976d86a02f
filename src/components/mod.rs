//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod add_column_dialog;
pub mod cell_editor;
pub mod column_manager;
pub mod confirm_delete_dialog;
pub mod error_dialog;
pub mod grid;
pub mod help_dialog;
pub mod import_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod screen;
pub mod theme;

pub use add_column_dialog::AddColumnDialog;
pub use cell_editor::CellEditor;
pub use column_manager::ColumnManager;
pub use confirm_delete_dialog::ConfirmDeleteDialog;
pub use error_dialog::ErrorDialog;
pub use grid::DataGrid;
pub use help_dialog::HelpDialog;
pub use import_dialog::ImportDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use screen::{draw_main_screen, ScreenContext};
pub use theme::Palette;
