//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them, usually by dispatching a store transition.

use crate::model::ColumnKind;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Grid Navigation
    // ─────────────────────────────────────────────────────────────────────────
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    NextPage,
    PrevPage,
    /// Step to the next allowed rows-per-page value
    CycleRowsPerPage,
    /// Sort by the column under the cursor (toggles direction on repeat)
    SortByCursorColumn,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Rows
    // ─────────────────────────────────────────────────────────────────────────
    AddRow,
    /// Ask before deleting the row under the cursor
    RequestDeleteRow,
    ConfirmDeleteRow(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Editing
    // ─────────────────────────────────────────────────────────────────────────
    StartEditing,
    SaveAllEdits,
    CancelAllEdits,
    /// Open the cell editor on the cursor cell
    OpenCellEditor,
    /// Validate and stage raw input for one cell
    CommitCellEdit {
        row_id: String,
        key: String,
        input: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────────
    OpenManageColumns,
    CloseManageColumns,
    ToggleColumnVisibility(String),
    MoveColumnUp(String),
    MoveColumnDown(String),
    OpenAddColumn,
    SubmitAddColumn {
        key: String,
        label: String,
        kind: ColumnKind,
        options: Option<Vec<String>>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Import / Export
    // ─────────────────────────────────────────────────────────────────────────
    OpenImport,
    ImportFile(String),
    ExportCsv,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals & Preferences
    // ─────────────────────────────────────────────────────────────────────────
    ToggleTheme,
    OpenQuitDialog,
    OpenHelp,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::CursorUp => write!(f, "CursorUp"),
            Action::CursorDown => write!(f, "CursorDown"),
            Action::CursorLeft => write!(f, "CursorLeft"),
            Action::CursorRight => write!(f, "CursorRight"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::CycleRowsPerPage => write!(f, "CycleRowsPerPage"),
            Action::SortByCursorColumn => write!(f, "SortByCursorColumn"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput({})", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::AddRow => write!(f, "AddRow"),
            Action::RequestDeleteRow => write!(f, "RequestDeleteRow"),
            Action::ConfirmDeleteRow(id) => write!(f, "ConfirmDeleteRow({})", id),
            Action::StartEditing => write!(f, "StartEditing"),
            Action::SaveAllEdits => write!(f, "SaveAllEdits"),
            Action::CancelAllEdits => write!(f, "CancelAllEdits"),
            Action::OpenCellEditor => write!(f, "OpenCellEditor"),
            Action::CommitCellEdit { row_id, key, .. } => {
                write!(f, "CommitCellEdit({}, {})", row_id, key)
            }
            Action::OpenManageColumns => write!(f, "OpenManageColumns"),
            Action::CloseManageColumns => write!(f, "CloseManageColumns"),
            Action::ToggleColumnVisibility(key) => write!(f, "ToggleColumnVisibility({})", key),
            Action::MoveColumnUp(key) => write!(f, "MoveColumnUp({})", key),
            Action::MoveColumnDown(key) => write!(f, "MoveColumnDown({})", key),
            Action::OpenAddColumn => write!(f, "OpenAddColumn"),
            Action::SubmitAddColumn { key, kind, .. } => {
                write!(f, "SubmitAddColumn({}, {})", key, kind.name())
            }
            Action::OpenImport => write!(f, "OpenImport"),
            Action::ImportFile(path) => write!(f, "ImportFile({})", path),
            Action::ExportCsv => write!(f, "ExportCsv"),
            Action::ToggleTheme => write!(f, "ToggleTheme"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_payloads() {
        let action = Action::CommitCellEdit {
            row_id: "r1".into(),
            key: "age".into(),
            input: "a very long value".into(),
        };
        assert_eq!(action.to_string(), "CommitCellEdit(r1, age)");
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
    }
}
