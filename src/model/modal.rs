//! Modal stack for managing overlays
//!
//! Only the top modal receives key events; modals are drawn bottom to top.
//! The Manage Columns panel is not a modal: its open state is a persisted
//! preference.

/// An overlay drawn on top of the grid
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Row deletion confirmation
    ConfirmDelete { row_id: String },
    /// Single-cell input while inline editing
    CellEditor,
    /// New column form
    AddColumn,
    /// CSV import path prompt
    Import,
    /// Blocking error notification
    Error { message: String },
    /// Keyboard shortcuts
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterate from bottom to top, in draw order
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }
}
