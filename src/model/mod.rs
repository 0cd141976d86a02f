//! Model layer - state and the transitions that change it
//!
//! - `TableState` - columns, rows, sort, pagination and the edit buffer
//! - `Preferences` - theme, search text, column panel visibility
//! - `Store` - owns both and notifies listeners after each transition
//! - `projection` - derived filter/sort/page view
//! - `ModalStack` - overlay management for the view layer

pub mod column;
pub mod modal;
pub mod prefs;
pub mod projection;
pub mod row;
pub mod store;
pub mod table;

pub use column::{slugify, Column, ColumnKind};
pub use prefs::{Preferences, ThemeMode};
pub use projection::{project, Projection};
pub use row::{CellValue, Row};
pub use store::{Store, StoreListener, Transition};
pub use table::{MoveDirection, SortDirection, TableError, TableState, ALLOWED_PAGE_SIZES};
