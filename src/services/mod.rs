//! File-backed services
//!
//! - CSV import and export
//! - Snapshot persistence of the store

pub mod csv_codec;
pub mod persistence;

pub use persistence::{PersistenceListener, Snapshot};
