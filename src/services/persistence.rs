//! Snapshot persistence for table and preference state
//!
//! The whole store is written as one JSON document after every applied
//! transition and read back once at startup.

use crate::model::{Preferences, StoreListener, TableState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage key of the root snapshot
pub const STORAGE_KEY: &str = "persist:root";

/// Current snapshot layout; anything else is discarded on load
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unsupported snapshot version {found} (expected {SNAPSHOT_VERSION})")]
    VersionMismatch { found: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub table: TableState,
    pub prefs: Preferences,
}

/// Borrowed form written on every change so the store is never cloned
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    table: &'a TableState,
    prefs: &'a Preferences,
}

/// File backing the root snapshot inside `data_dir`
pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{}.json", STORAGE_KEY.replace(':', "-")))
}

pub fn load(path: &Path) -> Result<Option<Snapshot>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    let found = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    if found != u64::from(SNAPSHOT_VERSION) {
        return Err(PersistenceError::VersionMismatch { found });
    }

    let snapshot = serde_json::from_value::<Snapshot>(value)?;
    Ok(Some(snapshot))
}

pub fn save(path: &Path, table: &TableState, prefs: &Preferences) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let snapshot = SnapshotRef {
        version: SNAPSHOT_VERSION,
        table,
        prefs,
    };
    let contents = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, contents)?;
    Ok(())
}

impl Snapshot {
    pub fn new(table: TableState, prefs: Preferences) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            table,
            prefs,
        }
    }

    /// Restore state from `path`, falling back to the seeded defaults.
    ///
    /// `rows_per_page` seeds the fallback table only; a restored table keeps
    /// its own page size.
    pub fn restore_or_default(path: &Path, rows_per_page: usize) -> Snapshot {
        let fallback =
            || Snapshot::new(TableState::seeded().with_rows_per_page(rows_per_page), Preferences::default());

        match load(path) {
            Ok(Some(snapshot)) => {
                tracing::info!(path = %path.display(), rows = snapshot.table.rows().len(), "restored snapshot");
                Snapshot {
                    table: snapshot.table.normalize(),
                    ..snapshot
                }
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "no snapshot found, starting from defaults");
                fallback()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "discarding unreadable snapshot");
                fallback()
            }
        }
    }
}

/// Store listener that rewrites the snapshot after each change
pub struct PersistenceListener {
    path: PathBuf,
}

impl PersistenceListener {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StoreListener for PersistenceListener {
    fn on_change(&mut self, table: &TableState, prefs: &Preferences) {
        if let Err(err) = save(&self.path, table, prefs) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Store, ThemeMode, Transition};

    #[test]
    fn test_snapshot_path_uses_storage_key() {
        let path = snapshot_path(Path::new("/tmp/tabula"));
        assert_eq!(path, PathBuf::from("/tmp/tabula/persist-root.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("persist-root.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("persist-root.json");

        let mut table = TableState::seeded();
        table.set_sort("age");
        let mut prefs = Preferences::default();
        prefs.toggle_theme();

        save(&path, &table, &prefs).unwrap();
        let loaded = load(&path).unwrap().unwrap();

        assert_eq!(loaded.version, SNAPSHOT_VERSION);
        assert_eq!(loaded.table, table);
        assert_eq!(loaded.prefs.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-root.json");
        std::fs::write(&path, r#"{"version": 7, "table": {}, "prefs": {}}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::VersionMismatch { found: 7 }));
    }

    #[test]
    fn test_restore_falls_back_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-root.json");
        std::fs::write(&path, "not json at all").unwrap();

        let snapshot = Snapshot::restore_or_default(&path, 25);
        assert_eq!(snapshot.table.rows().len(), 4);
        assert_eq!(snapshot.table.rows_per_page(), 25);
        assert_eq!(snapshot.prefs, Preferences::default());
    }

    #[test]
    fn test_restore_missing_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::restore_or_default(&dir.path().join("none.json"), 25);
        let seeded = TableState::seeded();

        // row ids are generated per seeding
        assert_eq!(snapshot.table.columns(), seeded.columns());
        let values = |t: &TableState| t.rows().iter().map(|r| r.values.clone()).collect::<Vec<_>>();
        assert_eq!(values(&snapshot.table), values(&seeded));
        assert_eq!(snapshot.table.rows_per_page(), 25);
        assert_eq!(snapshot.prefs, Preferences::default());
    }

    #[test]
    fn test_staged_edits_are_not_restored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-root.json");

        let mut table = TableState::seeded();
        let id = table.rows()[0].id.clone();
        table.start_editing();
        table.edit_cell(&id, "name", CellValue::text("Staged"));
        save(&path, &table, &Preferences::default()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("Staged"));

        let restored = Snapshot::restore_or_default(&path, 10);
        assert!(!restored.table.is_editing());
        assert!(restored.table.edit_buffer().is_empty());
        assert_eq!(restored.table.row(&id).unwrap().display_value("name"), "Ada Lovelace");
    }

    #[test]
    fn test_listener_writes_after_each_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-root.json");

        let mut store = Store::default();
        store.subscribe(Box::new(PersistenceListener::new(path.clone())));
        store.dispatch(Transition::AddRow).unwrap();

        let restored = Snapshot::restore_or_default(&path, 10);
        assert_eq!(restored.table.rows().len(), 5);

        store.dispatch(Transition::ToggleTheme).unwrap();
        let restored = Snapshot::restore_or_default(&path, 10);
        assert_eq!(restored.prefs.theme, ThemeMode::Dark);
    }
}
