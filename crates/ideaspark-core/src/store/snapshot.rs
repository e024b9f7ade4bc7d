//! Whole-state snapshot persistence.
//!
//! The entire application state lives in one JSON blob, written after
//! every mutation and read once at startup. The file name keeps the
//! original storage namespace.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::entry::Entry;
use crate::error::StorageError;
use crate::user::User;

/// Storage namespace; also the snapshot file stem.
pub const STORE_KEY: &str = "ideaspark-storage";

/// Everything the application persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub user: User,
}

/// Load/save boundary over the snapshot blob.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Open the store at the default location.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join(format!("{STORE_KEY}.json")),
        })
    }

    /// Open the store against an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, `None` when no snapshot exists yet.
    ///
    /// A malformed snapshot is surfaced as an error rather than silently
    /// replaced with defaults; the caller decides what to do with a
    /// corrupt journal.
    pub fn load(&self) -> Result<Option<AppState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| StorageError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let mut state: AppState =
            serde_json::from_str(&content).map_err(|e| StorageError::LoadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        for entry in &mut state.entries {
            entry.reconcile_stage();
        }
        Ok(Some(state))
    }

    /// Write the full state snapshot.
    pub fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(state).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{AiQuestion, DerivedStage, EntryDraft};

    #[test]
    fn missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::with_path(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn round_trip_preserves_entries_and_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::with_path(dir.path().join("state.json"));

        let mut state = AppState::default();
        state.entries.push(Entry::new(EntryDraft {
            title: "hello".into(),
            content: "world".into(),
            ..Default::default()
        }));
        state.user.streak = 4;
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].title, "hello");
        assert_eq!(loaded.user.streak, 4);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = SnapshotStore::with_path(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn pending_stages_roll_back_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::with_path(dir.path().join("state.json"));

        let mut state = AppState::default();
        let mut entry = Entry::new(EntryDraft::default());
        entry.ai_questions = vec![AiQuestion {
            question: "q?".into(),
            answer: String::new(),
        }];
        entry.stage = DerivedStage::StepsPending;
        state.entries.push(entry);
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.entries[0].stage, DerivedStage::QuestionsReady);
    }

    #[test]
    fn stage_inferred_for_snapshots_without_the_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let json = serde_json::json!({
            "entries": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "title": "old",
                "content": "snapshot",
                "created_at": "2026-01-01T00:00:00Z",
                "updated_at": "2026-01-01T00:00:00Z",
                "ai_questions": [{"question": "q?", "answer": "a"}],
                "actionable_steps": []
            }],
            "user": {}
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let store = SnapshotStore::with_path(path);
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.entries[0].stage, DerivedStage::QuestionsReady);
    }
}
