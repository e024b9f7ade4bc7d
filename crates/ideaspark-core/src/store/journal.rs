//! The journal store: the single state container behind every frontend.
//!
//! Owns the entry collection and the user singleton, applies all
//! mutations, recomputes the streak on entry creation, persists a
//! snapshot after every change, and accumulates change events for
//! subscribers to drain.

use chrono::{Local, Utc};
use uuid::Uuid;

use super::snapshot::{AppState, SnapshotStore};
use crate::entry::{dedup_tags, DerivedStage, Entry, EntryDraft, EntryPatch};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::streak;
use crate::user::{NotificationTime, User};

pub struct Journal {
    state: AppState,
    snapshots: SnapshotStore,
    pending_events: Vec<Event>,
    processing: bool,
}

impl Journal {
    /// Open the journal at the default location, loading the previous
    /// snapshot or starting from defaults.
    pub fn open() -> Result<Self> {
        Self::with_snapshot_store(SnapshotStore::open()?)
    }

    /// Open the journal over an explicit snapshot store.
    pub fn with_snapshot_store(snapshots: SnapshotStore) -> Result<Self> {
        let state = snapshots.load()?.unwrap_or_default();
        Ok(Self {
            state,
            snapshots,
            pending_events: Vec::new(),
            processing: false,
        })
    }

    // ---- entries ----

    /// Create an entry from a draft. Prepends so the collection stays
    /// most-recent-first by insertion, and records the qualifying action
    /// against the streak.
    pub fn create_entry(&mut self, draft: EntryDraft) -> Result<Uuid> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let entry = Entry::new(draft);
        let id = entry.id;
        self.state.entries.insert(0, entry);

        let change = streak::record_entry(&mut self.state.user, Local::now());
        self.pending_events.push(Event::EntryCreated { id, at: Utc::now() });
        self.pending_events.push(Event::StreakUpdated {
            streak: self.state.user.streak,
            change,
            at: Utc::now(),
        });
        self.persist()?;
        Ok(id)
    }

    /// Merge the patch into the entry with the given id, stamping
    /// `updated_at` unconditionally. Unknown ids are a silent no-op by
    /// contract, not an error.
    pub fn update_entry(&mut self, id: Uuid, patch: EntryPatch) -> Result<()> {
        let Some(entry) = self.state.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };
        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(content) = patch.content {
            entry.content = content;
        }
        if let Some(mood) = patch.mood {
            entry.mood = mood;
        }
        if let Some(tags) = patch.tags {
            entry.tags = dedup_tags(tags);
        }
        entry.updated_at = Utc::now();
        self.pending_events.push(Event::EntryUpdated { id, at: Utc::now() });
        self.persist()
    }

    /// The detail-view save: rejects an explicitly empty title before
    /// any state is touched, then applies the patch.
    pub fn save_entry(&mut self, id: Uuid, patch: EntryPatch) -> Result<()> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle.into());
            }
        }
        self.update_entry(id, patch)
    }

    /// Remove the entry with the given id; no-op when unknown.
    pub fn delete_entry(&mut self, id: Uuid) -> Result<()> {
        let before = self.state.entries.len();
        self.state.entries.retain(|e| e.id != id);
        if self.state.entries.len() == before {
            return Ok(());
        }
        self.pending_events.push(Event::EntryDeleted { id, at: Utc::now() });
        self.persist()
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.state.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    /// Record the user's answer to a generated question.
    pub fn answer_question(&mut self, id: Uuid, index: usize, answer: String) -> Result<()> {
        let entry = self
            .state
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ValidationError::UnknownEntry { id })?;
        let len = entry.ai_questions.len();
        let question = entry
            .ai_questions
            .get_mut(index)
            .ok_or(ValidationError::OutOfBounds {
                collection: "ai_questions".into(),
                index,
                len,
            })?;
        question.answer = answer;
        entry.updated_at = Utc::now();
        self.pending_events.push(Event::EntryUpdated { id, at: Utc::now() });
        self.persist()
    }

    /// Toggle completion of an actionable step.
    pub fn toggle_step(&mut self, id: Uuid, index: usize) -> Result<bool> {
        let entry = self
            .state
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ValidationError::UnknownEntry { id })?;
        let len = entry.actionable_steps.len();
        let step = entry
            .actionable_steps
            .get_mut(index)
            .ok_or(ValidationError::OutOfBounds {
                collection: "actionable_steps".into(),
                index,
                len,
            })?;
        step.completed = !step.completed;
        let completed = step.completed;
        entry.updated_at = Utc::now();
        self.pending_events.push(Event::EntryUpdated { id, at: Utc::now() });
        self.persist()?;
        Ok(completed)
    }

    // ---- derived content (pipeline only) ----

    pub(crate) fn set_stage(&mut self, id: Uuid, stage: DerivedStage) -> Result<()> {
        if let Some(entry) = self.state.entries.iter_mut().find(|e| e.id == id) {
            entry.stage = stage;
        }
        Ok(())
    }

    pub(crate) fn set_questions(&mut self, id: Uuid, questions: Vec<String>) -> Result<()> {
        let Some(entry) = self.state.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };
        entry.ai_questions = questions
            .into_iter()
            .map(|question| crate::entry::AiQuestion {
                question,
                answer: String::new(),
            })
            .collect();
        entry.stage = DerivedStage::QuestionsReady;
        entry.updated_at = Utc::now();
        let count = entry.ai_questions.len();
        self.pending_events.push(Event::QuestionsReady { id, count, at: Utc::now() });
        self.persist()
    }

    pub(crate) fn set_steps(&mut self, id: Uuid, tasks: Vec<String>) -> Result<()> {
        let Some(entry) = self.state.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };
        entry.actionable_steps = tasks
            .into_iter()
            .map(|task| crate::entry::ActionableStep {
                task,
                completed: false,
            })
            .collect();
        entry.stage = DerivedStage::StepsReady;
        entry.updated_at = Utc::now();
        let count = entry.actionable_steps.len();
        self.pending_events.push(Event::StepsReady { id, count, at: Utc::now() });
        self.persist()
    }

    pub(crate) fn push_event(&mut self, event: Event) {
        self.pending_events.push(event);
    }

    // ---- preferences ----

    pub fn user(&self) -> &User {
        &self.state.user
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        self.state.user.dark_mode = !self.state.user.dark_mode;
        let on = self.state.user.dark_mode;
        self.preferences_changed()?;
        Ok(on)
    }

    pub fn toggle_notifications(&mut self) -> Result<bool> {
        self.state.user.notifications_enabled = !self.state.user.notifications_enabled;
        let on = self.state.user.notifications_enabled;
        self.preferences_changed()?;
        Ok(on)
    }

    pub fn set_notification_time(&mut self, time: &str) -> Result<NotificationTime> {
        let parsed: NotificationTime = time.parse().map_err(crate::error::CoreError::from)?;
        self.state.user.notification_time = parsed;
        self.preferences_changed()?;
        Ok(parsed)
    }

    fn preferences_changed(&mut self) -> Result<()> {
        self.pending_events.push(Event::PreferencesUpdated { at: Utc::now() });
        self.persist()
    }

    // ---- processing flag and events ----

    /// True while a generation call is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub(crate) fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Take all events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending_events)
    }

    fn persist(&self) -> Result<()> {
        self.snapshots.save(&self.state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Mood;

    fn journal(dir: &tempfile::TempDir) -> Journal {
        Journal::with_snapshot_store(SnapshotStore::with_path(dir.path().join("state.json")))
            .unwrap()
    }

    fn draft(title: &str) -> EntryDraft {
        EntryDraft {
            title: title.into(),
            content: "some content".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_prepends_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        journal.create_entry(draft("first")).unwrap();
        journal.create_entry(draft("second")).unwrap();
        let titles: Vec<_> = journal.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn create_rejects_empty_title_without_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let err = journal.create_entry(draft("   ")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Validation(ValidationError::EmptyTitle)
        ));
        assert!(journal.entries().is_empty());
        assert_eq!(journal.user().streak, 0);
    }

    #[test]
    fn create_updates_streak_once_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        journal.create_entry(draft("a")).unwrap();
        journal.create_entry(draft("b")).unwrap();
        assert_eq!(journal.user().streak, 1);
        assert!(journal.user().last_entry_date.is_some());
    }

    #[test]
    fn update_stamps_updated_at_monotonically() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let id = journal.create_entry(draft("a")).unwrap();
        let before = journal.entry(id).unwrap().updated_at;

        journal
            .update_entry(
                id,
                EntryPatch {
                    content: Some("new content".into()),
                    mood: Some(Some(Mood::Focused)),
                    ..Default::default()
                },
            )
            .unwrap();

        let entry = journal.entry(id).unwrap();
        assert!(entry.updated_at >= before);
        assert_eq!(entry.content, "new content");
        assert_eq!(entry.mood, Some(Mood::Focused));
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        journal.create_entry(draft("a")).unwrap();
        let before: Vec<_> = journal.entries().to_vec();

        journal
            .update_entry(
                Uuid::new_v4(),
                EntryPatch {
                    title: Some("ghost".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(journal.entries().len(), before.len());
        assert_eq!(journal.entries()[0].title, before[0].title);
        assert_eq!(journal.entries()[0].updated_at, before[0].updated_at);
    }

    #[test]
    fn save_rejects_empty_title() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let id = journal.create_entry(draft("a")).unwrap();
        let err = journal
            .save_entry(
                id,
                EntryPatch {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Validation(ValidationError::EmptyTitle)
        ));
        assert_eq!(journal.entry(id).unwrap().title, "a");
    }

    #[test]
    fn delete_removes_and_tolerates_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let id = journal.create_entry(draft("a")).unwrap();
        journal.delete_entry(Uuid::new_v4()).unwrap();
        assert_eq!(journal.entries().len(), 1);
        journal.delete_entry(id).unwrap();
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn deletion_never_touches_streak() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let id = journal.create_entry(draft("a")).unwrap();
        let streak = journal.user().streak;
        journal.delete_entry(id).unwrap();
        assert_eq!(journal.user().streak, streak);
    }

    #[test]
    fn answer_question_bounds_checked() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let id = journal.create_entry(draft("a")).unwrap();
        journal.set_questions(id, vec!["q1?".into(), "q2?".into()]).unwrap();

        journal.answer_question(id, 1, "because".into()).unwrap();
        assert_eq!(journal.entry(id).unwrap().ai_questions[1].answer, "because");

        assert!(journal.answer_question(id, 5, "x".into()).is_err());
        assert!(journal
            .answer_question(Uuid::new_v4(), 0, "x".into())
            .is_err());
    }

    #[test]
    fn toggle_step_flips_completion() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        let id = journal.create_entry(draft("a")).unwrap();
        journal.set_steps(id, vec!["do it".into()]).unwrap();

        assert!(journal.toggle_step(id, 0).unwrap());
        assert!(!journal.toggle_step(id, 0).unwrap());
    }

    #[test]
    fn preferences_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        {
            let mut journal =
                Journal::with_snapshot_store(SnapshotStore::with_path(&path)).unwrap();
            journal.toggle_dark_mode().unwrap();
            journal.set_notification_time("21:15").unwrap();
        }
        let journal = Journal::with_snapshot_store(SnapshotStore::with_path(&path)).unwrap();
        assert!(journal.user().dark_mode);
        assert_eq!(journal.user().notification_time.to_string(), "21:15");
    }

    #[test]
    fn set_notification_time_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        assert!(journal.set_notification_time("25:00").is_err());
        assert_eq!(journal.user().notification_time.to_string(), "08:00");
    }

    #[test]
    fn events_drain_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = journal(&dir);
        journal.create_entry(draft("a")).unwrap();
        let events = journal.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::EntryCreated { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::StreakUpdated { .. })));
        assert!(journal.drain_events().is_empty());
    }
}
