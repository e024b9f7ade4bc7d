//! Journal entry types and their derived-content lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content must exceed this many characters before questions are generated.
pub const MIN_CONTENT_LEN: usize = 20;

/// Fixed mood palette for entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Inspired,
    Excited,
    Focused,
    Curious,
    Neutral,
    Confused,
    Frustrated,
    Tired,
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inspired" => Ok(Mood::Inspired),
            "excited" => Ok(Mood::Excited),
            "focused" => Ok(Mood::Focused),
            "curious" => Ok(Mood::Curious),
            "neutral" => Ok(Mood::Neutral),
            "confused" => Ok(Mood::Confused),
            "frustrated" => Ok(Mood::Frustrated),
            "tired" => Ok(Mood::Tired),
            other => Err(format!("unknown mood: {other}")),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mood::Inspired => "Inspired",
            Mood::Excited => "Excited",
            Mood::Focused => "Focused",
            Mood::Curious => "Curious",
            Mood::Neutral => "Neutral",
            Mood::Confused => "Confused",
            Mood::Frustrated => "Frustrated",
            Mood::Tired => "Tired",
        };
        f.write_str(s)
    }
}

/// A reflective question paired with the user's answer.
/// An empty answer means unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiQuestion {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// A task derived from an answered entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionableStep {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// Explicit derived-content lifecycle for an entry.
///
/// Transitions only move forward: `Empty -> QuestionsPending ->
/// QuestionsReady -> StepsPending -> StepsReady`, except that a failed
/// generation rolls a pending stage back to where it started. Once a
/// ready stage is reached the content is never regenerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedStage {
    #[default]
    Empty,
    QuestionsPending,
    QuestionsReady,
    StepsPending,
    StepsReady,
}

/// A single journal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ai_questions: Vec<AiQuestion>,
    #[serde(default)]
    pub actionable_steps: Vec<ActionableStep>,
    #[serde(default)]
    pub stage: DerivedStage,
}

/// Fields for a new entry.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
}

/// Partial update applied to an existing entry.
///
/// `mood` is doubly optional so callers can distinguish "leave as is"
/// (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Option<Mood>>,
    pub tags: Option<Vec<String>>,
}

impl Entry {
    pub fn new(draft: EntryDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
            mood: draft.mood,
            tags: dedup_tags(draft.tags),
            ai_questions: Vec::new(),
            actionable_steps: Vec::new(),
            stage: DerivedStage::Empty,
        }
    }

    /// Whether the content is substantial enough to derive questions from.
    pub fn content_is_substantial(&self) -> bool {
        self.content.chars().count() > MIN_CONTENT_LEN
    }

    /// True when every question carries a non-empty answer.
    /// Vacuously true for an entry with no questions.
    pub fn all_questions_answered(&self) -> bool {
        self.ai_questions.iter().all(|q| !q.answer.is_empty())
    }

    /// Roll transient pending stages back and reconcile the stage with
    /// field contents. Applied when a snapshot is loaded: no generation
    /// call survives a restart, and snapshots written before the stage
    /// field existed deserialize as `Empty` regardless of content.
    pub(crate) fn reconcile_stage(&mut self) {
        self.stage = if !self.actionable_steps.is_empty() {
            DerivedStage::StepsReady
        } else if !self.ai_questions.is_empty() {
            DerivedStage::QuestionsReady
        } else {
            DerivedStage::Empty
        };
    }
}

/// Suppress duplicate tags while preserving first-seen order.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
