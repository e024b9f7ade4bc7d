//! Derived-content pipeline.
//!
//! Runs as part of the save action on an entry: decides from the entry's
//! lifecycle stage whether to call the question or step generator, writes
//! results back into the journal, and clears the processing flag and the
//! per-entry in-flight marker on every path.

pub mod canned;
pub mod traits;

pub use canned::{CannedQuestionGenerator, CannedStepGenerator};
pub use traits::{QuestionGenerator, StepGenerator};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::entry::{DerivedStage, EntryPatch};
use crate::error::{GenerationError, Result};
use crate::events::{Event, GenerationPhase};
use crate::store::{Config, Journal};

/// What a save action ended up doing beyond the field merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub questions_generated: bool,
    pub steps_generated: bool,
    /// A generation flow for this entry was already in flight.
    pub skipped_in_flight: bool,
}

pub struct Pipeline {
    questions: Arc<dyn QuestionGenerator>,
    steps: Arc<dyn StepGenerator>,
    timeout: Duration,
    surface_errors: bool,
    in_flight: HashSet<Uuid>,
}

impl Pipeline {
    pub fn new(questions: Arc<dyn QuestionGenerator>, steps: Arc<dyn StepGenerator>) -> Self {
        Self {
            questions,
            steps,
            timeout: Duration::from_secs(30),
            surface_errors: false,
            in_flight: HashSet::new(),
        }
    }

    /// Canned generators wired up with the configured delay, timeout,
    /// and failure policy.
    pub fn from_config(config: &Config) -> Self {
        let delay = Duration::from_millis(config.generation.canned_delay_ms);
        Self::new(
            Arc::new(CannedQuestionGenerator::new(delay)),
            Arc::new(CannedStepGenerator::new(delay)),
        )
        .with_timeout(Duration::from_secs(config.generation.timeout_secs))
        .with_surfaced_errors(config.generation.surface_errors)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// When set, generation failures abort the save and reach the caller
    /// instead of being logged and swallowed.
    pub fn with_surfaced_errors(mut self, surface: bool) -> Self {
        self.surface_errors = surface;
        self
    }

    /// The save action: apply the patch, then generate whatever the
    /// entry's stage calls for. Validation failures abort before any
    /// state is touched; a save for an unknown id is a no-op.
    pub async fn process_save(
        &mut self,
        journal: &mut Journal,
        id: Uuid,
        patch: EntryPatch,
    ) -> Result<SaveOutcome> {
        journal.save_entry(id, patch)?;
        if journal.entry(id).is_none() {
            return Ok(SaveOutcome::default());
        }
        if !self.in_flight.insert(id) {
            return Ok(SaveOutcome {
                skipped_in_flight: true,
                ..SaveOutcome::default()
            });
        }

        journal.set_processing(true);
        let result = self.run_stages(journal, id).await;
        journal.set_processing(false);
        self.in_flight.remove(&id);
        result
    }

    async fn run_stages(&self, journal: &mut Journal, id: Uuid) -> Result<SaveOutcome> {
        let mut outcome = SaveOutcome::default();

        let Some(entry) = journal.entry(id) else {
            return Ok(outcome);
        };
        if entry.stage == DerivedStage::Empty && entry.content_is_substantial() {
            let content = entry.content.clone();
            journal.set_stage(id, DerivedStage::QuestionsPending)?;
            match self.call_questions(content).await {
                Ok(questions) => {
                    journal.set_questions(id, questions)?;
                    outcome.questions_generated = true;
                }
                Err(err) => {
                    journal.set_stage(id, DerivedStage::Empty)?;
                    self.report_failure(journal, id, GenerationPhase::Questions, &err);
                    if self.surface_errors {
                        return Err(err.into());
                    }
                }
            }
        }

        let Some(entry) = journal.entry(id) else {
            return Ok(outcome);
        };
        let wants_steps = entry.stage == DerivedStage::QuestionsReady
            && !entry.ai_questions.is_empty()
            && entry.all_questions_answered()
            && entry.actionable_steps.is_empty();
        if wants_steps {
            let content = entry.content.clone();
            let answers: Vec<String> = entry.ai_questions.iter().map(|q| q.answer.clone()).collect();
            journal.set_stage(id, DerivedStage::StepsPending)?;
            match self.call_steps(content, answers).await {
                Ok(tasks) => {
                    journal.set_steps(id, tasks)?;
                    outcome.steps_generated = true;
                }
                Err(err) => {
                    journal.set_stage(id, DerivedStage::QuestionsReady)?;
                    self.report_failure(journal, id, GenerationPhase::Steps, &err);
                    if self.surface_errors {
                        return Err(err.into());
                    }
                }
            }
        }

        Ok(outcome)
    }

    fn report_failure(
        &self,
        journal: &mut Journal,
        id: Uuid,
        phase: GenerationPhase,
        err: &GenerationError,
    ) {
        tracing::warn!(entry = %id, ?phase, error = %err, "generation failed; entry left unchanged");
        journal.push_event(Event::GenerationFailed {
            id,
            phase,
            reason: err.to_string(),
            at: Utc::now(),
        });
    }

    // Generators are blocking; bridge them off the runtime and bound the
    // wait. A timed-out call's thread is not cancelled, it just runs to
    // completion with nobody listening.
    async fn call_questions(&self, content: String) -> Result<Vec<String>, GenerationError> {
        let generator = Arc::clone(&self.questions);
        let call = tokio::task::spawn_blocking(move || generator.generate(&content));
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(GenerationError::Service(join.to_string())),
            Err(_) => Err(GenerationError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }

    async fn call_steps(
        &self,
        content: String,
        answers: Vec<String>,
    ) -> Result<Vec<String>, GenerationError> {
        let generator = Arc::clone(&self.steps);
        let call = tokio::task::spawn_blocking(move || generator.generate(&content, &answers));
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(GenerationError::Service(join.to_string())),
            Err(_) => Err(GenerationError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}
