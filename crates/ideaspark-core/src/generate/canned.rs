//! Canned generators: fixed outputs after a simulated service delay.
//!
//! These stand in for a real model-backed service and keep the app fully
//! offline. Output text matches the original mock responses.

use std::time::Duration;

use super::traits::{QuestionGenerator, StepGenerator};
use crate::error::GenerationError;

const CANNED_QUESTIONS: [&str; 3] = [
    "What's the main goal you want to achieve with this idea?",
    "What obstacles might you encounter when implementing this?",
    "How could you make this idea more innovative or unique?",
];

const CANNED_STEPS: [&str; 3] = [
    "Research similar ideas and identify unique selling points",
    "Create a prototype or outline of your concept",
    "Share your idea with trusted colleagues for feedback",
];

pub struct CannedQuestionGenerator {
    delay: Duration,
}

impl CannedQuestionGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No simulated latency; for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for CannedQuestionGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl QuestionGenerator for CannedQuestionGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    fn generate(&self, _content: &str) -> Result<Vec<String>, GenerationError> {
        std::thread::sleep(self.delay);
        Ok(CANNED_QUESTIONS.iter().map(|q| q.to_string()).collect())
    }
}

pub struct CannedStepGenerator {
    delay: Duration,
}

impl CannedStepGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for CannedStepGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl StepGenerator for CannedStepGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    fn generate(&self, _content: &str, _answers: &[String]) -> Result<Vec<String>, GenerationError> {
        std::thread::sleep(self.delay);
        Ok(CANNED_STEPS.iter().map(|s| s.to_string()).collect())
    }
}
