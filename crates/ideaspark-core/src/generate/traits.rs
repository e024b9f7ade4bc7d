//! Seams for the external reflection services.
//!
//! Generators are stateless between calls and blocking; the pipeline
//! bridges them onto the async runtime and applies the timeout.

use crate::error::GenerationError;

/// Produces reflective questions from entry content.
pub trait QuestionGenerator: Send + Sync {
    /// Unique identifier (e.g. "canned", "grok").
    fn name(&self) -> &str;

    /// Ordered questions derived from the content.
    fn generate(&self, content: &str) -> Result<Vec<String>, GenerationError>;
}

/// Produces actionable steps from entry content and question answers.
pub trait StepGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Ordered task descriptions derived from content and answers.
    fn generate(&self, content: &str, answers: &[String]) -> Result<Vec<String>, GenerationError>;
}
