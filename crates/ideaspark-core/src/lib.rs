//! # IdeaSpark Core Library
//!
//! Core business logic for the IdeaSpark journaling application. All
//! operations are available through this library, with the CLI binary
//! being a thin presentation layer over it.
//!
//! ## Architecture
//!
//! - **Journal store**: an explicit state container owning the entry
//!   collection and the user singleton; every mutation persists a
//!   snapshot and emits change events for subscribers to drain
//! - **Streak tracker**: local-calendar-day streak computation, driven
//!   only by entry creation
//! - **Derived-content pipeline**: decides on save whether to call the
//!   question or step generator and writes results back, guarded by an
//!   explicit per-entry lifecycle stage
//! - **Storage**: one JSON snapshot blob plus TOML configuration
//!
//! ## Key Components
//!
//! - [`Journal`]: the state container behind every frontend
//! - [`Pipeline`]: the save-triggered generation flow
//! - [`SnapshotStore`]: load-on-init / save-on-mutation persistence
//! - [`QuestionGenerator`] / [`StepGenerator`]: external service seams

pub mod entry;
pub mod error;
pub mod events;
pub mod export;
pub mod generate;
pub mod notify;
pub mod query;
pub mod store;
pub mod streak;
pub mod user;

pub use entry::{
    ActionableStep, AiQuestion, DerivedStage, Entry, EntryDraft, EntryPatch, Mood,
    MIN_CONTENT_LEN,
};
pub use error::{
    ConfigError, CoreError, ExportError, GenerationError, Result, StorageError, ValidationError,
};
pub use events::{Event, GenerationPhase};
pub use generate::{
    CannedQuestionGenerator, CannedStepGenerator, Pipeline, QuestionGenerator, SaveOutcome,
    StepGenerator,
};
pub use query::{all_tags, filter_entries};
pub use store::{AppState, Config, Journal, SnapshotStore};
pub use streak::StreakChange;
pub use user::{NotificationTime, User};
