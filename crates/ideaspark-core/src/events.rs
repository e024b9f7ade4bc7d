//! Change events emitted by the journal store.
//!
//! Every mutation produces an Event. Frontends poll the journal and
//! drain accumulated events instead of observing state fields directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::streak::StreakChange;

/// Which generation call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    Questions,
    Steps,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    EntryCreated {
        id: Uuid,
        at: DateTime<Utc>,
    },
    EntryUpdated {
        id: Uuid,
        at: DateTime<Utc>,
    },
    EntryDeleted {
        id: Uuid,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        streak: u32,
        change: StreakChange,
        at: DateTime<Utc>,
    },
    /// Questions were generated and written to the entry.
    QuestionsReady {
        id: Uuid,
        count: usize,
        at: DateTime<Utc>,
    },
    /// Actionable steps were generated and written to the entry.
    StepsReady {
        id: Uuid,
        count: usize,
        at: DateTime<Utc>,
    },
    /// A generator call failed; the entry was left in its prior state.
    GenerationFailed {
        id: Uuid,
        phase: GenerationPhase,
        reason: String,
        at: DateTime<Utc>,
    },
    PreferencesUpdated {
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::QuestionsReady {
            id: Uuid::nil(),
            count: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"QuestionsReady""#));
        assert!(json.contains(r#""count":3"#));
    }
}
