//! Consecutive-day streak tracking.
//!
//! Only entry creation is a qualifying action; edits and deletions never
//! reach this module. Comparisons are on local calendar dates, never on
//! elapsed hours, so two creations 20 hours apart that cross midnight
//! count as consecutive days while two creations on the same date count
//! once.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// How a qualifying action changed the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// First qualifying action ever.
    Started,
    /// Already journaled today; streak untouched.
    AlreadyCountedToday,
    /// Last entry was yesterday; streak extended.
    Extended,
    /// Gap of two or more days; streak restarted.
    Reset,
}

/// Record a qualifying action at `now` against the user's streak state.
pub fn record_entry(user: &mut User, now: DateTime<Local>) -> StreakChange {
    let today = now.date_naive();

    let Some(last) = user.last_entry_date else {
        user.streak = 1;
        user.last_entry_date = Some(now.with_timezone(&Utc));
        return StreakChange::Started;
    };

    let last_day = last.with_timezone(&Local).date_naive();

    if last_day == today {
        return StreakChange::AlreadyCountedToday;
    }

    let yesterday = today.pred_opt();
    let change = if Some(last_day) == yesterday {
        user.streak += 1;
        StreakChange::Extended
    } else {
        user.streak = 1;
        StreakChange::Reset
    };
    user.last_entry_date = Some(now.with_timezone(&Utc));
    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
    }

    #[test]
    fn first_entry_starts_streak() {
        let mut user = User::default();
        let change = record_entry(&mut user, at(2026, 3, 10, 9, 0));
        assert_eq!(change, StreakChange::Started);
        assert_eq!(user.streak, 1);
        assert!(user.last_entry_date.is_some());
    }

    #[test]
    fn consecutive_days_accumulate() {
        let mut user = User::default();
        record_entry(&mut user, at(2026, 3, 10, 9, 0));
        record_entry(&mut user, at(2026, 3, 11, 22, 0));
        record_entry(&mut user, at(2026, 3, 12, 6, 0));
        assert_eq!(user.streak, 3);
    }

    #[test]
    fn same_day_never_double_counts() {
        let mut user = User::default();
        record_entry(&mut user, at(2026, 3, 10, 8, 0));
        let change = record_entry(&mut user, at(2026, 3, 10, 10, 0));
        assert_eq!(change, StreakChange::AlreadyCountedToday);
        assert_eq!(user.streak, 1);
    }

    #[test]
    fn midnight_crossing_counts_as_consecutive() {
        // 20 hours apart but on adjacent calendar dates.
        let mut user = User::default();
        record_entry(&mut user, at(2026, 3, 10, 23, 30));
        let change = record_entry(&mut user, at(2026, 3, 11, 19, 30));
        assert_eq!(change, StreakChange::Extended);
        assert_eq!(user.streak, 2);
    }

    #[test]
    fn gap_resets_to_one() {
        let mut user = User::default();
        record_entry(&mut user, at(2026, 3, 10, 9, 0));
        record_entry(&mut user, at(2026, 3, 11, 9, 0));
        let change = record_entry(&mut user, at(2026, 3, 14, 9, 0));
        assert_eq!(change, StreakChange::Reset);
        assert_eq!(user.streak, 1);
    }

    #[test]
    fn month_boundary_is_still_consecutive() {
        let mut user = User::default();
        record_entry(&mut user, at(2026, 2, 28, 9, 0));
        record_entry(&mut user, at(2026, 3, 1, 9, 0));
        assert_eq!(user.streak, 2);
    }

    proptest! {
        /// Creating one entry per day with no gaps yields a streak equal
        /// to the number of days.
        #[test]
        fn unbroken_run_counts_every_day(days in 1u32..60) {
            let mut user = User::default();
            for offset in 0..days {
                let day = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    + chrono::Days::new(offset as u64);
                let now = Local
                    .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
                    .unwrap();
                record_entry(&mut user, now);
            }
            prop_assert_eq!(user.streak, days);
        }

        /// Whatever the creation pattern, the streak stays positive and
        /// never exceeds the number of distinct days touched.
        #[test]
        fn streak_bounded_by_distinct_days(offsets in proptest::collection::vec(0u64..30, 1..20)) {
            let mut user = User::default();
            let mut sorted = offsets.clone();
            sorted.sort_unstable();
            let mut distinct = std::collections::HashSet::new();
            for offset in sorted {
                distinct.insert(offset);
                let day = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    + chrono::Days::new(offset);
                let now = Local
                    .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
                    .unwrap();
                record_entry(&mut user, now);
            }
            prop_assert!(user.streak >= 1);
            prop_assert!(user.streak as usize <= distinct.len());
        }
    }
}
