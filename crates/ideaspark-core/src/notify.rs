//! Notification scheduling stub.
//!
//! Fire-and-forget with no confirmation contract; a real implementation
//! would hand the time to the platform notification service.

use crate::user::NotificationTime;

/// Schedule the daily journaling reminder.
pub fn schedule(time: &NotificationTime) {
    tracing::info!(%time, "daily reminder scheduled");
}

/// Drop any scheduled reminder.
pub fn cancel() {
    tracing::info!("daily reminder cancelled");
}
