//! Display and notification preference commands.

use clap::Subcommand;
use ideaspark_core::{notify, Journal};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show current preferences
    Show,
    /// Toggle dark mode
    DarkMode,
    /// Toggle the daily reminder notification
    Notifications,
    /// Set the daily reminder time (HH:MM, 24-hour)
    NotificationTime {
        /// Time of day, e.g. 08:00
        time: String,
    },
}

pub fn run(action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut journal = Journal::open()?;

    match action {
        PrefsAction::Show => {
            let user = journal.user();
            println!("dark_mode: {}", user.dark_mode);
            println!("notifications_enabled: {}", user.notifications_enabled);
            println!("notification_time: {}", user.notification_time);
        }
        PrefsAction::DarkMode => {
            let on = journal.toggle_dark_mode()?;
            println!("Dark mode {}", if on { "enabled" } else { "disabled" });
        }
        PrefsAction::Notifications => {
            let on = journal.toggle_notifications()?;
            if on {
                notify::schedule(&journal.user().notification_time);
            } else {
                notify::cancel();
            }
            println!("Notifications {}", if on { "enabled" } else { "disabled" });
        }
        PrefsAction::NotificationTime { time } => {
            let parsed = journal.set_notification_time(&time)?;
            if journal.user().notifications_enabled {
                notify::schedule(&parsed);
            }
            println!("Notification time set to {parsed}");
        }
    }

    Ok(())
}
