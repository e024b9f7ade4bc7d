//! Streak display command.

use chrono::Local;
use ideaspark_core::Journal;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let journal = Journal::open()?;
    let user = journal.user();
    println!("Current streak: {} day(s)", user.streak);
    match user.last_entry_date {
        Some(at) => println!(
            "Last entry: {}",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
        None => println!("Last entry: never"),
    }
    Ok(())
}
