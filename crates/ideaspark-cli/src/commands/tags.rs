//! Tag listing command.

use ideaspark_core::{all_tags, Journal};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let journal = Journal::open()?;
    for tag in all_tags(journal.entries()) {
        println!("{tag}");
    }
    Ok(())
}
