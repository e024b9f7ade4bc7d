//! Export commands.
//!
//! The document path logs failures and stays quiet, the calendar path
//! prints a user-facing confirmation. The asymmetry is inherited
//! behavior, kept on purpose.

use std::path::PathBuf;

use clap::Subcommand;
use ideaspark_core::{export, store, Config, Journal};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ExportAction {
    /// Export an entry as a markdown document
    Doc {
        /// Entry ID
        id: String,
        /// Target directory (default: configured export dir or data dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Export an entry's actionable steps as an iCalendar file
    Calendar {
        /// Entry ID
        id: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

pub fn run(action: ExportAction) -> Result<(), Box<dyn std::error::Error>> {
    let journal = Journal::open()?;

    match action {
        ExportAction::Doc { id, dir } => {
            let id = Uuid::parse_str(&id)?;
            let Some(entry) = journal.entry(id) else {
                return Err(format!("no entry with id {id}").into());
            };
            let dir = resolve_dir(dir)?;
            match export::export_entry(entry, &dir) {
                Ok(path) => println!("{}", path.display()),
                Err(e) => tracing::error!(error = %e, "document export failed"),
            }
        }
        ExportAction::Calendar { id, dir } => {
            let id = Uuid::parse_str(&id)?;
            let Some(entry) = journal.entry(id) else {
                return Err(format!("no entry with id {id}").into());
            };
            let dir = resolve_dir(dir)?;
            let path = export::export_steps(&entry.actionable_steps, &dir)?;
            println!("Tasks exported to calendar successfully!");
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn resolve_dir(arg: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(dir) = arg {
        return Ok(dir);
    }
    let config = Config::load()?;
    if let Some(dir) = config.export.dir {
        return Ok(dir);
    }
    Ok(store::data_dir()?)
}
