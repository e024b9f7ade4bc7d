//! Application configuration commands.

use clap::Subcommand;
use ideaspark_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Read a value by dotted key
    Get {
        /// Key, e.g. generation.timeout_secs
        key: String,
    },
    /// Set a value by dotted key
    Set {
        key: String,
        value: String,
    },
    /// List all keys and values
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.entries() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
