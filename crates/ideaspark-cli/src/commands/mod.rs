pub mod config;
pub mod entry;
pub mod export;
pub mod prefs;
pub mod streak;
pub mod tags;
