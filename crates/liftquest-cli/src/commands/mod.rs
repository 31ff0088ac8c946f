pub mod config;
pub mod grade;
pub mod progress;
pub mod recommend;
pub mod skills;
pub mod user;
pub mod workout;

use liftquest_core::{Config, ProgressionOrchestrator, SqliteStore};

/// Orchestrator over the on-disk store with the on-disk configuration.
pub(crate) fn open_orchestrator() -> Result<ProgressionOrchestrator<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    Ok(ProgressionOrchestrator::new(store, &config)?)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
