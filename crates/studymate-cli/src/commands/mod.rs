pub mod calendar;
pub mod config;
pub mod inbox;
pub mod quiz;
pub mod ranking;
pub mod reminders;
pub mod session;
pub mod settings;
pub mod stamps;
pub mod study;
pub mod todo;
pub mod video;

use studymate_core::{AppState, Config, LocalStore};

/// Load the persisted app state with the configured point rules.
pub fn open_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = LocalStore::open()?;
    Ok(AppState::load(store, config.points))
}

/// Print `value` as pretty JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
