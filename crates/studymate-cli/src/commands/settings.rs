use clap::Subcommand;

use super::{open_state, print_json};

const KEYS: [&str; 4] = ["background", "dnd_start", "dnd_end", "volume"];

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show every setting
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one setting
    Get {
        /// One of background, dnd_start, dnd_end, volume
        key: String,
    },
    /// Change one setting
    Set {
        /// Setting key
        key: String,
        /// New value (times as HH:MM, volume 0-100)
        value: String,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;
    match action {
        SettingsAction::Show { json } => {
            let settings = state.settings();
            if json {
                print_json(settings)?;
            } else {
                for key in KEYS {
                    if let Some(value) = settings.get(key) {
                        println!("{key} = {value}");
                    }
                }
            }
        }
        SettingsAction::Get { key } => {
            let value = state
                .settings()
                .get(&key)
                .ok_or_else(|| format!("unknown setting: {key}"))?;
            println!("{value}");
        }
        SettingsAction::Set { key, value } => {
            let mut settings = state.settings().clone();
            settings.set(&key, &value)?;
            state.update_settings(settings)?;
            println!("ok");
        }
    }
    Ok(())
}
