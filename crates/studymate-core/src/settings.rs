//! Per-device display and sound settings.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_background")]
    pub background: String,
    /// Do-not-disturb start, `HH:MM`.
    #[serde(default = "default_dnd_start")]
    pub dnd_start: String,
    /// Do-not-disturb end, `HH:MM`.
    #[serde(default = "default_dnd_end")]
    pub dnd_end: String,
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_background() -> String {
    "bg-slate-100".into()
}
fn default_dnd_start() -> String {
    "22:00".into()
}
fn default_dnd_end() -> String {
    "07:00".into()
}
fn default_volume() -> u8 {
    80
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            background: default_background(),
            dnd_start: default_dnd_start(),
            dnd_end: default_dnd_end(),
            volume: default_volume(),
        }
    }
}

impl AppSettings {
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "background" => Some(self.background.clone()),
            "dnd_start" => Some(self.dnd_start.clone()),
            "dnd_end" => Some(self.dnd_end.clone()),
            "volume" => Some(self.volume.to_string()),
            _ => None,
        }
    }

    /// Set one field from its text form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        match key {
            "background" => {
                if value.is_empty() {
                    return Err(ValidationError::EmptyField("background"));
                }
                self.background = value.to_string();
            }
            "dnd_start" => self.dnd_start = parse_clock_time(value, "dnd_start")?,
            "dnd_end" => self.dnd_end = parse_clock_time(value, "dnd_end")?,
            "volume" => {
                self.volume = value
                    .parse::<u8>()
                    .ok()
                    .filter(|v| *v <= 100)
                    .ok_or_else(|| ValidationError::InvalidValue {
                        field: "volume",
                        message: format!("expected 0-100, got '{value}'"),
                    })?;
            }
            _ => {
                return Err(ValidationError::InvalidValue {
                    field: "key",
                    message: format!("unknown setting '{key}'"),
                })
            }
        }
        Ok(())
    }
}

fn parse_clock_time(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ValidationError::InvalidValue {
        field,
        message: format!("expected HH:MM, got '{value}'"),
    })?;
    Ok(time.format("%H:%M").to_string())
}
