use clap::Subcommand;
use studymate_core::calendar::sorted_by_date;
use studymate_core::{EventDraft, ReminderLead, RepeatRule};

use super::{open_state, print_json};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Add an event
    Add {
        /// Event title
        title: String,
        /// Start as local time, e.g. "2024-06-01T10:00"
        #[arg(long)]
        date: String,
        /// Repeat rule (none, daily, weekly)
        #[arg(long, default_value = "none")]
        repeat: RepeatRule,
        /// Reminder lead in minutes, or "none"
        #[arg(long, default_value = "none")]
        notify: String,
    },
    /// List events by start time
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CalendarAction::Add {
            title,
            date,
            repeat,
            notify,
        } => {
            let mut state = open_state()?;
            let draft = EventDraft {
                title,
                date,
                repeat,
                notification: ReminderLead::from(notify.as_str()),
            };
            let event = state.add_calendar_event(draft, chrono::Utc::now().timestamp_millis())?;
            println!("Event added: {} ({})", event.title, event.id);
        }
        CalendarAction::List { json } => {
            let state = open_state()?;
            let events = sorted_by_date(state.calendar());
            if json {
                print_json(&events)?;
            } else if events.is_empty() {
                println!("no events");
            } else {
                for event in events {
                    let reminder = match event.notification.minutes() {
                        Some(m) => format!("{m} min before"),
                        None => "no reminder".to_string(),
                    };
                    println!("{}  {}  [{}]", event.date, event.title, reminder);
                }
            }
        }
    }
    Ok(())
}
