//! Calendar reminder scheduler.
//!
//! A poll runs once per minute. Each event with a reminder fires exactly once
//! per session when a poll lands inside the one-minute window starting at
//! `date - lead`. A poll delayed past that window misses the reminder.

mod notifier;
mod scheduler;

pub use notifier::Notifier;
#[cfg(test)]
pub(crate) use notifier::RecordingNotifier;
pub use scheduler::{due_reminders, Reminder, ReminderScheduler, FIRING_WINDOW_SECS, POLL_INTERVAL_SECS};
