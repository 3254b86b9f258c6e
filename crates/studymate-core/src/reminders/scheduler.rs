use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::Notifier;
use crate::calendar::CalendarEvent;
use crate::session::SessionFlags;

/// Seconds between two reminder polls.
pub const POLL_INTERVAL_SECS: u64 = 60;
/// Width of the firing window; matches the poll period.
pub const FIRING_WINDOW_SECS: i64 = 60;

const NOTIFICATION_TITLE: &str = "Upcoming event";

/// A reminder whose firing window contains the poll time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub event_id: i64,
    pub title: String,
    pub lead_minutes: u32,
    /// The event's date string, part of the de-duplication key.
    pub date: String,
    pub starts_at: NaiveDateTime,
    pub notify_at: NaiveDateTime,
}

impl Reminder {
    pub fn notification_title(&self) -> &'static str {
        NOTIFICATION_TITLE
    }

    pub fn body(&self) -> String {
        format!("{} starts in {} minutes.", self.title, self.lead_minutes)
    }

    fn flag_key(&self) -> String {
        SessionFlags::notified_key(self.event_id, &self.date)
    }
}

/// Reminders due at `now` that have not fired yet. Does not mark anything.
///
/// Events without a usable lead time or date, and events already started,
/// are skipped.
pub fn due_reminders(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    fired: &SessionFlags,
) -> Vec<Reminder> {
    let window = Duration::seconds(FIRING_WINDOW_SECS);
    events
        .iter()
        .filter_map(|event| {
            let lead_minutes = event.notification.minutes()?;
            let starts_at = event.starts_at()?;
            if starts_at < now {
                return None;
            }
            let notify_at = starts_at - Duration::minutes(i64::from(lead_minutes));
            if now < notify_at || now >= notify_at + window {
                return None;
            }
            let reminder = Reminder {
                event_id: event.id,
                title: event.title.clone(),
                lead_minutes,
                date: event.date.clone(),
                starts_at,
                notify_at,
            };
            (!fired.contains(&reminder.flag_key())).then_some(reminder)
        })
        .collect()
}

/// Delivers due reminders through a [`Notifier`].
pub struct ReminderScheduler<N> {
    notifier: N,
}

impl<N: Notifier> ReminderScheduler<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one scan at `now` and return the reminders delivered.
    ///
    /// Without notification permission nothing is scanned. A reminder is
    /// flagged only after the notifier accepted it.
    pub fn poll(
        &self,
        events: &[CalendarEvent],
        now: NaiveDateTime,
        fired: &mut SessionFlags,
    ) -> Vec<Reminder> {
        if !self.notifier.permission_granted() {
            tracing::debug!("notification permission missing, skipping reminder scan");
            return Vec::new();
        }

        let mut delivered = Vec::new();
        for reminder in due_reminders(events, now, fired) {
            match self
                .notifier
                .notify(reminder.notification_title(), &reminder.body())
            {
                Ok(()) => {
                    tracing::info!(
                        event_id = reminder.event_id,
                        lead_minutes = reminder.lead_minutes,
                        "reminder fired"
                    );
                    fired.mark(reminder.flag_key());
                    delivered.push(reminder);
                }
                Err(e) => {
                    tracing::warn!(event_id = reminder.event_id, error = %e, "reminder not delivered");
                }
            }
        }
        delivered
    }
}
