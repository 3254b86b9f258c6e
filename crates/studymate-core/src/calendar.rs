//! Calendar events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Formats accepted for event dates; the first one is written back.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a local ISO datetime, with or without seconds.
pub fn parse_event_date(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "date",
            message: format!("'{raw}' is not a YYYY-MM-DDTHH:MM datetime"),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatRule {
    #[default]
    None,
    Daily,
    Weekly,
}

impl std::str::FromStr for RepeatRule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RepeatRule::None),
            "daily" => Ok(RepeatRule::Daily),
            "weekly" => Ok(RepeatRule::Weekly),
            other => Err(ValidationError::InvalidValue {
                field: "repeat",
                message: format!("expected none, daily or weekly, got '{other}'"),
            }),
        }
    }
}

/// How long before the event its reminder fires.
///
/// Stored as a string (`"none"`, `"5"`, `"10"`, `"30"`). Anything that does
/// not parse is kept as [`ReminderLead::Malformed`] so one bad record does not
/// poison the whole calendar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReminderLead {
    #[default]
    Off,
    Minutes(u32),
    Malformed(String),
}

impl ReminderLead {
    /// Lead time in minutes; `None` when no usable reminder is configured.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            ReminderLead::Minutes(m) => Some(*m),
            ReminderLead::Off | ReminderLead::Malformed(_) => None,
        }
    }
}

impl From<&str> for ReminderLead {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "none" => ReminderLead::Off,
            other => other
                .parse::<u32>()
                .map(ReminderLead::Minutes)
                .unwrap_or_else(|_| ReminderLead::Malformed(raw.to_string())),
        }
    }
}

impl std::fmt::Display for ReminderLead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderLead::Off => f.write_str("none"),
            ReminderLead::Minutes(m) => write!(f, "{m}"),
            ReminderLead::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for ReminderLead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderLead {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ReminderLead::from(s.as_str()),
            Raw::Number(n) => ReminderLead::from(n.to_string().as_str()),
        })
    }
}

/// A calendar entry created by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Time-based id, unique within the calendar.
    pub id: i64,
    pub title: String,
    /// Local wall-clock datetime exactly as entered, e.g. `2024-06-01T10:00`.
    pub date: String,
    #[serde(default)]
    pub repeat: RepeatRule,
    #[serde(default)]
    pub notification: ReminderLead,
}

impl CalendarEvent {
    /// Parsed start time, `None` if the stored string is unusable.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        parse_event_date(&self.date).ok()
    }
}

/// Event form input before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub repeat: RepeatRule,
    pub notification: ReminderLead,
}

impl EventDraft {
    /// Reject blank titles and unparsable dates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::EmptyField("date"));
        }
        parse_event_date(&self.date)?;
        if let ReminderLead::Malformed(raw) = &self.notification {
            return Err(ValidationError::InvalidValue {
                field: "notification",
                message: format!("'{raw}' is not a number of minutes"),
            });
        }
        Ok(())
    }

    /// Turn a validated draft into an event with the given id.
    pub fn into_event(self, id: i64) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            repeat: self.repeat,
            notification: self.notification,
        }
    }
}

/// Time-based id strictly greater than every id already in `events`.
pub fn next_event_id(events: &[CalendarEvent], now_ms: i64) -> i64 {
    let max_existing = events.iter().map(|e| e.id).max().unwrap_or(i64::MIN);
    now_ms.max(max_existing.saturating_add(1))
}

/// Events ordered by start time; unparsable dates sort last.
pub fn sorted_by_date(events: &[CalendarEvent]) -> Vec<&CalendarEvent> {
    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| (e.starts_at().is_none(), e.starts_at()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, date: &str, notification: &str) -> CalendarEvent {
        CalendarEvent {
            id,
            title: format!("event {id}"),
            date: date.into(),
            repeat: RepeatRule::None,
            notification: ReminderLead::from(notification),
        }
    }

    #[test]
    fn parses_dates_with_and_without_seconds() {
        let a = parse_event_date("2024-06-01T10:00").unwrap();
        let b = parse_event_date("2024-06-01T10:00:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_event_date("tomorrow").is_err());
    }

    #[test]
    fn reminder_lead_parses_known_and_unknown_values() {
        assert_eq!(ReminderLead::from("none"), ReminderLead::Off);
        assert_eq!(ReminderLead::from("10"), ReminderLead::Minutes(10));
        assert_eq!(ReminderLead::from("soon").minutes(), None);
        assert_eq!(ReminderLead::Minutes(5).minutes(), Some(5));
    }

    #[test]
    fn malformed_lead_survives_deserialization() {
        let json = r#"[
            {"id":1,"title":"a","date":"2024-06-01T10:00","repeat":"none","notification":"abc"},
            {"id":2,"title":"b","date":"2024-06-01T11:00","repeat":"weekly","notification":"30"},
            {"id":3,"title":"c","date":"2024-06-01T12:00","notification":5}
        ]"#;
        let events: Vec<CalendarEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0].notification, ReminderLead::Malformed("abc".into()));
        assert_eq!(events[1].notification, ReminderLead::Minutes(30));
        assert_eq!(events[1].repeat, RepeatRule::Weekly);
        assert_eq!(events[2].notification, ReminderLead::Minutes(5));
        assert_eq!(events[2].repeat, RepeatRule::None);
    }

    #[test]
    fn lead_serializes_as_string() {
        let e = event(1, "2024-06-01T10:00", "10");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["notification"], "10");
        assert_eq!(json["repeat"], "none");
    }

    #[test]
    fn draft_validation_rejects_blank_title() {
        let draft = EventDraft {
            title: "  ".into(),
            date: "2024-06-01T10:00".into(),
            repeat: RepeatRule::None,
            notification: ReminderLead::Off,
        };
        assert_eq!(draft.validate(), Err(ValidationError::EmptyField("title")));
    }

    #[test]
    fn draft_validation_rejects_bad_date_and_lead() {
        let mut draft = EventDraft {
            title: "Math test".into(),
            date: "June 1st".into(),
            repeat: RepeatRule::None,
            notification: ReminderLead::Off,
        };
        assert!(draft.validate().is_err());
        draft.date = "2024-06-01T10:00".into();
        draft.notification = ReminderLead::from("later");
        assert!(draft.validate().is_err());
        draft.notification = ReminderLead::Minutes(10);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn next_id_is_time_based_and_unique() {
        assert_eq!(next_event_id(&[], 1_000), 1_000);
        let events = vec![event(1_000, "2024-06-01T10:00", "none")];
        assert_eq!(next_event_id(&events, 1_000), 1_001);
        assert_eq!(next_event_id(&events, 5_000), 5_000);
    }

    #[test]
    fn sorted_by_date_puts_broken_dates_last() {
        let events = vec![
            event(1, "2024-06-02T09:00", "none"),
            event(2, "garbage", "none"),
            event(3, "2024-06-01T09:00", "none"),
        ];
        let ids: Vec<i64> = sorted_by_date(&events).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
