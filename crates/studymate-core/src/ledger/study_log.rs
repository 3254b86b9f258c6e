//! Per-day study time.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// `YYYY-MM-DD` key used by [`StudyLog`].
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Accumulated study seconds per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyLog {
    days: BTreeMap<String, u64>,
}

/// One day of the weekly study chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStudy {
    pub date: NaiveDate,
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
    pub minutes: f64,
}

/// Study total split into hours and remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudyTotal {
    pub hours: u64,
    pub minutes: u64,
}

impl StudyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seconds_on(&self, date: NaiveDate) -> u64 {
        self.days.get(&date_key(date)).copied().unwrap_or(0)
    }

    /// Count one more study second for `date` and return the new total.
    pub fn accumulate_second(&mut self, date: NaiveDate) -> u64 {
        let entry = self.days.entry(date_key(date)).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Ensure `date` has an entry, leaving an existing count untouched.
    pub fn open_day(&mut self, date: NaiveDate) {
        self.days.entry(date_key(date)).or_insert(0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.days.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The seven days ending at `today`, oldest first.
    pub fn last_seven_days(&self, today: NaiveDate) -> Vec<DailyStudy> {
        (0..7u64)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DailyStudy {
                date,
                label: date.format("%a").to_string(),
                minutes: self.seconds_on(date) as f64 / 60.0,
            })
            .collect()
    }

    /// Total over the seven days ending at `today`.
    pub fn weekly_total(&self, today: NaiveDate) -> StudyTotal {
        let seconds: u64 = (0..7u64)
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| self.seconds_on(date))
            .sum();
        StudyTotal {
            hours: seconds / 3600,
            minutes: (seconds % 3600) / 60,
        }
    }
}

/// Functional form of [`StudyLog::accumulate_second`].
///
/// `current_seconds` is the caller's running total for today; the log never
/// moves backwards if it already holds more.
pub fn accumulate_study_second(mut log: StudyLog, today: NaiveDate, current_seconds: u64) -> StudyLog {
    let next = current_seconds.max(log.seconds_on(today)) + 1;
    log.days.insert(date_key(today), next);
    log
}
