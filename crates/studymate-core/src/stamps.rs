//! Weekly stamp sheet.
//!
//! Every first login of a day stamps that weekday on the current ISO week's
//! sheet. A sheet only ever holds days of its own week.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO-8601 week key, `"{iso_year}-{week}"` without zero padding.
///
/// Dates near new year belong to the ISO year of their week's Thursday, so
/// 2024-12-30 is `"2025-1"` and 2021-01-01 is `"2020-53"`.
pub fn week_id(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-{}", week.year(), week.week())
}

/// Monday-based weekday index, 0 = Monday .. 6 = Sunday.
pub fn day_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Stamped weekdays of one ISO week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampRecord {
    #[serde(default)]
    pub week_id: String,
    #[serde(default)]
    pub stamped_days: BTreeSet<u8>,
}

impl StampRecord {
    /// Days stamped in the week containing `today`; empty for a stale record.
    pub fn days_for(&self, today: NaiveDate) -> BTreeSet<u8> {
        if self.week_id == week_id(today) {
            self.stamped_days.clone()
        } else {
            BTreeSet::new()
        }
    }

    pub fn is_stamped(&self, today: NaiveDate, day: u8) -> bool {
        self.week_id == week_id(today) && self.stamped_days.contains(&day)
    }
}

/// Stamp `today`, discarding the sheet first if it belongs to another week.
pub fn register_visit(record: StampRecord, today: NaiveDate) -> StampRecord {
    let wid = week_id(today);
    let mut stamped_days = if record.week_id == wid {
        record.stamped_days
    } else {
        if !record.week_id.is_empty() {
            tracing::debug!(old = %record.week_id, new = %wid, "stamp sheet rolled over");
        }
        BTreeSet::new()
    };
    stamped_days.insert(day_index(today));
    StampRecord {
        week_id: wid,
        stamped_days,
    }
}

/// Visual theme of the stamp sheet for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonalTheme {
    pub background_gradient: &'static str,
    pub stamp_glyph: &'static str,
    pub title: &'static str,
}

const fn theme(
    background_gradient: &'static str,
    stamp_glyph: &'static str,
    title: &'static str,
) -> SeasonalTheme {
    SeasonalTheme {
        background_gradient,
        stamp_glyph,
        title,
    }
}

const THEMES: [SeasonalTheme; 12] = [
    theme("from-sky-100 to-slate-200", "❄️", "January stamps"),
    theme("from-red-100 to-yellow-100", "👹", "February stamps"),
    theme("from-pink-100 to-green-100", "🎎", "March stamps"),
    theme("from-pink-200 to-pink-100", "🌸", "April stamps"),
    theme("from-green-200 to-lime-100", "🌳", "May stamps"),
    theme("from-blue-200 to-indigo-100", "🐸", "June stamps"),
    theme("from-cyan-100 to-yellow-100", "🐚", "July stamps"),
    theme("from-red-200 to-green-200", "🍉", "August stamps"),
    theme("from-indigo-200 to-yellow-100", "🎑", "September stamps"),
    theme("from-orange-200 to-red-200", "🍁", "October stamps"),
    theme("from-slate-200 to-sky-200", "🧣", "November stamps"),
    theme("from-red-200 to-green-200", "🎄", "December stamps"),
];

/// Theme for a zero-based month; anything outside 0..=11 gets April's.
pub fn seasonal_theme(month0: u32) -> SeasonalTheme {
    THEMES
        .get(month0 as usize)
        .copied()
        .unwrap_or(THEMES[3])
}

/// Theme for the month containing `date`.
pub fn theme_for(date: NaiveDate) -> SeasonalTheme {
    seasonal_theme(date.month0())
}
