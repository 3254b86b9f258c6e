//! # StudyMate Core Library
//!
//! State engine behind the StudyMate school study app. The CLI and any UI
//! shell are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Ledger**: point rules for logins, video views, quizzes and study time,
//!   plus the per-day study log
//! - **Stamps**: weekly login stamp sheet with monthly themes
//! - **Reminders**: one-minute polling of calendar events with lead times
//! - **Ranking**: class and grade leaderboards with the live user merged in
//! - **Storage**: SQLite key-value slices and TOML configuration
//!
//! ## Key Components
//!
//! - [`AppState`]: loads every slice and applies user actions
//! - [`LocalStore`]: JSON slice persistence
//! - [`ReminderScheduler`]: delivers due reminders through a [`Notifier`]
//! - [`StudyTracker`]: 1-second study ticker bound to the current screen

pub mod app;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod profile;
pub mod quiz;
pub mod ranking;
pub mod reminders;
pub mod seed;
pub mod session;
pub mod settings;
pub mod stamps;
pub mod storage;
pub mod tasks;
pub mod todo;

pub use app::{AppState, InboxMessage, LoginOutcome, QuizResult, Screen, StampSheet, StudyProgress};
pub use calendar::{CalendarEvent, EventDraft, ReminderLead, RepeatRule};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, QuizError, StorageError, ValidationError};
pub use ledger::{PointRules, StudyLog};
pub use profile::{User, UserRole};
pub use quiz::{
    GeminiQuizGenerator, ManualQuestion, Quiz, QuizDraft, QuizGenerator, QuizQuestion, QuizRequest,
};
pub use ranking::{RankedRow, RankingEntry, RankingScope};
pub use reminders::{Notifier, Reminder, ReminderScheduler};
pub use session::SessionFlags;
pub use settings::AppSettings;
pub use stamps::{SeasonalTheme, StampRecord};
pub use storage::{data_dir, Config, LocalStore};
pub use tasks::{spawn_interval, spawn_reminder_poller, SharedState, StudyTracker, TaskHandle};
pub use todo::Todo;
