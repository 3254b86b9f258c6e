//! Application state.
//!
//! `AppState` owns every persisted slice and exposes one update function per
//! user action. Each update writes the slices it touched back to the
//! [`LocalStore`] before returning. Slices another process may have changed
//! (user, study log, calendar, session flags) are re-read before use.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{next_event_id, CalendarEvent, EventDraft};
use crate::error::{Result, ValidationError};
use crate::ledger::{PointRules, StudyLog};
use crate::profile::User;
use crate::quiz::{correct_count, AnswerOutcome, Quiz, QuizDraft, QuizQuestion};
use crate::ranking::{RankedRow, RankingBoard, RankingScope};
use crate::reminders::{Notifier, Reminder, ReminderScheduler};
use crate::seed;
use crate::session::SessionFlags;
use crate::settings::AppSettings;
use crate::stamps::{register_visit, theme_for, week_id, SeasonalTheme, StampRecord};
use crate::storage::{keys, LocalStore};
use crate::todo::Todo;

/// Screens of the app. Time spent on `Video` and `Quiz` counts as study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Home,
    Plan,
    Quiz,
    Class,
    Ranking,
    Settings,
    Video,
}

impl Screen {
    pub fn counts_as_study(self) -> bool {
        matches!(self, Screen::Video | Screen::Quiz)
    }
}

impl std::str::FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "home" => Screen::Home,
            "plan" => Screen::Plan,
            "quiz" => Screen::Quiz,
            "class" => Screen::Class,
            "ranking" => Screen::Ranking,
            "settings" => Screen::Settings,
            "video" => Screen::Video,
            other => return Err(format!("unknown screen '{other}'")),
        })
    }
}

/// Entry of the in-app notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: i64,
    pub message: String,
    pub read: bool,
    /// Video the message links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub points_awarded: u64,
    pub first_login_today: bool,
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyProgress {
    pub seconds_today: u64,
    pub points_awarded: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub outcomes: Vec<AnswerOutcome>,
    pub correct: u64,
    pub points_awarded: u64,
}

/// The stamp sheet as shown for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StampSheet {
    pub week_id: String,
    pub stamped_days: BTreeSet<u8>,
    pub theme: SeasonalTheme,
}

pub struct AppState {
    store: LocalStore,
    rules: PointRules,
    user: Option<User>,
    last_login: Option<NaiveDate>,
    study_log: StudyLog,
    stamps: StampRecord,
    calendar: Vec<CalendarEvent>,
    quizzes: Vec<Quiz>,
    todos: Vec<Todo>,
    settings: AppSettings,
    session: SessionFlags,
    inbox: Vec<InboxMessage>,
    board: RankingBoard,
}

impl AppState {
    /// Load every slice, substituting defaults for missing or corrupt ones.
    pub fn load(store: LocalStore, rules: PointRules) -> Self {
        let user = store.load(keys::USER);
        let last_login = store.load(keys::LAST_LOGIN);
        let study_log = store.load_or_default(keys::STUDY_LOG);
        let stamps = store.load_or_default(keys::STAMPS);
        let calendar = store.load_or_default(keys::CALENDAR);
        let quizzes = store.load_or_else(keys::QUIZZES, seed::quizzes);
        let todos = store.load_or_else(keys::TODOS, || seed::todos(Utc::now()));
        let settings = store.load_or_default(keys::SETTINGS);
        let session = store.load_or_default(keys::SESSION_FLAGS);
        let inbox = store.load_or_else(keys::INBOX, seed::inbox);

        Self {
            store,
            rules,
            user,
            last_login,
            study_log,
            stamps,
            calendar,
            quizzes,
            todos,
            settings,
            session,
            inbox,
            board: seed::ranking_board(),
        }
    }

    pub fn rules(&self) -> &PointRules {
        &self.rules
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn last_login(&self) -> Option<NaiveDate> {
        self.last_login
    }

    pub fn study_log(&self) -> &StudyLog {
        &self.study_log
    }

    pub fn stamps(&self) -> &StampRecord {
        &self.stamps
    }

    pub fn calendar(&self) -> &[CalendarEvent] {
        &self.calendar
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn session(&self) -> &SessionFlags {
        &self.session
    }

    pub fn inbox(&self) -> &[InboxMessage] {
        &self.inbox
    }

    fn require_user(&self) -> Result<&User, ValidationError> {
        self.user.as_ref().ok_or(ValidationError::NotLoggedIn)
    }

    fn reload_user(&mut self) {
        self.user = self.store.load(keys::USER);
    }

    fn reload_session(&mut self) {
        self.session = self.store.load_or_default(keys::SESSION_FLAGS);
    }

    fn reload_quizzes(&mut self) {
        self.quizzes = self.store.load_or_else(keys::QUIZZES, seed::quizzes);
    }

    fn push_inbox(&mut self, message: String) -> Result<()> {
        self.inbox = self.store.load_or_else(keys::INBOX, seed::inbox);
        let id = next_message_id(&self.inbox);
        self.inbox.insert(
            0,
            InboxMessage {
                id,
                message,
                read: false,
                video_id: None,
            },
        );
        self.store.save(keys::INBOX, &self.inbox)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Log `user` in on `today`.
    ///
    /// The first login of a day starts a new session: it pays the login
    /// bonus, stamps the sheet and clears the session flags. Logging in again
    /// the same day keeps the session.
    pub fn login(&mut self, user: User, today: NaiveDate) -> Result<LoginOutcome> {
        self.last_login = self.store.load(keys::LAST_LOGIN);
        let award = self.rules.award_login(&user, today, self.last_login);
        if award.first_login_today {
            self.session.clear();
            self.store.save(keys::SESSION_FLAGS, &self.session)?;

            self.last_login = Some(today);
            self.store.save(keys::LAST_LOGIN, &today)?;

            let stamps = self.store.load_or_default(keys::STAMPS);
            self.stamps = register_visit(stamps, today);
            self.store.save(keys::STAMPS, &self.stamps)?;

            self.study_log = self.store.load_or_default(keys::STUDY_LOG);
            self.study_log.open_day(today);
            self.store.save(keys::STUDY_LOG, &self.study_log)?;
        }

        tracing::info!(
            user = %award.user.id,
            points = award.points,
            first_login_today = award.first_login_today,
            "login"
        );
        let outcome = LoginOutcome {
            points_awarded: award.points,
            first_login_today: award.first_login_today,
            balance: award.user.points,
        };
        self.store.save(keys::USER, &award.user)?;
        self.user = Some(award.user);
        Ok(outcome)
    }

    /// Drop the user and the last-login marker from the store.
    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.last_login = None;
        self.store.kv_remove(keys::USER)?;
        self.store.kv_remove(keys::LAST_LOGIN)?;
        Ok(())
    }

    // ── Study time ───────────────────────────────────────────────────

    /// Count one second spent on `screen`.
    ///
    /// Returns `None` when the screen or user does not track study time.
    pub fn record_study_second(
        &mut self,
        screen: Screen,
        today: NaiveDate,
    ) -> Result<Option<StudyProgress>> {
        self.record_study_seconds(screen, today, 1)
    }

    /// Count `seconds` one-second ticks on `screen`, persisting once at the end.
    ///
    /// Only students' study time is saved and paid; a teacher's count lives in
    /// memory for the current process.
    pub fn record_study_seconds(
        &mut self,
        screen: Screen,
        today: NaiveDate,
        seconds: u64,
    ) -> Result<Option<StudyProgress>> {
        if !screen.counts_as_study() {
            return Ok(None);
        }
        self.reload_user();
        let Some(user) = self.user.as_mut() else {
            return Ok(None);
        };
        if !user.tracks_study_time {
            return Ok(None);
        }
        let is_student = user.is_student();
        if is_student {
            self.study_log = self.store.load_or_default(keys::STUDY_LOG);
        }

        let mut points_awarded = 0;
        let mut current = self.study_log.seconds_on(today);
        for _ in 0..seconds {
            let previous = current;
            current = self.study_log.accumulate_second(today);
            if is_student {
                points_awarded += self.rules.study_chunk_points(previous, current);
            }
        }
        if is_student {
            self.store.save(keys::STUDY_LOG, &self.study_log)?;
        }

        if points_awarded > 0 {
            user.add_points(points_awarded);
            self.store.save(keys::USER, &*user)?;
            tracing::info!(points = points_awarded, seconds_today = current, "study chunk reward");
            self.push_inbox(format!(
                "Great work studying! You earned {points_awarded} points."
            ))?;
        }

        Ok(Some(StudyProgress {
            seconds_today: current,
            points_awarded,
        }))
    }

    // ── Points ───────────────────────────────────────────────────────

    /// Open a video; the first view per session pays the view bonus.
    pub fn view_video(&mut self, video_id: u64) -> Result<u64> {
        self.reload_user();
        self.reload_session();
        let Some(user) = self.user.as_mut() else {
            return Err(ValidationError::NotLoggedIn.into());
        };
        let points = self
            .rules
            .video_view_points(user, video_id, &mut self.session);
        if points > 0 {
            user.add_points(points);
            self.store.save(keys::USER, &*user)?;
            self.store.save(keys::SESSION_FLAGS, &self.session)?;
            tracing::debug!(video_id, points, "video view reward");
        }
        Ok(points)
    }

    /// Grade a finished quiz and pay for the correct answers.
    pub fn finish_quiz(&mut self, quiz_id: i64, answers: &[String]) -> Result<QuizResult> {
        self.reload_user();
        self.require_user()?;
        self.reload_quizzes();
        let quiz = self
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .ok_or(ValidationError::NotFound {
                kind: "quiz",
                id: quiz_id,
            })?;
        let outcomes = quiz.grade(answers);
        let correct = correct_count(&outcomes);

        let mut points_awarded = 0;
        if let Some(user) = self.user.as_mut() {
            points_awarded = self.rules.quiz_points(user, correct);
            if points_awarded > 0 {
                user.add_points(points_awarded);
                self.store.save(keys::USER, &*user)?;
            }
        }
        Ok(QuizResult {
            outcomes,
            correct,
            points_awarded,
        })
    }

    /// Store a generated quiz authored by the current user.
    pub fn add_quiz(
        &mut self,
        topic: &str,
        questions: Vec<QuizQuestion>,
        now: DateTime<Utc>,
    ) -> Result<Quiz> {
        self.reload_quizzes();
        let user = self.require_user()?;
        if questions.is_empty() {
            return Err(ValidationError::EmptyField("questions").into());
        }
        let quiz = Quiz {
            id: next_quiz_id(&self.quizzes, now.timestamp_millis()),
            title: format!("AI quiz: {}", topic.trim()),
            related_video_id: None,
            questions,
            author_name: user.name.clone(),
            class_name: user.class_name.clone(),
        };
        self.store_quiz(quiz)
    }

    /// Validate and store a hand-written quiz authored by the current user.
    pub fn create_quiz(&mut self, draft: QuizDraft, now: DateTime<Utc>) -> Result<Quiz> {
        self.reload_quizzes();
        let user = self.require_user()?;
        let quiz = draft.into_quiz(next_quiz_id(&self.quizzes, now.timestamp_millis()), user)?;
        self.store_quiz(quiz)
    }

    fn store_quiz(&mut self, quiz: Quiz) -> Result<Quiz> {
        self.quizzes.insert(0, quiz.clone());
        self.store.save(keys::QUIZZES, &self.quizzes)?;
        tracing::debug!(quiz_id = quiz.id, "quiz stored");
        Ok(quiz)
    }

    // ── Calendar & reminders ─────────────────────────────────────────

    pub fn add_calendar_event(&mut self, draft: EventDraft, now_ms: i64) -> Result<CalendarEvent> {
        draft.validate()?;
        self.calendar = self.store.load_or_default(keys::CALENDAR);
        let event = draft.into_event(next_event_id(&self.calendar, now_ms));
        self.calendar.push(event.clone());
        self.store.save(keys::CALENDAR, &self.calendar)?;
        tracing::debug!(event_id = event.id, "calendar event added");
        Ok(event)
    }

    /// Run one reminder scan, remembering what fired for the rest of the session.
    pub fn poll_reminders<N: Notifier>(
        &mut self,
        scheduler: &ReminderScheduler<N>,
        now: NaiveDateTime,
    ) -> Result<Vec<Reminder>> {
        self.calendar = self.store.load_or_default(keys::CALENDAR);
        self.reload_session();
        let fired = scheduler.poll(&self.calendar, now, &mut self.session);
        if !fired.is_empty() {
            self.store.save(keys::SESSION_FLAGS, &self.session)?;
        }
        Ok(fired)
    }

    // ── Plan ─────────────────────────────────────────────────────────

    pub fn add_todo(&mut self, text: &str, due_date: DateTime<Utc>) -> Result<Todo> {
        let id = self.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let todo = Todo::new(id, text, due_date)?;
        self.todos.push(todo.clone());
        self.store.save(keys::TODOS, &self.todos)?;
        Ok(todo)
    }

    /// Flip a todo's completion; returns the new state.
    pub fn toggle_todo(&mut self, id: i64) -> Result<bool> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ValidationError::NotFound { kind: "todo", id })?;
        todo.completed = !todo.completed;
        let completed = todo.completed;
        self.store.save(keys::TODOS, &self.todos)?;
        Ok(completed)
    }

    pub fn update_settings(&mut self, settings: AppSettings) -> Result<()> {
        self.store.save(keys::SETTINGS, &settings)?;
        self.settings = settings;
        Ok(())
    }

    // ── Inbox ────────────────────────────────────────────────────────

    /// Mark one message read, or every message when `id` is `None`.
    /// Returns how many messages changed.
    pub fn mark_inbox_read(&mut self, id: Option<i64>) -> Result<usize> {
        self.inbox = self.store.load_or_else(keys::INBOX, seed::inbox);
        if let Some(id) = id {
            if !self.inbox.iter().any(|m| m.id == id) {
                return Err(ValidationError::NotFound { kind: "message", id }.into());
            }
        }
        let mut changed = 0;
        for message in &mut self.inbox {
            if !message.read && id.map_or(true, |id| id == message.id) {
                message.read = true;
                changed += 1;
            }
        }
        self.store.save(keys::INBOX, &self.inbox)?;
        Ok(changed)
    }

    pub fn unread_count(&self) -> usize {
        self.inbox.iter().filter(|m| !m.read).count()
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn ranking(&self, scope: RankingScope) -> Vec<RankedRow> {
        self.board.build(self.user.as_ref(), scope)
    }

    pub fn stamp_sheet(&self, today: NaiveDate) -> StampSheet {
        StampSheet {
            week_id: week_id(today),
            stamped_days: self.stamps.days_for(today),
            theme: theme_for(today),
        }
    }
}

fn next_message_id(inbox: &[InboxMessage]) -> i64 {
    inbox.iter().map(|m| m.id).max().unwrap_or(0) + 1
}

fn next_quiz_id(quizzes: &[Quiz], now_ms: i64) -> i64 {
    let max_existing = quizzes.iter().map(|q| q.id).max().unwrap_or(i64::MIN);
    now_ms.max(max_existing.saturating_add(1))
}
