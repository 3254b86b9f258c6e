//! Keys of the persisted state slices.

pub const USER: &str = "user";
pub const QUIZZES: &str = "quizzes";
pub const TODOS: &str = "todos";
pub const CALENDAR: &str = "calendar";
pub const SETTINGS: &str = "settings";
pub const LAST_LOGIN: &str = "last_login";
pub const STUDY_LOG: &str = "study_log";
pub const STAMPS: &str = "stamps";
/// Session-scoped flags; cleared at the first login of a day.
pub const SESSION_FLAGS: &str = "session_flags";
pub const INBOX: &str = "inbox";
