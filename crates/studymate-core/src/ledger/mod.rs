//! Points & study-time ledger.
//!
//! Pure point-delta rules plus the per-day study-seconds log. Nothing here
//! fails: negative or inconsistent inputs are caller bugs.

mod points;
mod study_log;

pub use points::{
    award_login, award_quiz_correct_answers, award_study_chunk, award_video_view, LoginAward,
    PointRules, BIRTHDAY_BONUS, LOGIN_BONUS, QUIZ_CORRECT_ANSWER_POINTS, STUDY_CHUNK_POINTS,
    STUDY_CHUNK_SECS, VIDEO_VIEW_POINTS,
};
pub use study_log::{accumulate_study_second, date_key, DailyStudy, StudyLog, StudyTotal};
