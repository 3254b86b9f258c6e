//! Point award rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::User;
use crate::session::SessionFlags;

/// Daily login bonus.
pub const LOGIN_BONUS: u64 = 30;
/// Daily login bonus on the student's birthday (replaces [`LOGIN_BONUS`]).
pub const BIRTHDAY_BONUS: u64 = 70;
/// First view of a video within a session.
pub const VIDEO_VIEW_POINTS: u64 = 50;
/// Per correct quiz answer.
pub const QUIZ_CORRECT_ANSWER_POINTS: u64 = 30;
/// Length of one rewarded study chunk.
pub const STUDY_CHUNK_SECS: u64 = 1800;
/// Reward per completed study chunk.
pub const STUDY_CHUNK_POINTS: u64 = 60;

/// Point values for every award. Defaults match the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRules {
    #[serde(default = "default_login_bonus")]
    pub login_bonus: u64,
    #[serde(default = "default_birthday_bonus")]
    pub birthday_bonus: u64,
    #[serde(default = "default_video_view")]
    pub video_view: u64,
    #[serde(default = "default_quiz_correct_answer")]
    pub quiz_correct_answer: u64,
    #[serde(default = "default_study_chunk_secs")]
    pub study_chunk_secs: u64,
    #[serde(default = "default_study_chunk_points")]
    pub study_chunk_points: u64,
}

fn default_login_bonus() -> u64 {
    LOGIN_BONUS
}
fn default_birthday_bonus() -> u64 {
    BIRTHDAY_BONUS
}
fn default_video_view() -> u64 {
    VIDEO_VIEW_POINTS
}
fn default_quiz_correct_answer() -> u64 {
    QUIZ_CORRECT_ANSWER_POINTS
}
fn default_study_chunk_secs() -> u64 {
    STUDY_CHUNK_SECS
}
fn default_study_chunk_points() -> u64 {
    STUDY_CHUNK_POINTS
}

impl Default for PointRules {
    fn default() -> Self {
        Self {
            login_bonus: LOGIN_BONUS,
            birthday_bonus: BIRTHDAY_BONUS,
            video_view: VIDEO_VIEW_POINTS,
            quiz_correct_answer: QUIZ_CORRECT_ANSWER_POINTS,
            study_chunk_secs: STUDY_CHUNK_SECS,
            study_chunk_points: STUDY_CHUNK_POINTS,
        }
    }
}

/// Outcome of a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAward {
    /// The user with the bonus applied.
    pub user: User,
    /// Points added by this login (0 for teachers and same-day logins).
    pub points: u64,
    /// First login of the day: the stamp sheet must register `today`.
    pub first_login_today: bool,
}

impl PointRules {
    /// Award the daily login bonus once per calendar day.
    pub fn award_login(
        &self,
        user: &User,
        today: NaiveDate,
        last_login: Option<NaiveDate>,
    ) -> LoginAward {
        let mut user = user.clone();
        if last_login == Some(today) {
            return LoginAward {
                user,
                points: 0,
                first_login_today: false,
            };
        }

        let points = if !user.is_student() {
            0
        } else if user.is_birthday(today) {
            self.birthday_bonus
        } else {
            self.login_bonus
        };
        user.add_points(points);
        LoginAward {
            user,
            points,
            first_login_today: true,
        }
    }

    /// Points for the study chunks completed in `(previous_secs, current_secs]`.
    ///
    /// Feeding one-second ticks yields the same total as a single call over
    /// the whole range.
    pub fn study_chunk_points(&self, previous_secs: u64, current_secs: u64) -> u64 {
        if self.study_chunk_secs == 0 {
            return 0;
        }
        let last_chunk = previous_secs / self.study_chunk_secs;
        let current_chunk = current_secs / self.study_chunk_secs;
        if current_chunk > 0 && current_chunk > last_chunk {
            (current_chunk - last_chunk) * self.study_chunk_points
        } else {
            0
        }
    }

    /// Pay the view bonus for `video_id` once per session, students only.
    pub fn video_view_points(&self, user: &User, video_id: u64, viewed: &mut SessionFlags) -> u64 {
        if !user.is_student() {
            return 0;
        }
        if viewed.mark(SessionFlags::viewed_key(video_id)) {
            self.video_view
        } else {
            0
        }
    }

    /// Points for a finished quiz, students only.
    pub fn quiz_points(&self, user: &User, correct_count: u64) -> u64 {
        if user.is_student() {
            correct_count * self.quiz_correct_answer
        } else {
            0
        }
    }
}

/// [`PointRules::award_login`] with the default rules.
pub fn award_login(user: &User, today: NaiveDate, last_login: Option<NaiveDate>) -> LoginAward {
    PointRules::default().award_login(user, today, last_login)
}

/// [`PointRules::study_chunk_points`] with the default rules.
pub fn award_study_chunk(previous_secs: u64, current_secs: u64) -> u64 {
    PointRules::default().study_chunk_points(previous_secs, current_secs)
}

/// [`PointRules::video_view_points`] with the default rules.
pub fn award_video_view(user: &User, video_id: u64, viewed: &mut SessionFlags) -> u64 {
    PointRules::default().video_view_points(user, video_id, viewed)
}

/// Raw quiz reward, before the students-only gate.
pub fn award_quiz_correct_answers(correct_count: u64) -> u64 {
    correct_count * QUIZ_CORRECT_ANSWER_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::UserRole;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(points: u64) -> User {
        User {
            id: "student1".into(),
            name: "Suzuki Ichiro".into(),
            email: "student@example.com".into(),
            class_name: "2-B".into(),
            role: UserRole::Student,
            points,
            avatar_color: "bg-teal-500".into(),
            tracks_study_time: true,
            birthday: Some(date(2010, 8, 15)),
        }
    }

    fn teacher() -> User {
        User {
            role: UserRole::Teacher,
            points: 0,
            birthday: Some(date(1985, 4, 22)),
            ..student(0)
        }
    }

    #[test]
    fn login_bonus_is_awarded_once_per_day() {
        let today = date(2024, 6, 3);
        let first = award_login(&student(100), today, Some(date(2024, 6, 2)));
        assert_eq!(first.points, 30);
        assert_eq!(first.user.points, 130);
        assert!(first.first_login_today);

        let second = award_login(&first.user, today, Some(today));
        assert_eq!(second.points, 0);
        assert_eq!(second.user.points, 130);
        assert!(!second.first_login_today);
    }

    #[test]
    fn first_ever_login_counts_as_new_day() {
        let award = award_login(&student(0), date(2024, 6, 3), None);
        assert_eq!(award.points, LOGIN_BONUS);
    }

    #[test]
    fn birthday_bonus_replaces_login_bonus() {
        let award = award_login(&student(0), date(2024, 8, 15), None);
        assert_eq!(award.points, 70);
        assert_eq!(award.user.points, 70);
    }

    #[test]
    fn teachers_never_get_login_points() {
        let award = award_login(&teacher(), date(2024, 4, 22), None);
        assert_eq!(award.points, 0);
        assert!(award.first_login_today);
    }

    #[test]
    fn study_chunk_awards_on_boundary_only() {
        assert_eq!(award_study_chunk(0, 1), 0);
        assert_eq!(award_study_chunk(1798, 1799), 0);
        assert_eq!(award_study_chunk(1799, 1800), 60);
        assert_eq!(award_study_chunk(1800, 1801), 0);
        assert_eq!(award_study_chunk(3599, 3600), 60);
    }

    #[test]
    fn study_chunk_bulk_covers_skipped_boundaries() {
        assert_eq!(award_study_chunk(0, 5400), 180);
        assert_eq!(award_study_chunk(1000, 4000), 120);
        assert_eq!(award_study_chunk(4000, 4000), 0);
    }

    #[test]
    fn zero_chunk_length_awards_nothing() {
        let rules = PointRules {
            study_chunk_secs: 0,
            ..PointRules::default()
        };
        assert_eq!(rules.study_chunk_points(0, 10_000), 0);
    }

    #[test]
    fn video_view_pays_once_per_session() {
        let mut viewed = SessionFlags::new();
        let user = student(0);
        assert_eq!(award_video_view(&user, 1, &mut viewed), 50);
        assert_eq!(award_video_view(&user, 1, &mut viewed), 0);
        assert_eq!(award_video_view(&user, 2, &mut viewed), 50);
    }

    #[test]
    fn teachers_do_not_consume_video_flags() {
        let mut viewed = SessionFlags::new();
        assert_eq!(award_video_view(&teacher(), 1, &mut viewed), 0);
        assert!(viewed.is_empty());
    }

    #[test]
    fn quiz_points_scale_with_correct_answers() {
        assert_eq!(award_quiz_correct_answers(4), 120);
        let rules = PointRules::default();
        assert_eq!(rules.quiz_points(&student(0), 3), 90);
        assert_eq!(rules.quiz_points(&teacher(), 3), 0);
    }

    proptest! {
        #[test]
        fn ticking_matches_bulk_award(n in 0u64..20_000) {
            let ticked: u64 = (1..=n).map(|s| award_study_chunk(s - 1, s)).sum();
            prop_assert_eq!(ticked, award_study_chunk(0, n));
            prop_assert_eq!(ticked, (n / 1800) * 60);
        }

        #[test]
        fn split_ranges_sum_to_whole(a in 0u64..10_000, b in 0u64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert_eq!(
                award_study_chunk(0, lo) + award_study_chunk(lo, hi),
                award_study_chunk(0, hi)
            );
        }
    }
}
