//! User profile and role.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
}

impl std::str::FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "teacher" => Ok(UserRole::Teacher),
            other => Err(ValidationError::InvalidValue {
                field: "role",
                message: format!("expected 'student' or 'teacher', got '{other}'"),
            }),
        }
    }
}

/// The logged-in user. Points only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub class_name: String,
    pub role: UserRole,
    pub points: u64,
    pub avatar_color: String,
    pub tracks_study_time: bool,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl User {
    /// Build a fresh profile from a sign-in form.
    ///
    /// Students must give a birthday; names must not be blank.
    pub fn sign_up(
        name: &str,
        class_name: &str,
        role: UserRole,
        birthday: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if role == UserRole::Student && birthday.is_none() {
            return Err(ValidationError::EmptyField("birthday"));
        }
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(ValidationError::EmptyField("class_name"));
        }

        let (id_prefix, avatar_color) = match role {
            UserRole::Student => ("student", "bg-teal-500"),
            UserRole::Teacher => ("teacher", "bg-indigo-500"),
        };
        Ok(Self {
            id: format!("{id_prefix}-{}", chrono::Utc::now().timestamp_millis()),
            name: name.to_string(),
            email: String::new(),
            class_name: class_name.to_string(),
            role,
            points: 0,
            avatar_color: avatar_color.to_string(),
            tracks_study_time: true,
            birthday,
        })
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    /// True when `day` shares the birthday's month and day.
    pub fn is_birthday(&self, day: NaiveDate) -> bool {
        self.birthday
            .is_some_and(|b| b.month() == day.month() && b.day() == day.day())
    }

    pub fn add_points(&mut self, points: u64) {
        self.points = self.points.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn birthday_matches_month_and_day_only() {
        let user = User::sign_up("Aoi", "2-B", UserRole::Student, Some(date(2010, 8, 15))).unwrap();
        assert!(user.is_birthday(date(2024, 8, 15)));
        assert!(!user.is_birthday(date(2024, 8, 16)));
    }

    #[test]
    fn sign_up_requires_birthday_for_students() {
        assert_eq!(
            User::sign_up("Aoi", "2-B", UserRole::Student, None),
            Err(ValidationError::EmptyField("birthday"))
        );
        let teacher = User::sign_up("Tanaka", "2-B", UserRole::Teacher, None).unwrap();
        assert!(!teacher.is_student());
        assert_eq!(teacher.points, 0);
    }

    #[test]
    fn sign_up_rejects_blank_name() {
        assert_eq!(
            User::sign_up("   ", "2-B", UserRole::Teacher, None),
            Err(ValidationError::EmptyField("name"))
        );
    }

    #[test]
    fn role_parses_from_lowercase() {
        assert_eq!("teacher".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn user_without_birthday_field_deserializes() {
        let json = r#"{"id":"t","name":"T","email":"","class_name":"2-B","role":"teacher",
            "points":0,"avatar_color":"bg-indigo-500","tracks_study_time":true}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.birthday.is_none());
    }
}
