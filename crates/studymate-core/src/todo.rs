//! Study plan todos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i64, text: &str, due_date: DateTime<Utc>) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyField("text"));
        }
        Ok(Self {
            id,
            text: text.to_string(),
            due_date,
            completed: false,
        })
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            Todo::new(1, "", Utc::now()),
            Err(ValidationError::EmptyField("text"))
        );
    }

    #[test]
    fn overdue_only_when_open_and_past_due() {
        let now = Utc::now();
        let mut todo = Todo::new(1, "Science report", now - Duration::days(1)).unwrap();
        assert!(todo.is_overdue(now));
        todo.completed = true;
        assert!(!todo.is_overdue(now));
        let later = Todo::new(2, "Workbook p.34", now + Duration::days(2)).unwrap();
        assert!(!later.is_overdue(now));
    }
}
