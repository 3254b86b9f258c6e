//! Built-in sample data: demo accounts, videos, quizzes, todos and the
//! static leaderboards.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::app::InboxMessage;
use crate::profile::{User, UserRole};
use crate::quiz::{QuestionKind, Quiz, QuizQuestion};
use crate::ranking::{RankingBoard, RankingEntry};
use crate::todo::Todo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub id: u64,
    pub title: String,
    pub uploader: String,
}

pub fn demo_student() -> User {
    User {
        id: "student1".into(),
        name: "Ichiro Suzuki".into(),
        email: "student@example.com".into(),
        class_name: "2-B".into(),
        role: UserRole::Student,
        points: 1680,
        avatar_color: "bg-teal-500".into(),
        tracks_study_time: true,
        birthday: NaiveDate::from_ymd_opt(2010, 8, 15),
    }
}

pub fn demo_teacher() -> User {
    User {
        id: "teacher1".into(),
        name: "Mr. Tanaka".into(),
        email: "teacher@example.com".into(),
        class_name: "2-B".into(),
        role: UserRole::Teacher,
        points: 0,
        avatar_color: "bg-indigo-500".into(),
        tracks_study_time: true,
        birthday: NaiveDate::from_ymd_opt(1985, 4, 22),
    }
}

pub fn videos() -> Vec<Video> {
    vec![
        Video {
            id: 1,
            title: "Grade 8 math: solving simultaneous equations".into(),
            uploader: "Mr. Tanaka".into(),
        },
        Video {
            id: 2,
            title: "Grade 8 science: chemical change, atoms and molecules".into(),
            uploader: "Mr. Tanaka".into(),
        },
    ]
}

pub fn quizzes() -> Vec<Quiz> {
    vec![
        Quiz {
            id: 1,
            title: "Simultaneous equations quick check".into(),
            related_video_id: Some(1),
            questions: vec![QuizQuestion {
                kind: QuestionKind::MultipleChoice,
                question: "Solve x = y + 1, x + y = 3".into(),
                options: vec![
                    "x=2, y=1".into(),
                    "x=1, y=2".into(),
                    "x=3, y=0".into(),
                    "x=0, y=3".into(),
                ],
                correct_answer: "x=2, y=1".into(),
            }],
            author_name: "Mr. Tanaka".into(),
            class_name: "2-B".into(),
        },
        Quiz {
            id: 2,
            title: "Chemical change basics".into(),
            related_video_id: Some(2),
            questions: vec![QuizQuestion {
                kind: QuestionKind::MultipleChoice,
                question: "What is the chemical formula of water?".into(),
                options: vec!["H2O".into(), "CO2".into(), "O2".into(), "H2".into()],
                correct_answer: "H2O".into(),
            }],
            author_name: "Mr. Tanaka".into(),
            class_name: "2-B".into(),
        },
    ]
}

/// Sample todos with due dates relative to `now`.
pub fn todos(now: DateTime<Utc>) -> Vec<Todo> {
    vec![
        Todo {
            id: 1,
            text: "Math workbook p.34-36".into(),
            due_date: now + Duration::days(2),
            completed: false,
        },
        Todo {
            id: 2,
            text: "Hand in science report".into(),
            due_date: now - Duration::days(1),
            completed: false,
        },
        Todo {
            id: 3,
            text: "Study for English vocabulary test".into(),
            due_date: now + Duration::days(5),
            completed: true,
        },
    ]
}

pub fn inbox() -> Vec<InboxMessage> {
    vec![
        InboxMessage {
            id: 1,
            message: "Mr. Tanaka answered your question \"Molecules vs. atoms\".".into(),
            read: false,
            video_id: Some(2),
        },
        InboxMessage {
            id: 2,
            message: "New video posted: \"Grade 8 history: the Edo period\".".into(),
            read: true,
            video_id: None,
        },
    ]
}

pub fn ranking_board() -> RankingBoard {
    RankingBoard {
        class: vec![
            RankingEntry::new("Ichiro Suzuki", 1680),
            RankingEntry::new("Shota Watanabe", 1400),
            RankingEntry::new("Aoi Nakamura", 1100),
            RankingEntry::new("Hanako Yamada", 850),
            RankingEntry::new("Takuya Kimura", 720),
            RankingEntry::new("Anonymous", 680),
            RankingEntry::new("Misaki Saito", 550),
            RankingEntry::new("Kenichi Hayashi", 430),
            RankingEntry::new("Sakura Inoue", 310),
            RankingEntry::new("Daisuke Mori", 200),
        ],
        grade: vec![
            RankingEntry::in_class("Misaki Takahashi", 1850, "2-C"),
            RankingEntry::in_class("Kenta Sato", 1720, "2-A"),
            RankingEntry::in_class("Ichiro Suzuki", 1680, "2-B"),
            RankingEntry::in_class("Sakura Ito", 1550, "2-A"),
            RankingEntry::in_class("Yuichi Tanaka", 1480, "2-C"),
            RankingEntry::in_class("Shota Watanabe", 1400, "2-B"),
            RankingEntry::in_class("Anonymous", 1350, "2-A"),
            RankingEntry::in_class("Yudai Yamamoto", 1210, "2-C"),
            RankingEntry::in_class("Aoi Nakamura", 1100, "2-B"),
            RankingEntry::in_class("Naoki Kobayashi", 980, "2-A"),
        ],
    }
}
