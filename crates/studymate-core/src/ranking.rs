//! Point rankings.
//!
//! The leaderboard is a static dataset per scope with the live user merged
//! in. The current user is recognised by display name, so two people sharing
//! a name are both highlighted and only one of them is ever injected.

use serde::{Deserialize, Serialize};

use crate::profile::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingScope {
    #[default]
    Class,
    Grade,
}

impl std::str::FromStr for RankingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(RankingScope::Class),
            "grade" => Ok(RankingScope::Grade),
            other => Err(format!("unknown ranking scope '{other}' (expected class or grade)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub points: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl RankingEntry {
    pub fn new(name: &str, points: u64) -> Self {
        Self {
            name: name.to_string(),
            points,
            class_name: None,
        }
    }

    pub fn in_class(name: &str, points: u64, class_name: &str) -> Self {
        Self {
            name: name.to_string(),
            points,
            class_name: Some(class_name.to_string()),
        }
    }
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    /// 1-based position after sorting.
    pub rank: usize,
    #[serde(flatten)]
    pub entry: RankingEntry,
    /// Row shares the current user's name.
    pub is_self: bool,
}

/// Per-scope leaderboard datasets.
#[derive(Debug, Clone, Default)]
pub struct RankingBoard {
    pub class: Vec<RankingEntry>,
    pub grade: Vec<RankingEntry>,
}

impl RankingBoard {
    pub fn entries(&self, scope: RankingScope) -> &[RankingEntry] {
        match scope {
            RankingScope::Class => &self.class,
            RankingScope::Grade => &self.grade,
        }
    }

    pub fn build(&self, user: Option<&User>, scope: RankingScope) -> Vec<RankedRow> {
        build_ranking(self.entries(scope), user, scope)
    }
}

/// Merge the live user into `entries` and rank by points, highest first.
///
/// A student is appended when no entry carries their name; the grade scope
/// also records their class. Equal scores keep their input order.
pub fn build_ranking(
    entries: &[RankingEntry],
    user: Option<&User>,
    scope: RankingScope,
) -> Vec<RankedRow> {
    let mut merged = entries.to_vec();

    if let Some(user) = user.filter(|u| u.is_student()) {
        if !merged.iter().any(|e| e.name == user.name) {
            merged.push(RankingEntry {
                name: user.name.clone(),
                points: user.points,
                class_name: match scope {
                    RankingScope::Class => None,
                    RankingScope::Grade => Some(user.class_name.clone()),
                },
            });
        }
    }

    // slice::sort_by_key is stable
    merged.sort_by_key(|e| std::cmp::Reverse(e.points));

    merged
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedRow {
            rank: i + 1,
            is_self: user.is_some_and(|u| u.name == entry.name),
            entry,
        })
        .collect()
}
