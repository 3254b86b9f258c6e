//! Session-scoped flags.
//!
//! Markers that must not outlive a session: reminders already delivered and
//! videos already rewarded. A new session starts at login.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionFlags {
    flags: BTreeSet<String>,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag for a reminder delivered for `event_id` scheduled at `date`.
    pub fn notified_key(event_id: i64, date: &str) -> String {
        format!("notified-{event_id}-{date}")
    }

    /// Flag for a video whose view bonus was already paid.
    pub fn viewed_key(video_id: u64) -> String {
        format!("viewed-video-{video_id}")
    }

    /// Set a flag. Returns `true` if it was not set before.
    pub fn mark(&mut self, key: String) -> bool {
        self.flags.insert(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_reports_first_insertion_only() {
        let mut flags = SessionFlags::new();
        assert!(flags.mark(SessionFlags::viewed_key(3)));
        assert!(!flags.mark(SessionFlags::viewed_key(3)));
        assert!(flags.contains("viewed-video-3"));
    }

    #[test]
    fn notified_key_embeds_event_and_date() {
        assert_eq!(
            SessionFlags::notified_key(17, "2024-06-01T10:00"),
            "notified-17-2024-06-01T10:00"
        );
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut flags = SessionFlags::new();
        flags.mark("b".into());
        flags.mark("a".into());
        assert_eq!(serde_json::to_string(&flags).unwrap(), r#"["a","b"]"#);
    }
}
