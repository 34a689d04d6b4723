//! Pomodoro session entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of timed interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub fn is_break(&self) -> bool {
        matches!(self, SessionType::ShortBreak | SessionType::LongBreak)
    }
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::Work
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionType::Work => "WORK",
            SessionType::ShortBreak => "SHORT_BREAK",
            SessionType::LongBreak => "LONG_BREAK",
        };
        write!(f, "{s}")
    }
}

/// A timed work/break interval logged against a task.
///
/// `end_time` always equals `start_time + duration_minutes`; the storage
/// layer rejects rows that break this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroSession {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Task this session was logged against
    pub task_id: String,
    pub session_type: SessionType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Interval length in minutes (1..=60)
    pub duration_minutes: u32,
    /// Number of interruptions during the interval
    pub interruptions: u32,
    /// Whether the interval ran to completion
    pub completed: bool,
    /// Optional free-form note
    pub notes: Option<String>,
}

impl PomodoroSession {
    /// Create a completed WORK session of `duration_minutes` starting at
    /// `start_time`.
    pub fn work(
        user_id: impl Into<String>,
        task_id: impl Into<String>,
        start_time: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        PomodoroSession {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            task_id: task_id.into(),
            session_type: SessionType::Work,
            start_time,
            end_time: start_time + Duration::minutes(duration_minutes as i64),
            duration_minutes,
            interruptions: 0,
            completed: true,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_session_end_matches_duration() {
        let start = Utc::now();
        let session = PomodoroSession::work("user-1", "task-1", start, 25);
        assert_eq!(session.end_time - session.start_time, Duration::minutes(25));
        assert_eq!(session.session_type, SessionType::Work);
        assert!(session.completed);
    }

    #[test]
    fn session_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&SessionType::ShortBreak).unwrap(),
            "\"SHORT_BREAK\""
        );
        assert!(SessionType::LongBreak.is_break());
        assert!(!SessionType::Work.is_break());
    }
}
