//! Per-user profile with pomodoro preferences.

use serde::{Deserialize, Serialize};

/// Extended profile information, one per user.
///
/// Duration preferences are bounded by the schema registry:
/// daily goal 30..=720, work 5..=60, short break 1..=15, long break 10..=30
/// (all minutes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: String,
    /// Owning user (1:1)
    pub user_id: String,
    /// Display name (<= 100 characters)
    pub full_name: Option<String>,
    pub bio: Option<String>,
    /// IANA timezone name
    pub timezone: String,
    /// Daily focus goal in minutes
    pub daily_goal_minutes: u32,
    /// Preferred work interval length
    pub work_duration_minutes: u32,
    /// Preferred short break length
    pub short_break_minutes: u32,
    /// Preferred long break length
    pub long_break_minutes: u32,
}

impl UserProfile {
    /// Create a profile for `user_id` with the default preferences.
    pub fn new(user_id: impl Into<String>) -> Self {
        UserProfile {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            full_name: None,
            bio: None,
            timezone: "Europe/Lisbon".to_string(),
            daily_goal_minutes: 240,
            work_duration_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
        }
    }
}
