//! Per-user, per-day productivity rollup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Derived daily statistics for one user.
///
/// One row exists per (user, date). Rows are recomputed from task and
/// session history by the productivity aggregator, never authored
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStat {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    pub date: NaiveDate,
    pub tasks_completed: u32,
    pub tasks_created: u32,
    pub total_pomodoro_sessions: u32,
    pub total_work_minutes: u32,
    pub total_break_minutes: u32,
    /// Weighted score in 0..=100
    pub productivity_score: f64,
}

impl DailyStat {
    /// An empty rollup for `user_id` on `date`.
    pub fn empty(user_id: impl Into<String>, date: NaiveDate) -> Self {
        DailyStat {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date,
            tasks_completed: 0,
            tasks_created: 0,
            total_pomodoro_sessions: 0,
            total_work_minutes: 0,
            total_break_minutes: 0,
            productivity_score: 0.0,
        }
    }

    /// Whether the day shows any recorded activity.
    pub fn has_activity(&self) -> bool {
        self.tasks_completed > 0 || self.total_work_minutes > 0
    }
}
