//! Task entity and its status/priority enumerations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// `Completed` is the only status that carries a `completed_at` timestamp
/// and the only one for which pomodoro sessions are generated by the
/// seeder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// All statuses, in declaration order (used by the seeder's uniform pick).
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] =
        [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::High => "HIGH",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::Low => "LOW",
        };
        write!(f, "{s}")
    }
}

/// A user's task.
///
/// Invariants enforced at write time by the storage layer:
/// - `completed_at` is set iff `status == Completed`
/// - `actual_minutes > 0` only when `status == Completed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Task title (3..=255 characters)
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional category label (<= 50 characters)
    pub category: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Optional due timestamp
    pub due_date: Option<DateTime<Utc>>,
    /// Estimated effort in minutes
    pub estimated_minutes: u32,
    /// Actual effort in minutes (non-zero only for completed tasks)
    pub actual_minutes: u32,
    /// Completion timestamp (null unless completed)
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new TODO task with default values.
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            category: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            estimated_minutes: 0,
            actual_minutes: 0,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the task completed at `when`, recording actual effort.
    pub fn complete(&mut self, when: DateTime<Utc>, actual_minutes: u32) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(when);
        self.actual_minutes = actual_minutes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"CANCELLED\"").unwrap(),
            TaskStatus::Cancelled
        );
    }

    #[test]
    fn complete_sets_timestamp_and_effort() {
        let mut task = Task::new("user-1", "Write report");
        assert!(task.completed_at.is_none());
        let now = Utc::now();
        task.complete(now, 90);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(now));
        assert_eq!(task.actual_minutes, 90);
    }
}
