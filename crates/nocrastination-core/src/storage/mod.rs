mod config;
pub mod database;

pub use config::Config;
pub use database::{Database, ResetSummary};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::entity::{DailyStat, PomodoroSession, Task, User, UserProfile};
use crate::error::Result;

/// Returns `~/.config/nocrastination[-dev]/` based on NOCRASTINATION_ENV.
///
/// Set NOCRASTINATION_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("NOCRASTINATION_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("nocrastination-dev")
    } else {
        base_dir.join("nocrastination")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Per-day session rollup split by session type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRollup {
    pub sessions: u32,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

/// Storage contract the seeder and the productivity aggregator depend on.
///
/// Handles are passed explicitly to both; there is no ambient global
/// storage instance. [`Database`] is the SQLite implementation.
pub trait Store {
    fn create_user(&self, user: &User) -> Result<()>;
    fn create_profile(&self, profile: &UserProfile) -> Result<()>;
    fn create_task(&self, task: &Task) -> Result<()>;
    fn create_session(&self, session: &PomodoroSession) -> Result<()>;

    /// Insert or replace the (user, date) daily stat row.
    fn upsert_daily_stat(&self, stat: &DailyStat) -> Result<()>;

    /// Count of the user's tasks completed on `date` (UTC).
    fn completed_tasks_on(&self, user_id: &str, date: NaiveDate) -> Result<u32>;

    /// Count of the user's tasks created on `date` (UTC).
    fn created_tasks_on(&self, user_id: &str, date: NaiveDate) -> Result<u32>;

    /// Rollup of the user's sessions starting on `date` (UTC).
    fn session_rollup_on(&self, user_id: &str, date: NaiveDate) -> Result<SessionRollup>;
}
