//! Daily productivity rollup and scoring.
//!
//! Scoring is an explicit, configurable policy: a weighted sum of three
//! capped ratios, scaled to 0..=100. Weights live in the application
//! config ([`crate::storage::Config`]), not in code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::DailyStat;
use crate::error::Result;
use crate::storage::Store;

fn default_task_weight() -> f64 {
    0.4
}
fn default_focus_weight() -> f64 {
    0.4
}
fn default_session_weight() -> f64 {
    0.2
}
fn default_task_target() -> u32 {
    5
}
fn default_daily_goal_minutes() -> u32 {
    240
}
fn default_session_target() -> u32 {
    8
}

/// Weighting policy for the daily productivity score.
///
/// ```text
/// score = 100 * ( task_weight    * min(tasks_completed / task_target, 1)
///               + focus_weight   * min(work_minutes / daily_goal_minutes, 1)
///               + session_weight * min(sessions / session_target, 1) )
/// ```
///
/// The result is clamped to 0..=100, so the score stays in range even for
/// weights that do not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePolicy {
    #[serde(default = "default_task_weight")]
    pub task_weight: f64,
    #[serde(default = "default_focus_weight")]
    pub focus_weight: f64,
    #[serde(default = "default_session_weight")]
    pub session_weight: f64,
    /// Completed tasks per day considered a full task score
    #[serde(default = "default_task_target")]
    pub task_target: u32,
    /// Work minutes per day considered a full focus score
    #[serde(default = "default_daily_goal_minutes")]
    pub daily_goal_minutes: u32,
    /// Sessions per day considered a full session score
    #[serde(default = "default_session_target")]
    pub session_target: u32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        ScorePolicy {
            task_weight: default_task_weight(),
            focus_weight: default_focus_weight(),
            session_weight: default_session_weight(),
            task_target: default_task_target(),
            daily_goal_minutes: default_daily_goal_minutes(),
            session_target: default_session_target(),
        }
    }
}

impl ScorePolicy {
    /// Score one day's activity. Always in 0..=100.
    pub fn score(&self, tasks_completed: u32, work_minutes: u32, sessions: u32) -> f64 {
        let ratio = |value: u32, target: u32| -> f64 {
            if target == 0 {
                0.0
            } else {
                (value as f64 / target as f64).min(1.0)
            }
        };
        let raw = self.task_weight * ratio(tasks_completed, self.task_target)
            + self.focus_weight * ratio(work_minutes, self.daily_goal_minutes)
            + self.session_weight * ratio(sessions, self.session_target);
        (raw * 100.0).clamp(0.0, 100.0)
    }
}

/// Computes per-user, per-day rollups from task and session records.
///
/// The aggregator is a pure function of the stored records and the policy:
/// recomputing the same (user, date) against unchanged records yields an
/// identical stat.
pub struct ProductivityAggregator {
    policy: ScorePolicy,
}

impl ProductivityAggregator {
    pub fn new(policy: ScorePolicy) -> Self {
        ProductivityAggregator { policy }
    }

    pub fn policy(&self) -> &ScorePolicy {
        &self.policy
    }

    /// Compute the rollup for `user_id` on `date` without persisting it.
    ///
    /// # Errors
    /// Any storage failure aborts the computation.
    pub fn daily_stat<S: Store + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<DailyStat> {
        let tasks_completed = store.completed_tasks_on(user_id, date)?;
        let tasks_created = store.created_tasks_on(user_id, date)?;
        let rollup = store.session_rollup_on(user_id, date)?;

        let mut stat = DailyStat::empty(user_id, date);
        stat.tasks_completed = tasks_completed;
        stat.tasks_created = tasks_created;
        stat.total_pomodoro_sessions = rollup.sessions;
        stat.total_work_minutes = rollup.work_minutes;
        stat.total_break_minutes = rollup.break_minutes;
        stat.productivity_score =
            self.policy
                .score(tasks_completed, rollup.work_minutes, rollup.sessions);
        Ok(stat)
    }

    /// Recompute and upsert the (user, date) row. Returns the stored stat.
    pub fn recompute<S: Store + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<DailyStat> {
        let stat = self.daily_stat(store, user_id, date)?;
        store.upsert_daily_stat(&stat)?;
        Ok(stat)
    }
}

impl Default for ProductivityAggregator {
    fn default() -> Self {
        ProductivityAggregator::new(ScorePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_zero_for_idle_day() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.score(0, 0, 0), 0.0);
    }

    #[test]
    fn score_caps_at_100() {
        let policy = ScorePolicy::default();
        let score = policy.score(1000, 100_000, 1000);
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_monotone_in_each_input() {
        let policy = ScorePolicy::default();
        assert!(policy.score(2, 60, 3) > policy.score(1, 60, 3));
        assert!(policy.score(2, 120, 3) > policy.score(2, 60, 3));
        assert!(policy.score(2, 60, 4) > policy.score(2, 60, 3));
    }

    #[test]
    fn zero_targets_do_not_divide_by_zero() {
        let policy = ScorePolicy {
            task_target: 0,
            daily_goal_minutes: 0,
            session_target: 0,
            ..ScorePolicy::default()
        };
        assert_eq!(policy.score(5, 300, 8), 0.0);
    }
}
