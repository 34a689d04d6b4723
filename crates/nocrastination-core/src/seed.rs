//! Synthetic data generator for development and testing.
//!
//! Produces a closed, internally consistent dataset: users with profiles,
//! tasks per user, pomodoro sessions for completed tasks, and derived daily
//! stats computed by the productivity aggregator.
//!
//! Invariants held by construction:
//! - `completed_at` is set iff a task's status is COMPLETED
//! - only COMPLETED tasks receive sessions (strict precondition)
//! - every generated session starts within 24h before its task's
//!   `completed_at` and ends exactly `duration_minutes` later
//!
//! There is no transaction boundary: a storage failure aborts the run and
//! rows written before the failure remain. Partial datasets are an accepted
//! limitation of the generator; wipe and reseed to recover.

use chrono::{Duration, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::entity::{PomodoroSession, Task, TaskPriority, TaskStatus, User, UserProfile};
use crate::error::{Result, ValidationError};
use crate::productivity::ProductivityAggregator;
use crate::storage::Store;

const WORK_DURATIONS: [u32; 3] = [25, 30, 45];
const SHORT_BREAKS: [u32; 2] = [5, 10];
const LONG_BREAKS: [u32; 3] = [15, 20, 30];

const CATEGORIES: [&str; 5] = ["Trabalho", "Estudo", "Pessoal", "Saúde", "Casa"];

const TITLE_VERBS: [&str; 10] = [
    "Review", "Draft", "Refactor", "Plan", "Update", "Prepare", "Organize", "Research", "Fix",
    "Finish",
];
const TITLE_OBJECTS: [&str; 10] = [
    "the quarterly report",
    "the project roadmap",
    "meeting notes",
    "the budget spreadsheet",
    "presentation slides",
    "the reading list",
    "the exercise plan",
    "the grocery run",
    "study notes",
    "the client proposal",
];

const FIRST_NAMES: [&str; 8] = [
    "Ana", "João", "Maria", "Pedro", "Sofia", "Miguel", "Beatriz", "Tiago",
];
const LAST_NAMES: [&str; 8] = [
    "Silva", "Santos", "Ferreira", "Pereira", "Costa", "Oliveira", "Martins", "Sousa",
];

const BIOS: [&str; 4] = [
    "Getting things done, one pomodoro at a time.",
    "Focused work in the morning, breaks in the sun.",
    "Trying to keep the task list shorter than the day.",
    "Deep work enthusiast and serial list maker.",
];

const SESSION_NOTES: [&str; 4] = [
    "Good focus throughout.",
    "Lost a few minutes to a phone call.",
    "Harder than expected, needs a follow-up session.",
    "Finished early and reviewed the result.",
];

/// Configuration for a seed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of users to generate
    #[serde(default = "default_user_count")]
    pub user_count: u32,
    /// Minimum tasks per user
    #[serde(default = "default_min_tasks")]
    pub min_tasks_per_user: u32,
    /// Maximum tasks per user
    #[serde(default = "default_max_tasks")]
    pub max_tasks_per_user: u32,
    /// Minimum sessions per completed task
    #[serde(default = "default_min_sessions")]
    pub min_sessions_per_task: u32,
    /// Maximum sessions per completed task
    #[serde(default = "default_max_sessions")]
    pub max_sessions_per_task: u32,
    /// Number of trailing days to compute daily stats for
    #[serde(default = "default_stat_days")]
    pub stat_days: u32,
    /// Random seed for reproducibility (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Force every task to COMPLETED (for deterministic scenarios)
    #[serde(default)]
    pub force_completed: bool,
}

fn default_user_count() -> u32 {
    5
}
fn default_min_tasks() -> u32 {
    5
}
fn default_max_tasks() -> u32 {
    15
}
fn default_min_sessions() -> u32 {
    1
}
fn default_max_sessions() -> u32 {
    4
}
fn default_stat_days() -> u32 {
    30
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            user_count: default_user_count(),
            min_tasks_per_user: default_min_tasks(),
            max_tasks_per_user: default_max_tasks(),
            min_sessions_per_task: default_min_sessions(),
            max_sessions_per_task: default_max_sessions(),
            stat_days: default_stat_days(),
            seed: None,
            force_completed: false,
        }
    }
}

/// Counts of entities written by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub users: u32,
    pub profiles: u32,
    pub tasks: u32,
    pub sessions: u32,
    pub daily_stats: u32,
}

/// The seed generator.
pub struct Seeder {
    config: SeedConfig,
}

impl Seeder {
    pub fn new(config: SeedConfig) -> Self {
        Seeder { config }
    }

    /// Run the generator against `store`, deriving daily stats via
    /// `aggregator`.
    ///
    /// # Errors
    /// Inverted task or session ranges are rejected before anything is
    /// written. After that, the first storage failure aborts the run;
    /// rows written before the failure are not rolled back.
    pub fn run<S: Store + ?Sized>(
        &self,
        store: &S,
        aggregator: &ProductivityAggregator,
    ) -> Result<SeedSummary> {
        self.validate_ranges()?;
        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        let mut summary = SeedSummary::default();

        let mut users = Vec::new();
        for i in 1..=self.config.user_count {
            let user = User::new(format!("user{i}"), format!("user{i}@nocrastination.com"));
            store.create_user(&user)?;
            summary.users += 1;

            store.create_profile(&self.generate_profile(&user.id, &mut rng))?;
            summary.profiles += 1;
            users.push(user);
        }

        for user in &users {
            let task_count =
                rng.gen_range(self.config.min_tasks_per_user..=self.config.max_tasks_per_user);
            for _ in 0..task_count {
                let task = self.generate_task(&user.id, &mut rng);
                store.create_task(&task)?;
                summary.tasks += 1;

                // Sessions exist only for completed work.
                if task.status == TaskStatus::Completed {
                    for session in self.generate_sessions(&task, &mut rng) {
                        store.create_session(&session)?;
                        summary.sessions += 1;
                    }
                }
            }
        }

        let today = Utc::now().date_naive();
        for user in &users {
            for days_ago in 0..self.config.stat_days {
                let date = today - Duration::days(days_ago as i64);
                let stat = aggregator.daily_stat(store, &user.id, date)?;
                if stat.has_activity() {
                    store.upsert_daily_stat(&stat)?;
                    summary.daily_stats += 1;
                }
            }
        }

        Ok(summary)
    }

    fn validate_ranges(&self) -> Result<(), ValidationError> {
        if self.config.min_tasks_per_user > self.config.max_tasks_per_user {
            return Err(ValidationError::InvalidValue {
                field: "tasks_per_user",
                message: format!(
                    "minimum {} exceeds maximum {}",
                    self.config.min_tasks_per_user, self.config.max_tasks_per_user
                ),
            });
        }
        if self.config.min_sessions_per_task > self.config.max_sessions_per_task {
            return Err(ValidationError::InvalidValue {
                field: "sessions_per_task",
                message: format!(
                    "minimum {} exceeds maximum {}",
                    self.config.min_sessions_per_task, self.config.max_sessions_per_task
                ),
            });
        }
        Ok(())
    }

    fn generate_profile(&self, user_id: &str, rng: &mut Mcg128Xsl64) -> UserProfile {
        let mut profile = UserProfile::new(user_id);
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        profile.full_name = Some(format!("{first} {last}"));
        profile.bio = Some(BIOS[rng.gen_range(0..BIOS.len())].to_string());
        profile.daily_goal_minutes = rng.gen_range(180..=480);
        profile.work_duration_minutes = WORK_DURATIONS[rng.gen_range(0..WORK_DURATIONS.len())];
        profile.short_break_minutes = SHORT_BREAKS[rng.gen_range(0..SHORT_BREAKS.len())];
        profile.long_break_minutes = LONG_BREAKS[rng.gen_range(0..LONG_BREAKS.len())];
        profile
    }

    fn generate_task(&self, user_id: &str, rng: &mut Mcg128Xsl64) -> Task {
        let now = Utc::now();
        let verb = TITLE_VERBS[rng.gen_range(0..TITLE_VERBS.len())];
        let object = TITLE_OBJECTS[rng.gen_range(0..TITLE_OBJECTS.len())];

        let mut task = Task::new(user_id, format!("{verb} {object}"));
        task.description = Some(format!("{verb} {object} before the deadline."));
        task.category = Some(CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string());
        task.priority = TaskPriority::ALL[rng.gen_range(0..TaskPriority::ALL.len())];
        task.estimated_minutes = rng.gen_range(15..=240);

        // Due anywhere in [now - 7d, now + 14d].
        let due = now + Duration::minutes(rng.gen_range(-7 * 1440..=14 * 1440));
        task.due_date = Some(due);

        task.status = if self.config.force_completed {
            TaskStatus::Completed
        } else {
            TaskStatus::ALL[rng.gen_range(0..TaskStatus::ALL.len())]
        };

        if task.status == TaskStatus::Completed {
            // Completion lands in [due - 2d, now], clamped into the past
            // for tasks due in the future.
            let floor = (due - Duration::days(2)).min(now - Duration::minutes(1));
            let span = (now - floor).num_minutes().max(1);
            task.completed_at = Some(floor + Duration::minutes(rng.gen_range(0..=span)));
            task.actual_minutes = rng.gen_range(15..=300);
        }

        // Creation precedes completion and stays within the stats window.
        let latest = task.completed_at.unwrap_or(now);
        let earliest = now - Duration::days(self.config.stat_days.max(1) as i64);
        let create_span = (latest - earliest).num_minutes();
        task.created_at = if create_span > 0 {
            earliest + Duration::minutes(rng.gen_range(0..=create_span))
        } else {
            latest - Duration::minutes(1)
        };

        task
    }

    fn generate_sessions(&self, task: &Task, rng: &mut Mcg128Xsl64) -> Vec<PomodoroSession> {
        let completed_at = match task.completed_at {
            Some(ts) => ts,
            None => return Vec::new(),
        };
        let count =
            rng.gen_range(self.config.min_sessions_per_task..=self.config.max_sessions_per_task);

        (0..count)
            .map(|_| {
                let start = completed_at - Duration::minutes(rng.gen_range(0..=24 * 60));
                let mut session = PomodoroSession::work(&task.user_id, &task.id, start, 25);
                session.interruptions = rng.gen_range(0..=3);
                if rng.gen::<f32>() < 0.3 {
                    session.notes =
                        Some(SESSION_NOTES[rng.gen_range(0..SESSION_NOTES.len())].to_string());
                }
                session
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::Database;

    #[test]
    fn inverted_ranges_are_rejected_before_writing() {
        let db = Database::open_memory().unwrap();
        let aggregator = ProductivityAggregator::default();

        let config = SeedConfig {
            min_tasks_per_user: 10,
            max_tasks_per_user: 2,
            seed: Some(1),
            ..SeedConfig::default()
        };
        let err = Seeder::new(config).run(&db, &aggregator).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        // Nothing reached the store.
        assert!(db.users().unwrap().is_empty());

        let config = SeedConfig {
            min_sessions_per_task: 4,
            max_sessions_per_task: 1,
            seed: Some(1),
            ..SeedConfig::default()
        };
        let err = Seeder::new(config).run(&db, &aggregator).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(db.users().unwrap().is_empty());
    }

    #[test]
    fn same_seed_same_summary() {
        let config = SeedConfig {
            user_count: 2,
            seed: Some(42),
            ..SeedConfig::default()
        };
        let aggregator = ProductivityAggregator::default();

        let db_a = Database::open_memory().unwrap();
        let summary_a = Seeder::new(config.clone()).run(&db_a, &aggregator).unwrap();

        let db_b = Database::open_memory().unwrap();
        let summary_b = Seeder::new(config).run(&db_b, &aggregator).unwrap();

        assert_eq!(summary_a, summary_b);
        assert_eq!(summary_a.users, 2);
        assert_eq!(summary_a.profiles, 2);
    }

    #[test]
    fn profiles_stay_within_declared_bounds() {
        let seeder = Seeder::new(SeedConfig::default());
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        for _ in 0..50 {
            let profile = seeder.generate_profile("user-x", &mut rng);
            assert!((180..=480).contains(&profile.daily_goal_minutes));
            assert!(WORK_DURATIONS.contains(&profile.work_duration_minutes));
            assert!(SHORT_BREAKS.contains(&profile.short_break_minutes));
            assert!(LONG_BREAKS.contains(&profile.long_break_minutes));
        }
    }

    #[test]
    fn only_completed_tasks_carry_completion_fields() {
        let seeder = Seeder::new(SeedConfig::default());
        let mut rng = Mcg128Xsl64::seed_from_u64(11);
        for _ in 0..100 {
            let task = seeder.generate_task("user-x", &mut rng);
            if task.status == TaskStatus::Completed {
                assert!(task.completed_at.is_some());
                assert!(task.actual_minutes > 0);
            } else {
                assert!(task.completed_at.is_none());
                assert_eq!(task.actual_minutes, 0);
                assert!(seeder.generate_sessions(&task, &mut rng).is_empty());
            }
            assert!(task.created_at <= task.completed_at.unwrap_or(Utc::now()));
        }
    }
}
