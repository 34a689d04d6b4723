//! Seed commands: generate or wipe synthetic sample data.

use clap::Subcommand;
use nocrastination_core::storage::{Config, Database};
use nocrastination_core::{ProductivityAggregator, Seeder};

#[derive(Subcommand)]
pub enum SeedAction {
    /// Generate a synthetic dataset (users, tasks, sessions, daily stats)
    Run {
        /// Number of users
        #[arg(long)]
        users: Option<u32>,
        /// Minimum tasks per user
        #[arg(long)]
        min_tasks: Option<u32>,
        /// Maximum tasks per user
        #[arg(long)]
        max_tasks: Option<u32>,
        /// Number of trailing days to compute stats for
        #[arg(long)]
        days: Option<u32>,
        /// Random seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
        /// Force every generated task to COMPLETED
        #[arg(long)]
        force_completed: bool,
    },
    /// Delete all stored data
    Wipe,
}

pub fn run(action: SeedAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SeedAction::Run {
            users,
            min_tasks,
            max_tasks,
            days,
            seed,
            force_completed,
        } => {
            let config = Config::load()?;
            let mut seed_config = config.seed;
            if let Some(users) = users {
                seed_config.user_count = users;
            }
            if let Some(min_tasks) = min_tasks {
                seed_config.min_tasks_per_user = min_tasks;
            }
            if let Some(max_tasks) = max_tasks {
                seed_config.max_tasks_per_user = max_tasks;
            }
            if let Some(days) = days {
                seed_config.stat_days = days;
            }
            if seed.is_some() {
                seed_config.seed = seed;
            }
            seed_config.force_completed = force_completed;

            let aggregator = ProductivityAggregator::new(config.scoring);
            let summary = Seeder::new(seed_config).run(&db, &aggregator)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        SeedAction::Wipe => {
            let summary = db.reset_all()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
