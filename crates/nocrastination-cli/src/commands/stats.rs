//! Daily productivity statistics commands.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use nocrastination_core::storage::{Config, Database};
use nocrastination_core::ProductivityAggregator;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Computed stats for one day (not persisted)
    Day {
        /// User ID
        #[arg(long)]
        user: String,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List stored daily stat rows for a user
    List {
        /// User ID
        #[arg(long)]
        user: String,
    },
    /// Recompute and store one day's stats
    Recompute {
        /// User ID
        #[arg(long)]
        user: String,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let aggregator = ProductivityAggregator::new(Config::load_or_default().scoring);

    match action {
        StatsAction::Day { user, date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let stat = aggregator.daily_stat(&db, &user, date)?;
            println!("{}", serde_json::to_string_pretty(&stat)?);
        }
        StatsAction::List { user } => {
            let stats = db.daily_stats_for_user(&user)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recompute { user, date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let stat = aggregator.recompute(&db, &user, date)?;
            println!("{}", serde_json::to_string_pretty(&stat)?);
        }
    }
    Ok(())
}
