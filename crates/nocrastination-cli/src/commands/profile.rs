//! User profile commands.

use clap::Subcommand;
use nocrastination_core::storage::Database;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show a user's profile
    Show {
        /// User ID
        #[arg(long)]
        user: String,
    },
    /// Update profile fields
    Set {
        /// User ID
        #[arg(long)]
        user: String,
        /// Display name
        #[arg(long)]
        full_name: Option<String>,
        /// Short bio
        #[arg(long)]
        bio: Option<String>,
        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,
        /// Daily focus goal in minutes (30-720)
        #[arg(long)]
        daily_goal: Option<u32>,
        /// Work interval length in minutes (5-60)
        #[arg(long)]
        work_minutes: Option<u32>,
        /// Short break length in minutes (1-15)
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break length in minutes (10-30)
        #[arg(long)]
        long_break: Option<u32>,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ProfileAction::Show { user } => {
            let profile = db.profile_for_user(&user)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Set {
            user,
            full_name,
            bio,
            timezone,
            daily_goal,
            work_minutes,
            short_break,
            long_break,
        } => {
            let mut profile = db.profile_for_user(&user)?;
            if full_name.is_some() {
                profile.full_name = full_name;
            }
            if bio.is_some() {
                profile.bio = bio;
            }
            if let Some(timezone) = timezone {
                profile.timezone = timezone;
            }
            if let Some(daily_goal) = daily_goal {
                profile.daily_goal_minutes = daily_goal;
            }
            if let Some(work_minutes) = work_minutes {
                profile.work_duration_minutes = work_minutes;
            }
            if let Some(short_break) = short_break {
                profile.short_break_minutes = short_break;
            }
            if let Some(long_break) = long_break {
                profile.long_break_minutes = long_break;
            }
            db.update_profile(&profile)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }
    Ok(())
}
