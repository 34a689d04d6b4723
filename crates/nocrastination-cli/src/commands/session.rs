//! Pomodoro session commands.

use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use nocrastination_core::storage::{Database, Store};
use nocrastination_core::{PomodoroSession, SessionType};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Log a session against a task
    Log {
        /// Task ID the session belongs to
        #[arg(long)]
        task: String,
        /// Session type: work, short-break, or long-break
        #[arg(long, default_value = "work")]
        r#type: String,
        /// Start timestamp (RFC3339, default: duration ago)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// Length in minutes
        #[arg(long, default_value = "25")]
        minutes: u32,
        /// Number of interruptions
        #[arg(long, default_value = "0")]
        interruptions: u32,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List sessions for a task
    List {
        /// Task ID
        #[arg(long)]
        task: String,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionAction::Log {
            task,
            r#type,
            start,
            minutes,
            interruptions,
            note,
        } => {
            let owner = db.task(&task)?;
            let start = start.unwrap_or_else(|| Utc::now() - Duration::minutes(minutes as i64));
            let mut session = PomodoroSession::work(&owner.user_id, &owner.id, start, minutes);
            session.session_type = match r#type.as_str() {
                "short-break" => SessionType::ShortBreak,
                "long-break" => SessionType::LongBreak,
                _ => SessionType::Work,
            };
            session.interruptions = interruptions;
            session.notes = note;
            db.create_session(&session)?;
            println!("Session logged: {}", session.id);
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::List { task } => {
            let sessions = db.sessions_for_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}
