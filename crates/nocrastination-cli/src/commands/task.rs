//! Task management commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use nocrastination_core::storage::{Database, Store};
use nocrastination_core::{Task, TaskPriority};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Owning user ID
        #[arg(long)]
        user: String,
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Category label
        #[arg(long)]
        category: Option<String>,
        /// Priority: high, medium, or low (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due timestamp (RFC3339)
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Estimated effort in minutes
        #[arg(long, default_value = "0")]
        estimated_minutes: u32,
    },
    /// List a user's tasks
    List {
        /// User ID
        #[arg(long)]
        user: String,
    },
    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
        /// Actual effort in minutes
        #[arg(long, default_value = "25")]
        actual_minutes: u32,
    },
    /// Delete a task (its sessions go with it)
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            user,
            title,
            description,
            category,
            priority,
            due,
            estimated_minutes,
        } => {
            let mut task = Task::new(user, title);
            task.description = description;
            task.category = category;
            task.priority = match priority.as_str() {
                "high" => TaskPriority::High,
                "low" => TaskPriority::Low,
                _ => TaskPriority::Medium,
            };
            task.due_date = due;
            task.estimated_minutes = estimated_minutes;
            db.create_task(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { user } => {
            let tasks = db.tasks_for_user(&user)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Show { id } => {
            let task = db.task(&id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Complete { id, actual_minutes } => {
            let task = db.complete_task(&id, actual_minutes)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            db.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
