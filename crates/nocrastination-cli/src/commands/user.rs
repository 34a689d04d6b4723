//! User management commands.

use clap::Subcommand;
use nocrastination_core::storage::{Database, Store};
use nocrastination_core::{User, UserProfile};

#[derive(Subcommand)]
pub enum UserAction {
    /// List users
    List,
    /// Create a user with a default profile
    Add {
        /// Unique username
        username: String,
        /// Unique email address
        email: String,
    },
    /// Delete a user and everything they own
    Delete {
        /// User ID
        id: String,
    },
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        UserAction::List => {
            let users = db.users()?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        UserAction::Add { username, email } => {
            let user = User::new(username, email);
            db.create_user(&user)?;
            db.create_profile(&UserProfile::new(&user.id))?;
            println!("User created: {}", user.id);
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserAction::Delete { id } => {
            db.delete_user(&id)?;
            println!("User deleted: {id}");
        }
    }
    Ok(())
}
