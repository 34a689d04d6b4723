//! User identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Username and email are unique across users.
///
/// Credentials and authentication live outside this crate; only identity
/// fields are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
