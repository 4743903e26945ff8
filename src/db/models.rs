use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    /// Password hash, never the plaintext.
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a user; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(fullname: String, email: String, password_hash: String) -> Self {
        Self {
            fullname,
            email,
            password_hash,
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            fullname: self.fullname,
            email: self.email,
            password: self.password_hash,
            created_at: Utc::now(),
        }
    }
}
