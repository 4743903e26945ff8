use async_trait::async_trait;
use uuid::Uuid;

use crate::db::models::{NewUser, User};
use crate::error::AppError;

/// Persistent record keeper for user accounts, keyed by email and by id.
///
/// `create` must enforce email uniqueness atomically and report a clash as
/// `DatabaseError::Duplicate`; no application-level locking sits above it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}
