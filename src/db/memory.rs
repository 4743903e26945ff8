use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::models::{NewUser, User};
use crate::db::store::CredentialStore;
use crate::error::{AppError, DatabaseError};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

/// Process-local credential store. The duplicate check and the insert share
/// one write lock, so concurrent registrations of one email cannot both win.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    tables: RwLock<Tables>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes a user. Not part of the auth flow; used to model accounts
    /// removed out of band.
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        let mut tables = self.tables.write().await;
        let user = tables.users.remove(&id)?;
        tables.by_email.remove(&user.email);
        Some(user)
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.by_email.contains_key(&user.email) {
            return Err(DatabaseError::Duplicate.into());
        }

        let user = user.into_user();
        tables.by_email.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}
