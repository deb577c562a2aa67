mod query;
mod seed;

pub use query::run_query;
pub use seed::seed_users;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use roster_types::{ListUsersResult, NewUser, User, UserQuery};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("User with id {0} not found")]
    NotFound(String),
}

/// In-memory user directory, kept in insertion order. Records are only ever
/// appended.
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    pub fn seeded() -> Self {
        Self {
            users: RwLock::new(seed_users()),
        }
    }

    pub fn append(&self, user: User) {
        let mut users = self.users.write();
        users.push(user);
        debug!("Appended user, store now holds {}", users.len());
    }

    pub fn all(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn find_all(&self, query: &UserQuery) -> ListUsersResult {
        let users = self.users.read();
        run_query(&users, query)
    }

    /// Builds a record with a fresh id and timestamps and appends it.
    pub fn create(&self, new_user: NewUser) -> User {
        let user = build_user(new_user, Utc::now());
        self.append(user.clone());
        user
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn build_user(new_user: NewUser, now: DateTime<Utc>) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        name: new_user.name,
        email: new_user.email,
        age: new_user.age,
        role: new_user.role,
        created_at: now,
        updated_at: now,
    }
}
