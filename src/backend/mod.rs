//! The managed data/auth service the dashboard delegates to.
//!
//! Everything the rest of the crate knows about storage goes through the
//! [`Backend`] trait: authenticated row operations against the `goals` and
//! `micro_goals` tables plus email/password sessions. Row scoping follows
//! row-level-security semantics, so callers never filter by owner themselves.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::sync::Arc;

pub mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

pub use sqlite::SqliteBackend;

pub type SharedBackend = Arc<dyn Backend>;
pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("user already registered")]
    UserAlreadyExists,

    #[error("password should be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("permission denied for {table}")]
    PermissionDenied { table: &'static str },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("connection lock poisoned")]
    Poisoned,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Direction of the `created_at` ordering applied to a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// A row of the `goals` table as the backend stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub progress: i64,
    pub start_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; status and progress take the table defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoalRow {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
}

/// Column-wise update. `None` leaves a column alone; `Some(None)` writes null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub priority: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub progress: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MicroGoalRow {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMicroGoalRow {
    pub goal_id: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MicroGoalPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub is_completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

pub trait Backend: Send + Sync {
    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session>;
    fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session>;
    fn sign_out(&self, access_token: &str) -> BackendResult<()>;
    /// Resolves an access token; unknown tokens are `Ok(None)`, not an error.
    fn get_user(&self, access_token: &str) -> BackendResult<Option<User>>;

    fn select_goals(&self, user: &User, order: Order) -> BackendResult<Vec<GoalRow>>;
    fn insert_goal(&self, user: &User, row: NewGoalRow) -> BackendResult<GoalRow>;
    fn update_goal(&self, user: &User, id: &str, patch: GoalPatch) -> BackendResult<()>;
    fn delete_goal(&self, user: &User, id: &str) -> BackendResult<()>;

    fn select_micro_goals(
        &self,
        user: &User,
        goal_id: &str,
        order: Order,
    ) -> BackendResult<Vec<MicroGoalRow>>;
    fn insert_micro_goal(&self, user: &User, row: NewMicroGoalRow) -> BackendResult<MicroGoalRow>;
    fn update_micro_goal(&self, user: &User, id: &str, patch: MicroGoalPatch) -> BackendResult<()>;
    fn delete_micro_goal(&self, user: &User, id: &str) -> BackendResult<()>;
}
