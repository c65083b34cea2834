use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::*;
use crate::data::DBConnection;

const MIN_PASSWORD_LEN: usize = 6;

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_salt TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    access_token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS goals (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL CHECK (length(title) <= 100),
    description TEXT CHECK (description IS NULL OR length(description) <= 500),
    status TEXT NOT NULL DEFAULT 'planned'
        CHECK (status IN ('planned', 'in_progress', 'completed', 'overdue', 'paused')),
    priority TEXT NOT NULL CHECK (priority IN ('high', 'medium', 'low')),
    progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
    start_date TEXT,
    due_date TEXT NOT NULL,
    category TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS micro_goals (
    id TEXT PRIMARY KEY,
    goal_id TEXT NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
    title TEXT NOT NULL CHECK (length(title) <= 100),
    description TEXT CHECK (description IS NULL OR length(description) <= 200),
    is_completed INTEGER NOT NULL DEFAULT 0,
    completed_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    CHECK ((is_completed = 0) = (completed_at IS NULL))
);

CREATE INDEX IF NOT EXISTS goals_user_created ON goals (user_id, created_at);
CREATE INDEX IF NOT EXISTS micro_goals_goal_created ON micro_goals (goal_id, created_at);
"#;

const GOAL_COLUMNS: &str = "id, user_id, title, description, status, priority, progress, \
                            start_date, due_date, category, created_at, updated_at";

const MICRO_GOAL_COLUMNS: &str =
    "id, goal_id, title, description, is_completed, completed_at, created_at, updated_at";

/// SQLite stand-in for the hosted data/auth service.
#[derive(Clone)]
pub struct SqliteBackend {
    connection: DBConnection,
}

impl SqliteBackend {
    pub fn open(path: impl AsRef<Path>) -> BackendResult<SqliteBackend> {
        SqliteBackend::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> BackendResult<SqliteBackend> {
        SqliteBackend::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> BackendResult<SqliteBackend> {
        connection.execute_batch(SCHEMA)?;

        Ok(SqliteBackend {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> BackendResult<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|_| BackendError::Poisoned)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn order_clause(order: Order, prefix: &str) -> String {
    let direction = match order {
        Order::Ascending => "ASC",
        Order::Descending => "DESC",
    };
    format!(
        "ORDER BY {prefix}created_at {direction}, {prefix}rowid {direction}",
        prefix = prefix,
        direction = direction
    )
}

fn open_session(connection: &Connection, user: User) -> BackendResult<Session> {
    let access_token = Uuid::new_v4().simple().to_string();
    connection.execute(
        "INSERT INTO sessions (access_token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![access_token, user.id, Utc::now()],
    )?;

    Ok(Session { access_token, user })
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        created_at: row.get(2)?,
    })
}

fn goal_from_row(row: &Row) -> rusqlite::Result<GoalRow> {
    Ok(GoalRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        priority: row.get(5)?,
        progress: row.get(6)?,
        start_date: row.get(7)?,
        due_date: row.get(8)?,
        category: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn micro_goal_from_row(row: &Row) -> rusqlite::Result<MicroGoalRow> {
    Ok(MicroGoalRow {
        id: row.get(0)?,
        goal_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        is_completed: row.get(4)?,
        completed_at: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Collects `column = ?` assignments and their values for a dynamic UPDATE.
#[derive(Default)]
struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl Assignments {
    fn set<T: ToSql + 'static>(&mut self, column: &'static str, value: T) {
        self.columns.push(column);
        self.values.push(Box::new(value));
    }

    fn set_clause(&self) -> String {
        self.columns
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Backend for SqliteBackend {
    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let connection = self.lock()?;
        let email = normalize_email(email);

        let existing: Option<String> = connection
            .query_row("SELECT id FROM users WHERE email = ?1", params![email], |row| {
                row.get(0)
            })
            .optional()?;
        if existing.is_some() {
            return Err(BackendError::UserAlreadyExists);
        }

        let salt = Uuid::new_v4().simple().to_string();
        let user = User {
            id: new_id(),
            email,
            created_at: Utc::now(),
        };
        connection.execute(
            "INSERT INTO users (id, email, password_salt, password_hash, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.email,
                salt,
                hash_password(&salt, password),
                user.created_at
            ],
        )?;
        tracing::info!(user_id = %user.id, "user signed up");

        open_session(&connection, user)
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        let connection = self.lock()?;
        let email = normalize_email(email);

        let found = connection
            .query_row(
                "SELECT id, email, created_at, password_salt, password_hash \
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    let user = user_from_row(row)?;
                    let salt: String = row.get(3)?;
                    let hash: String = row.get(4)?;
                    Ok((user, salt, hash))
                },
            )
            .optional()?;

        match found {
            Some((user, salt, hash)) if hash_password(&salt, password) == hash => {
                open_session(&connection, user)
            }
            _ => Err(BackendError::InvalidCredentials),
        }
    }

    fn sign_out(&self, access_token: &str) -> BackendResult<()> {
        self.lock()?.execute(
            "DELETE FROM sessions WHERE access_token = ?1",
            params![access_token],
        )?;

        Ok(())
    }

    fn get_user(&self, access_token: &str) -> BackendResult<Option<User>> {
        let user = self
            .lock()?
            .query_row(
                "SELECT u.id, u.email, u.created_at FROM sessions s \
                 JOIN users u ON u.id = s.user_id WHERE s.access_token = ?1",
                params![access_token],
                user_from_row,
            )
            .optional()?;

        Ok(user)
    }

    fn select_goals(&self, user: &User, order: Order) -> BackendResult<Vec<GoalRow>> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(&format!(
            "SELECT {} FROM goals WHERE user_id = ?1 {}",
            GOAL_COLUMNS,
            order_clause(order, "")
        ))?;

        let rows = statement.query_map(params![user.id], goal_from_row)?;

        let mut goals = vec![];
        for row_result in rows {
            goals.push(row_result?);
        }

        Ok(goals)
    }

    fn insert_goal(&self, user: &User, row: NewGoalRow) -> BackendResult<GoalRow> {
        let now = Utc::now();
        let goal = GoalRow {
            id: new_id(),
            user_id: user.id.clone(),
            title: row.title,
            description: row.description,
            status: "planned".to_string(),
            priority: row.priority,
            progress: 0,
            start_date: row.start_date,
            due_date: row.due_date,
            category: row.category,
            created_at: now,
            updated_at: now,
        };

        self.lock()?.execute(
            &format!(
                "INSERT INTO goals ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                GOAL_COLUMNS
            ),
            params![
                goal.id,
                goal.user_id,
                goal.title,
                goal.description,
                goal.status,
                goal.priority,
                goal.progress,
                goal.start_date,
                goal.due_date,
                goal.category,
                goal.created_at,
                goal.updated_at,
            ],
        )?;

        Ok(goal)
    }

    fn update_goal(&self, user: &User, id: &str, patch: GoalPatch) -> BackendResult<()> {
        let mut assignments = Assignments::default();
        if let Some(title) = patch.title {
            assignments.set("title", title);
        }
        if let Some(description) = patch.description {
            assignments.set("description", description);
        }
        if let Some(category) = patch.category {
            assignments.set("category", category);
        }
        if let Some(priority) = patch.priority {
            assignments.set("priority", priority);
        }
        if let Some(start_date) = patch.start_date {
            assignments.set("start_date", start_date);
        }
        if let Some(due_date) = patch.due_date {
            assignments.set("due_date", due_date);
        }
        if let Some(status) = patch.status {
            assignments.set("status", status);
        }
        if let Some(progress) = patch.progress {
            assignments.set("progress", progress);
        }
        assignments.set("updated_at", Utc::now());

        let sql = format!(
            "UPDATE goals SET {} WHERE id = ? AND user_id = ?",
            assignments.set_clause()
        );
        let mut values = assignments.values;
        values.push(Box::new(id.to_string()));
        values.push(Box::new(user.id.clone()));

        let changed = self.lock()?.execute(&sql, params_from_iter(values.iter()))?;
        if changed == 0 {
            tracing::debug!(goal_id = id, "update matched no visible goal");
        }

        Ok(())
    }

    fn delete_goal(&self, user: &User, id: &str) -> BackendResult<()> {
        let changed = self.lock()?.execute(
            "DELETE FROM goals WHERE id = ?1 AND user_id = ?2",
            params![id, user.id],
        )?;
        if changed == 0 {
            tracing::debug!(goal_id = id, "delete matched no visible goal");
        }

        Ok(())
    }

    fn select_micro_goals(
        &self,
        user: &User,
        goal_id: &str,
        order: Order,
    ) -> BackendResult<Vec<MicroGoalRow>> {
        let connection = self.lock()?;
        let columns = MICRO_GOAL_COLUMNS
            .split(", ")
            .map(|column| format!("m.{}", column))
            .collect::<Vec<_>>()
            .join(", ");
        let mut statement = connection.prepare(&format!(
            "SELECT {} FROM micro_goals m JOIN goals g ON g.id = m.goal_id \
             WHERE m.goal_id = ?1 AND g.user_id = ?2 {}",
            columns,
            order_clause(order, "m.")
        ))?;

        let rows = statement.query_map(params![goal_id, user.id], micro_goal_from_row)?;

        let mut micro_goals = vec![];
        for row_result in rows {
            micro_goals.push(row_result?);
        }

        Ok(micro_goals)
    }

    fn insert_micro_goal(&self, user: &User, row: NewMicroGoalRow) -> BackendResult<MicroGoalRow> {
        let connection = self.lock()?;

        let owned: Option<i64> = connection
            .query_row(
                "SELECT 1 FROM goals WHERE id = ?1 AND user_id = ?2",
                params![row.goal_id, user.id],
                |r| r.get(0),
            )
            .optional()?;
        if owned.is_none() {
            return Err(BackendError::PermissionDenied {
                table: "micro_goals",
            });
        }

        let now = Utc::now();
        let micro_goal = MicroGoalRow {
            id: new_id(),
            goal_id: row.goal_id,
            title: row.title,
            description: row.description,
            is_completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        connection.execute(
            &format!(
                "INSERT INTO micro_goals ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                MICRO_GOAL_COLUMNS
            ),
            params![
                micro_goal.id,
                micro_goal.goal_id,
                micro_goal.title,
                micro_goal.description,
                micro_goal.is_completed,
                micro_goal.completed_at,
                micro_goal.created_at,
                micro_goal.updated_at,
            ],
        )?;

        Ok(micro_goal)
    }

    fn update_micro_goal(&self, user: &User, id: &str, patch: MicroGoalPatch) -> BackendResult<()> {
        let mut assignments = Assignments::default();
        if let Some(title) = patch.title {
            assignments.set("title", title);
        }
        if let Some(description) = patch.description {
            assignments.set("description", description);
        }
        if let Some(is_completed) = patch.is_completed {
            assignments.set("is_completed", is_completed);
        }
        if let Some(completed_at) = patch.completed_at {
            assignments.set("completed_at", completed_at);
        }
        assignments.set("updated_at", Utc::now());

        let sql = format!(
            "UPDATE micro_goals SET {} \
             WHERE id = ? AND goal_id IN (SELECT id FROM goals WHERE user_id = ?)",
            assignments.set_clause()
        );
        let mut values = assignments.values;
        values.push(Box::new(id.to_string()));
        values.push(Box::new(user.id.clone()));

        let changed = self.lock()?.execute(&sql, params_from_iter(values.iter()))?;
        if changed == 0 {
            tracing::debug!(micro_goal_id = id, "update matched no visible micro goal");
        }

        Ok(())
    }

    fn delete_micro_goal(&self, user: &User, id: &str) -> BackendResult<()> {
        let changed = self.lock()?.execute(
            "DELETE FROM micro_goals \
             WHERE id = ?1 AND goal_id IN (SELECT id FROM goals WHERE user_id = ?2)",
            params![id, user.id],
        )?;
        if changed == 0 {
            tracing::debug!(micro_goal_id = id, "delete matched no visible micro goal");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_goal(title: &str) -> NewGoalRow {
        NewGoalRow {
            title: title.to_string(),
            description: None,
            category: None,
            priority: "medium".to_string(),
            start_date: None,
            due_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
        }
    }

    #[test]
    fn sign_up_then_sign_in_resolves_same_user() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let signed_up = backend.sign_up("Ana@Example.com ", "secret1").unwrap();
        let signed_in = backend
            .sign_in_with_password("ana@example.com", "secret1")
            .unwrap();

        assert_eq!(signed_up.user, signed_in.user);
        assert_ne!(signed_up.access_token, signed_in.access_token);
        assert_eq!(
            backend.get_user(&signed_in.access_token).unwrap(),
            Some(signed_in.user.clone())
        );
    }

    #[test]
    fn auth_rejects_bad_input() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        backend.sign_up("ana@example.com", "secret1").unwrap();

        assert!(matches!(
            backend.sign_up("ana@example.com", "another"),
            Err(BackendError::UserAlreadyExists)
        ));
        assert!(matches!(
            backend.sign_up("bo@example.com", "123"),
            Err(BackendError::WeakPassword { min: 6 })
        ));
        assert!(matches!(
            backend.sign_in_with_password("ana@example.com", "wrong!"),
            Err(BackendError::InvalidCredentials)
        ));
        assert!(matches!(
            backend.sign_in_with_password("nobody@example.com", "secret1"),
            Err(BackendError::InvalidCredentials)
        ));
    }

    #[test]
    fn sign_out_invalidates_token() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let session = backend.sign_up("ana@example.com", "secret1").unwrap();

        backend.sign_out(&session.access_token).unwrap();

        assert_eq!(backend.get_user(&session.access_token).unwrap(), None);
    }

    #[test]
    fn goals_are_scoped_to_their_owner() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let bo = backend.sign_up("bo@example.com", "secret1").unwrap().user;

        let goal = backend.insert_goal(&ana, new_goal("Run a marathon")).unwrap();
        assert_eq!(goal.status, "planned");
        assert_eq!(goal.progress, 0);

        assert!(backend.select_goals(&bo, Order::Descending).unwrap().is_empty());

        let patch = GoalPatch {
            title: Some("Hijacked".to_string()),
            ..GoalPatch::default()
        };
        backend.update_goal(&bo, &goal.id, patch).unwrap();
        backend.delete_goal(&bo, &goal.id).unwrap();

        let goals = backend.select_goals(&ana, Order::Descending).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].title, "Run a marathon");
    }

    #[test]
    fn select_goals_honours_creation_order() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        for title in &["first", "second", "third"] {
            backend.insert_goal(&ana, new_goal(title)).unwrap();
        }

        let newest_first: Vec<String> = backend
            .select_goals(&ana, Order::Descending)
            .unwrap()
            .into_iter()
            .map(|goal| goal.title)
            .collect();
        assert_eq!(newest_first, vec!["third", "second", "first"]);
    }

    #[test]
    fn update_goal_writes_only_given_columns() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let mut row = new_goal("Read");
        row.category = Some("Education".to_string());
        let goal = backend.insert_goal(&ana, row).unwrap();

        let patch = GoalPatch {
            progress: Some(40),
            status: Some("in_progress".to_string()),
            category: Some(None),
            ..GoalPatch::default()
        };
        backend.update_goal(&ana, &goal.id, patch).unwrap();

        let updated = &backend.select_goals(&ana, Order::Descending).unwrap()[0];
        assert_eq!(updated.title, "Read");
        assert_eq!(updated.progress, 40);
        assert_eq!(updated.status, "in_progress");
        assert_eq!(updated.category, None);
        assert!(updated.updated_at >= goal.updated_at);
    }

    #[test]
    fn progress_out_of_range_is_rejected_by_storage() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let goal = backend.insert_goal(&ana, new_goal("Read")).unwrap();

        let patch = GoalPatch {
            progress: Some(101),
            ..GoalPatch::default()
        };
        assert!(matches!(
            backend.update_goal(&ana, &goal.id, patch),
            Err(BackendError::Storage(_))
        ));
    }

    #[test]
    fn micro_goals_follow_parent_ownership() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let bo = backend.sign_up("bo@example.com", "secret1").unwrap().user;
        let goal = backend.insert_goal(&ana, new_goal("Read")).unwrap();

        let denied = backend.insert_micro_goal(
            &bo,
            NewMicroGoalRow {
                goal_id: goal.id.clone(),
                title: "Sneaky".to_string(),
                description: None,
            },
        );
        assert!(matches!(
            denied,
            Err(BackendError::PermissionDenied { table: "micro_goals" })
        ));

        for title in &["Chapter 1", "Chapter 2"] {
            backend
                .insert_micro_goal(
                    &ana,
                    NewMicroGoalRow {
                        goal_id: goal.id.clone(),
                        title: title.to_string(),
                        description: None,
                    },
                )
                .unwrap();
        }

        let titles: Vec<String> = backend
            .select_micro_goals(&ana, &goal.id, Order::Ascending)
            .unwrap()
            .into_iter()
            .map(|micro_goal| micro_goal.title)
            .collect();
        assert_eq!(titles, vec!["Chapter 1", "Chapter 2"]);
        assert!(backend
            .select_micro_goals(&bo, &goal.id, Order::Ascending)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn micro_goals_cannot_be_changed_by_another_user() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let bo = backend.sign_up("bo@example.com", "secret1").unwrap().user;
        let goal = backend.insert_goal(&ana, new_goal("Read")).unwrap();
        let micro_goal = backend
            .insert_micro_goal(
                &ana,
                NewMicroGoalRow {
                    goal_id: goal.id.clone(),
                    title: "Chapter 1".to_string(),
                    description: None,
                },
            )
            .unwrap();

        let done = MicroGoalPatch {
            title: Some("Hijacked".to_string()),
            is_completed: Some(true),
            completed_at: Some(Some(Utc::now())),
            ..MicroGoalPatch::default()
        };
        backend.update_micro_goal(&bo, &micro_goal.id, done).unwrap();
        backend.delete_micro_goal(&bo, &micro_goal.id).unwrap();

        let rows = backend
            .select_micro_goals(&ana, &goal.id, Order::Ascending)
            .unwrap();
        assert_eq!(rows, vec![micro_goal]);
        assert!(!rows[0].is_completed);
        assert_eq!(rows[0].completed_at, None);
    }

    #[test]
    fn deleting_goal_cascades_to_micro_goals() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let goal = backend.insert_goal(&ana, new_goal("Read")).unwrap();
        backend
            .insert_micro_goal(
                &ana,
                NewMicroGoalRow {
                    goal_id: goal.id.clone(),
                    title: "Chapter 1".to_string(),
                    description: None,
                },
            )
            .unwrap();

        backend.delete_goal(&ana, &goal.id).unwrap();

        let remaining: i64 = backend
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM micro_goals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn completion_flag_and_timestamp_move_together() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let ana = backend.sign_up("ana@example.com", "secret1").unwrap().user;
        let goal = backend.insert_goal(&ana, new_goal("Read")).unwrap();
        let micro_goal = backend
            .insert_micro_goal(
                &ana,
                NewMicroGoalRow {
                    goal_id: goal.id.clone(),
                    title: "Chapter 1".to_string(),
                    description: None,
                },
            )
            .unwrap();

        let half_done = MicroGoalPatch {
            is_completed: Some(true),
            ..MicroGoalPatch::default()
        };
        assert!(backend
            .update_micro_goal(&ana, &micro_goal.id, half_done)
            .is_err());

        let done = MicroGoalPatch {
            is_completed: Some(true),
            completed_at: Some(Some(Utc::now())),
            ..MicroGoalPatch::default()
        };
        backend.update_micro_goal(&ana, &micro_goal.id, done).unwrap();

        let stored = &backend
            .select_micro_goals(&ana, &goal.id, Order::Ascending)
            .unwrap()[0];
        assert!(stored.is_completed);
        assert!(stored.completed_at.is_some());
    }
}
