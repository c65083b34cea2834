use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::*;

/// In-memory backend that counts calls and can be switched into failure.
pub struct RecordingBackend {
    inner: SqliteBackend,
    reads: AtomicUsize,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingBackend {
    pub fn new() -> RecordingBackend {
        RecordingBackend {
            inner: SqliteBackend::open_in_memory().unwrap(),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn user(&self, email: &str) -> User {
        self.inner.sign_up(email, "secret1").unwrap().user
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_next_calls(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn read(&self) -> BackendResult<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()
    }

    fn write(&self) -> BackendResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()
    }

    fn check(&self) -> BackendResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BackendError::Storage(rusqlite::Error::InvalidQuery))
        } else {
            Ok(())
        }
    }
}

impl Backend for RecordingBackend {
    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.check()?;
        self.inner.sign_up(email, password)
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.check()?;
        self.inner.sign_in_with_password(email, password)
    }

    fn sign_out(&self, access_token: &str) -> BackendResult<()> {
        self.check()?;
        self.inner.sign_out(access_token)
    }

    fn get_user(&self, access_token: &str) -> BackendResult<Option<User>> {
        self.check()?;
        self.inner.get_user(access_token)
    }

    fn select_goals(&self, user: &User, order: Order) -> BackendResult<Vec<GoalRow>> {
        self.read()?;
        self.inner.select_goals(user, order)
    }

    fn insert_goal(&self, user: &User, row: NewGoalRow) -> BackendResult<GoalRow> {
        self.write()?;
        self.inner.insert_goal(user, row)
    }

    fn update_goal(&self, user: &User, id: &str, patch: GoalPatch) -> BackendResult<()> {
        self.write()?;
        self.inner.update_goal(user, id, patch)
    }

    fn delete_goal(&self, user: &User, id: &str) -> BackendResult<()> {
        self.write()?;
        self.inner.delete_goal(user, id)
    }

    fn select_micro_goals(
        &self,
        user: &User,
        goal_id: &str,
        order: Order,
    ) -> BackendResult<Vec<MicroGoalRow>> {
        self.read()?;
        self.inner.select_micro_goals(user, goal_id, order)
    }

    fn insert_micro_goal(&self, user: &User, row: NewMicroGoalRow) -> BackendResult<MicroGoalRow> {
        self.write()?;
        self.inner.insert_micro_goal(user, row)
    }

    fn update_micro_goal(&self, user: &User, id: &str, patch: MicroGoalPatch) -> BackendResult<()> {
        self.write()?;
        self.inner.update_micro_goal(user, id, patch)
    }

    fn delete_micro_goal(&self, user: &User, id: &str) -> BackendResult<()> {
        self.write()?;
        self.inner.delete_micro_goal(user, id)
    }
}
