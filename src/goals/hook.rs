use crate::backend::{Backend, Order, User};
use crate::internal_error::InternalResult;
use crate::notify::{Notice, Notices};

use super::data::*;
use super::helpers::*;

fn not_signed_in(action: &str) -> Notice {
    Notice::error(
        "Authentication error",
        format!("You need to be signed in to {} goals.", action),
    )
}

/// Goal collection for one user. Every successful write is followed by a
/// full re-fetch; a failed call leaves the collection as it was.
pub struct GoalsHook<'a> {
    backend: &'a dyn Backend,
    user: Option<User>,
    goals: Vec<Goal>,
    loading: bool,
    notices: Notices,
}

impl<'a> GoalsHook<'a> {
    pub fn new(backend: &'a dyn Backend, user: Option<User>) -> GoalsHook<'a> {
        GoalsHook {
            backend,
            user,
            goals: vec![],
            loading: true,
            notices: Notices::default(),
        }
    }

    /// Creates the hook and performs the initial fetch.
    pub fn mount(backend: &'a dyn Backend, user: Option<User>) -> GoalsHook<'a> {
        let mut hook = GoalsHook::new(backend, user);
        hook.fetch();
        hook
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.peek()
    }

    pub fn into_parts(mut self) -> (Vec<Goal>, Vec<Notice>) {
        let notices = self.notices.take();
        (self.goals, notices)
    }

    fn load(&self, user: &User) -> InternalResult<Vec<Goal>> {
        let rows = self.backend.select_goals(user, Order::Descending)?;

        let mut goals = Vec::with_capacity(rows.len());
        for row in rows {
            goals.push(Goal::try_from(row)?);
        }

        Ok(goals)
    }

    pub fn fetch(&mut self) {
        let result = match &self.user {
            Some(user) => self.load(user).map(Some),
            None => Ok(None),
        };

        match result {
            Ok(Some(goals)) => self.goals = goals,
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "error fetching goals");
                self.notices.push(Notice::error(
                    "Error loading goals",
                    "Could not load your goals.",
                ));
            }
        }

        self.loading = false;
    }

    pub fn create(&mut self, data: CreateGoalData) -> bool {
        let row = match validate_new_goal(data) {
            Ok(row) => row,
            Err(notice) => {
                self.notices.push(notice);
                return false;
            }
        };

        let user = match &self.user {
            Some(user) => user,
            None => {
                self.notices.push(not_signed_in("create"));
                return false;
            }
        };

        let title = row.title.clone();
        match self.backend.insert_goal(user, row) {
            Ok(goal) => {
                tracing::info!(goal_id = %goal.id, "goal created");
                self.notices.push(Notice::info(
                    "Goal created!",
                    format!("\"{}\" was added to your goals.", title),
                ));
                self.fetch();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error creating goal");
                self.notices.push(Notice::error(
                    "Error creating goal",
                    "Could not create the goal. Please try again.",
                ));
                false
            }
        }
    }

    pub fn update(&mut self, goal_id: &str, data: UpdateGoalData) -> bool {
        let user = match &self.user {
            Some(user) => user,
            None => {
                self.notices.push(not_signed_in("edit"));
                return false;
            }
        };

        let patch = match goal_patch(data) {
            Ok(patch) => patch,
            Err(notice) => {
                self.notices.push(notice);
                return false;
            }
        };

        match self.backend.update_goal(user, goal_id, patch) {
            Ok(()) => {
                self.notices.push(Notice::info(
                    "Goal updated!",
                    "Your changes were saved.",
                ));
                self.fetch();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, goal_id, "error updating goal");
                self.notices.push(Notice::error(
                    "Error updating goal",
                    "Could not update the goal. Please try again.",
                ));
                false
            }
        }
    }

    pub fn delete(&mut self, goal_id: &str) -> bool {
        let user = match &self.user {
            Some(user) => user,
            None => {
                self.notices.push(not_signed_in("delete"));
                return false;
            }
        };

        match self.backend.delete_goal(user, goal_id) {
            Ok(()) => {
                self.notices.push(Notice::info(
                    "Goal deleted!",
                    "The goal was permanently removed.",
                ));
                self.fetch();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, goal_id, "error deleting goal");
                self.notices.push(Notice::error(
                    "Error deleting goal",
                    "Could not delete the goal. Please try again.",
                ));
                false
            }
        }
    }
}
