use chrono::Utc;

use crate::backend::{Backend, BackendError, MicroGoalPatch, NewMicroGoalRow, Order, User};
use crate::data::GoalID;
use crate::goals::helpers::blank_to_none;
use crate::notify::{Notice, Notices};
use crate::reports::helpers::completion_rate;

use super::data::*;

fn too_long(label: &str, max: usize) -> Notice {
    Notice::error(
        "Invalid micro goal",
        format!("{} must be at most {} characters.", label, max),
    )
}

/// Micro-goals of a single parent goal, oldest first.
pub struct MicroGoalsHook<'a> {
    backend: &'a dyn Backend,
    user: Option<User>,
    goal_id: Option<GoalID>,
    micro_goals: Vec<MicroGoal>,
    loading: bool,
    notices: Notices,
}

impl<'a> MicroGoalsHook<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        user: Option<User>,
        goal_id: Option<GoalID>,
    ) -> MicroGoalsHook<'a> {
        MicroGoalsHook {
            backend,
            user,
            goal_id,
            micro_goals: vec![],
            loading: true,
            notices: Notices::default(),
        }
    }

    /// Creates the hook and fetches when it is bound to a goal.
    pub fn mount(
        backend: &'a dyn Backend,
        user: Option<User>,
        goal_id: Option<GoalID>,
    ) -> MicroGoalsHook<'a> {
        let mut hook = MicroGoalsHook::new(backend, user, goal_id);
        if hook.goal_id.is_some() {
            hook.fetch(None);
        }
        hook
    }

    pub fn micro_goals(&self) -> &[MicroGoal] {
        &self.micro_goals
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.peek()
    }

    pub fn progress(&self) -> MicroGoalProgress {
        let completed = self.micro_goals.iter().filter(|m| m.is_completed).count();
        let total = self.micro_goals.len();

        MicroGoalProgress {
            completed,
            total,
            percentage: completion_rate(completed, total),
        }
    }

    pub fn into_parts(mut self) -> (Vec<MicroGoal>, MicroGoalProgress, Vec<Notice>) {
        let progress = self.progress();
        let notices = self.notices.take();
        (self.micro_goals, progress, notices)
    }

    fn signed_in(&self) -> Result<&User, BackendError> {
        self.user.as_ref().ok_or(BackendError::NotAuthenticated)
    }

    pub fn fetch(&mut self, target_goal_id: Option<&str>) {
        let goal_id = match target_goal_id.or(self.goal_id.as_deref()) {
            Some(goal_id) => goal_id.to_string(),
            None => {
                self.loading = false;
                return;
            }
        };
        let user = match &self.user {
            Some(user) => user,
            None => {
                self.loading = false;
                return;
            }
        };

        match self
            .backend
            .select_micro_goals(user, &goal_id, Order::Ascending)
        {
            Ok(rows) => self.micro_goals = rows.into_iter().map(MicroGoal::from).collect(),
            Err(e) => {
                tracing::error!(error = %e, goal_id = %goal_id, "error fetching micro goals");
                self.notices.push(Notice::error(
                    "Error loading micro goals",
                    "Could not load the micro goals.",
                ));
            }
        }

        self.loading = false;
    }

    pub fn create(&mut self, goal_id: &str, data: CreateMicroGoalData) -> bool {
        let title = data.title.trim().to_string();
        if title.is_empty() {
            return false;
        }
        let description = blank_to_none(data.description.map(|d| d.trim().to_string()));

        if title.chars().count() > MAX_TITLE_CHARS {
            self.notices.push(too_long("Title", MAX_TITLE_CHARS));
            return false;
        }
        if description
            .as_ref()
            .map_or(false, |d| d.chars().count() > MAX_DESCRIPTION_CHARS)
        {
            self.notices
                .push(too_long("Description", MAX_DESCRIPTION_CHARS));
            return false;
        }

        let user = match &self.user {
            Some(user) => user,
            None => {
                self.notices.push(Notice::error(
                    "Authentication error",
                    "You need to be signed in to create micro goals.",
                ));
                return false;
            }
        };

        let row = NewMicroGoalRow {
            goal_id: goal_id.to_string(),
            title: title.clone(),
            description,
        };
        match self.backend.insert_micro_goal(user, row) {
            Ok(_) => {
                self.notices.push(Notice::info(
                    "Micro goal created!",
                    format!("\"{}\" was added.", title),
                ));
                self.fetch(Some(goal_id));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, goal_id, "error creating micro goal");
                self.notices.push(Notice::error(
                    "Error creating micro goal",
                    "Could not create the micro goal. Please try again.",
                ));
                false
            }
        }
    }

    /// Flips completion of a loaded micro-goal, stamping or clearing
    /// `completed_at` in the same write.
    pub fn toggle(&mut self, micro_goal_id: &str, target_goal_id: Option<&str>) -> bool {
        let (title, completed) = match self.micro_goals.iter().find(|m| m.id == micro_goal_id) {
            Some(micro_goal) => (micro_goal.title.clone(), !micro_goal.is_completed),
            None => return false,
        };

        let patch = MicroGoalPatch {
            is_completed: Some(completed),
            completed_at: Some(if completed { Some(Utc::now()) } else { None }),
            ..MicroGoalPatch::default()
        };
        let result = self
            .signed_in()
            .and_then(|user| self.backend.update_micro_goal(user, micro_goal_id, patch));

        match result {
            Ok(()) => {
                let notice = if completed {
                    Notice::info(
                        "Progress recorded!",
                        format!("\"{}\" was marked as completed.", title),
                    )
                } else {
                    Notice::info(
                        "Progress removed",
                        format!("\"{}\" was unmarked.", title),
                    )
                };
                self.notices.push(notice);
                self.fetch(target_goal_id);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, micro_goal_id, "error toggling micro goal");
                self.notices.push(Notice::error(
                    "Error updating progress",
                    "Could not update the progress. Please try again.",
                ));
                false
            }
        }
    }

    pub fn delete(&mut self, micro_goal_id: &str, target_goal_id: Option<&str>) -> bool {
        let result = self
            .signed_in()
            .and_then(|user| self.backend.delete_micro_goal(user, micro_goal_id));

        match result {
            Ok(()) => {
                self.notices.push(Notice::info(
                    "Micro goal deleted!",
                    "The micro goal was permanently removed.",
                ));
                self.fetch(target_goal_id);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, micro_goal_id, "error deleting micro goal");
                self.notices.push(Notice::error(
                    "Error deleting micro goal",
                    "Could not delete the micro goal. Please try again.",
                ));
                false
            }
        }
    }
}
