use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::MicroGoalRow;
use crate::data::{GoalID, MicroGoalID};
use crate::notify::Notice;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MicroGoal {
    pub id: MicroGoalID,
    pub goal_id: GoalID,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MicroGoalRow> for MicroGoal {
    fn from(row: MicroGoalRow) -> MicroGoal {
        MicroGoal {
            id: row.id,
            goal_id: row.goal_id,
            title: row.title,
            description: row.description,
            is_completed: row.is_completed,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateMicroGoalData {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroGoalProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddMicroGoalRequest {
    pub goal_id: GoalID,
    pub micro_goal: CreateMicroGoalData,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ToggleMicroGoalRequest {
    pub micro_goal_id: MicroGoalID,
    pub goal_id: GoalID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteMicroGoalRequest {
    pub micro_goal_id: MicroGoalID,
    pub goal_id: GoalID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MicroGoalsResponse {
    pub success: bool,
    pub micro_goals: Vec<MicroGoal>,
    pub progress: MicroGoalProgress,
    pub notices: Vec<Notice>,
}
