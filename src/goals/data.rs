use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use std::str::FromStr;

use crate::backend::GoalRow;
use crate::data::GoalID;
use crate::internal_error::InternalError;
use crate::notify::Notice;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Planned,
    InProgress,
    Completed,
    Overdue,
    Paused,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Planned => "planned",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Overdue => "overdue",
            GoalStatus::Paused => "paused",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(GoalStatus::Planned),
            "in_progress" => Ok(GoalStatus::InProgress),
            "completed" => Ok(GoalStatus::Completed),
            "overdue" => Ok(GoalStatus::Overdue),
            "paused" => Ok(GoalStatus::Paused),
            other => Err(InternalError::from(format!("unknown goal status {:?}", other))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    High,
    Medium,
    Low,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::High => "high",
            GoalPriority::Medium => "medium",
            GoalPriority::Low => "low",
        }
    }
}

impl FromStr for GoalPriority {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(GoalPriority::High),
            "medium" => Ok(GoalPriority::Medium),
            "low" => Ok(GoalPriority::Low),
            other => Err(InternalError::from(format!("unknown goal priority {:?}", other))),
        }
    }
}

/// View model handed to callers; dates use the dashboard's camelCase keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: GoalID,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    pub progress: u8,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<GoalRow> for Goal {
    type Error = InternalError;

    fn try_from(row: GoalRow) -> Result<Goal, InternalError> {
        let progress = u8::try_from(row.progress)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                InternalError::from(format!("goal progress {} out of range", row.progress))
            })?;

        Ok(Goal {
            status: row.status.parse()?,
            priority: row.priority.parse()?,
            progress,
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            start_date: row.start_date,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Form input for a new goal. Dates arrive as form strings and are parsed
/// during validation, so an empty field reads as "not provided".
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateGoalData {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<GoalPriority>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

/// Reads a present key as `Some`, so an explicit `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Partial edit; absent fields are left untouched. The clearable fields tell
/// an absent key (`None`) from an explicit `null` (`Some(None)`).
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateGoalData {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    pub priority: Option<GoalPriority>,
    #[serde(
        rename = "startDate",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Option<String>>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub status: Option<GoalStatus>,
    pub progress: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetGoalRequest {
    pub goal_id: GoalID,
    pub goal: UpdateGoalData,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteGoalRequest {
    pub goal_id: GoalID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GoalsResponse {
    pub success: bool,
    pub goals: Vec<Goal>,
    pub notices: Vec<Notice>,
}
