use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::goals::data::Goal;
use crate::notify::Notice;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UPCOMING_WINDOW_DAYS: i64 = 7;
pub const HIGHLIGHTED_GOALS: usize = 4;
pub const RECENT_ACTIVITY: usize = 5;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total_goals: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Past due and not completed, regardless of the stored status.
    pub overdue: usize,
    pub completion_rate: u8,
    pub upcoming_deadlines: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub avg_progress: u8,
    pub completion_rate: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityStats {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub total_goals: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub completion_rate: u8,
    pub average_progress: u8,
    pub upcoming_deadlines: usize,
    pub categories: Vec<CategoryCount>,
    pub highlighted_goals: Vec<Goal>,
    pub upcoming_goals: Vec<Goal>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Report {
    pub date: NaiveDate,
    pub search: Option<String>,
    pub matching_goals: usize,
    pub stats: ReportStats,
    pub categories: Vec<CategoryStats>,
    pub priorities: PriorityStats,
    pub recent_activity: Vec<Goal>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardResponse {
    pub signed_in: bool,
    pub dashboard: DashboardSummary,
    pub notices: Vec<Notice>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReportResponse {
    pub signed_in: bool,
    pub report: Report,
    pub notices: Vec<Notice>,
}
