use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::goals::data::{Goal, GoalPriority, GoalStatus};

use super::data::*;

/// round(completed / total * 100), and 0 for an empty set.
pub fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u8
}

pub fn average_progress(goals: &[Goal]) -> u8 {
    if goals.is_empty() {
        return 0;
    }
    let sum: u64 = goals.iter().map(|g| u64::from(g.progress)).sum();
    (sum as f64 / goals.len() as f64).round() as u8
}

pub fn days_until_due(goal: &Goal, today: NaiveDate) -> i64 {
    (goal.due_date - today).num_days()
}

pub fn is_overdue(goal: &Goal, today: NaiveDate) -> bool {
    goal.due_date < today && goal.status != GoalStatus::Completed
}

pub fn is_upcoming(goal: &Goal, today: NaiveDate) -> bool {
    let days = days_until_due(goal, today);
    (0..=UPCOMING_WINDOW_DAYS).contains(&days) && goal.status != GoalStatus::Completed
}

/// Case-insensitive match on title, description or category. A blank
/// search keeps everything; otherwise the term is matched as typed,
/// surrounding spaces included.
pub fn filter_goals(goals: &[Goal], search: &str) -> Vec<Goal> {
    if search.trim().is_empty() {
        return goals.to_vec();
    }
    let needle = search.to_lowercase();

    let contains = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    goals
        .iter()
        .filter(|g| {
            contains(Some(g.title.as_str()))
                || contains(g.description.as_deref())
                || contains(g.category.as_deref())
        })
        .cloned()
        .collect()
}

pub fn report_stats(goals: &[Goal], today: NaiveDate) -> ReportStats {
    let count = |status: GoalStatus| goals.iter().filter(|g| g.status == status).count();
    let completed = count(GoalStatus::Completed);

    ReportStats {
        total_goals: goals.len(),
        completed,
        in_progress: count(GoalStatus::InProgress),
        overdue: goals.iter().filter(|g| is_overdue(g, today)).count(),
        completion_rate: completion_rate(completed, goals.len()),
        upcoming_deadlines: goals.iter().filter(|g| is_upcoming(g, today)).count(),
    }
}

fn category_name(goal: &Goal) -> String {
    match goal.category.as_deref() {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Per-category totals in first-seen order.
pub fn category_stats(goals: &[Goal]) -> Vec<CategoryStats> {
    #[derive(Default)]
    struct Totals {
        total: usize,
        completed: usize,
        in_progress: usize,
        progress_sum: u64,
    }

    let mut by_category: IndexMap<String, Totals> = IndexMap::new();
    for goal in goals {
        let totals = by_category.entry(category_name(goal)).or_default();
        totals.total += 1;
        totals.progress_sum += u64::from(goal.progress);
        match goal.status {
            GoalStatus::Completed => totals.completed += 1,
            GoalStatus::InProgress => totals.in_progress += 1,
            _ => {}
        }
    }

    by_category
        .into_iter()
        .map(|(name, totals)| CategoryStats {
            name,
            total: totals.total,
            completed: totals.completed,
            in_progress: totals.in_progress,
            avg_progress: (totals.progress_sum as f64 / totals.total as f64).round() as u8,
            completion_rate: completion_rate(totals.completed, totals.total),
        })
        .collect()
}

/// Goal count per category, largest first; equal counts keep first-seen order.
pub fn category_counts(goals: &[Goal]) -> Vec<CategoryCount> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for goal in goals {
        *counts.entry(category_name(goal)).or_insert(0) += 1;
    }

    let mut counts: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount { name, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn priority_stats(goals: &[Goal]) -> PriorityStats {
    let count = |priority: GoalPriority| goals.iter().filter(|g| g.priority == priority).count();

    PriorityStats {
        high: count(GoalPriority::High),
        medium: count(GoalPriority::Medium),
        low: count(GoalPriority::Low),
    }
}

pub fn upcoming_goals(goals: &[Goal], today: NaiveDate) -> Vec<Goal> {
    let mut upcoming: Vec<Goal> = goals
        .iter()
        .filter(|g| is_upcoming(g, today))
        .cloned()
        .collect();
    upcoming.sort_by_key(|g| g.due_date);
    upcoming
}

pub fn dashboard_summary(goals: &[Goal], today: NaiveDate) -> DashboardSummary {
    let stats = report_stats(goals, today);

    DashboardSummary {
        date: today,
        total_goals: stats.total_goals,
        in_progress: stats.in_progress,
        completed: stats.completed,
        completion_rate: stats.completion_rate,
        average_progress: average_progress(goals),
        upcoming_deadlines: stats.upcoming_deadlines,
        categories: category_counts(goals),
        highlighted_goals: goals.iter().take(HIGHLIGHTED_GOALS).cloned().collect(),
        upcoming_goals: upcoming_goals(goals, today),
    }
}

pub fn build_report(goals: &[Goal], search: Option<&str>, today: NaiveDate) -> Report {
    let search = search
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);
    let filtered = match &search {
        Some(term) => filter_goals(goals, term),
        None => goals.to_vec(),
    };

    Report {
        date: today,
        matching_goals: filtered.len(),
        stats: report_stats(&filtered, today),
        categories: category_stats(&filtered),
        priorities: priority_stats(&filtered),
        recent_activity: filtered.iter().take(RECENT_ACTIVITY).cloned().collect(),
        search,
    }
}
