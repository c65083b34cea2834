use chrono::NaiveDate;

use crate::backend::{GoalPatch, NewGoalRow};
use crate::notify::Notice;

use super::data::*;

pub fn required_fields_notice() -> Notice {
    Notice::error(
        "Required fields",
        "Please fill in title, due date and priority.",
    )
}

fn invalid_goal(description: impl Into<String>) -> Notice {
    Notice::error("Invalid goal", description)
}

/// Form fields treat an empty string as "no value".
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn parse_form_date(label: &str, value: &str) -> Result<NaiveDate, Notice> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_goal(format!("{} must be a date in YYYY-MM-DD format.", label)))
}

fn parse_optional_date(label: &str, value: Option<String>) -> Result<Option<NaiveDate>, Notice> {
    match blank_to_none(value) {
        Some(v) => parse_form_date(label, &v).map(Some),
        None => Ok(None),
    }
}

fn check_length(label: &str, value: &str, max: usize) -> Result<(), Notice> {
    if value.chars().count() > max {
        Err(invalid_goal(format!(
            "{} must be at most {} characters.",
            label, max
        )))
    } else {
        Ok(())
    }
}

pub fn validate_new_goal(data: CreateGoalData) -> Result<NewGoalRow, Notice> {
    let due_date = blank_to_none(data.due_date);
    let (priority, due_date) = match (data.priority, due_date) {
        (Some(priority), Some(due_date)) if !data.title.trim().is_empty() => (priority, due_date),
        _ => return Err(required_fields_notice()),
    };

    check_length("Title", &data.title, MAX_TITLE_CHARS)?;
    let description = blank_to_none(data.description);
    if let Some(description) = &description {
        check_length("Description", description, MAX_DESCRIPTION_CHARS)?;
    }

    Ok(NewGoalRow {
        due_date: parse_form_date("Due date", &due_date)?,
        start_date: parse_optional_date("Start date", data.start_date)?,
        title: data.title,
        description,
        category: blank_to_none(data.category),
        priority: priority.as_str().to_string(),
    })
}

pub fn goal_patch(data: UpdateGoalData) -> Result<GoalPatch, Notice> {
    let mut patch = GoalPatch::default();

    if let Some(title) = data.title {
        if title.trim().is_empty() {
            return Err(invalid_goal("Title cannot be empty."));
        }
        check_length("Title", &title, MAX_TITLE_CHARS)?;
        patch.title = Some(title);
    }
    if let Some(description) = data.description {
        if let Some(description) = &description {
            check_length("Description", description, MAX_DESCRIPTION_CHARS)?;
        }
        patch.description = Some(blank_to_none(description));
    }
    if let Some(category) = data.category {
        patch.category = Some(blank_to_none(category));
    }
    if let Some(priority) = data.priority {
        patch.priority = Some(priority.as_str().to_string());
    }
    if let Some(start_date) = data.start_date {
        patch.start_date = Some(parse_optional_date("Start date", start_date)?);
    }
    if let Some(due_date) = data.due_date {
        if due_date.trim().is_empty() {
            return Err(invalid_goal("Due date cannot be empty."));
        }
        patch.due_date = Some(parse_form_date("Due date", &due_date)?);
    }
    if let Some(status) = data.status {
        patch.status = Some(status.as_str().to_string());
    }
    if let Some(progress) = data.progress {
        if !(0..=100).contains(&progress) {
            return Err(invalid_goal("Progress must be between 0 and 100."));
        }
        patch.progress = Some(progress);
    }

    Ok(patch)
}
