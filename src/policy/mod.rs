// Authorization and lifecycle rules for tasks. Everything in this module is
// a pure function over already-loaded data; handlers do the store traffic.
use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};
use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::models::{SharedTaskView, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Read,
    Update,
    Delete,
    Move,
    Share,
}

impl TaskAction {
    fn verb(&self) -> &'static str {
        match self {
            TaskAction::Read => "view",
            TaskAction::Update => "update",
            TaskAction::Delete => "delete",
            TaskAction::Move => "move",
            TaskAction::Share => "share",
        }
    }
}

// Ownership: the caller is the task's creator or its current assignee.
// The assignee may be unset; an unset assignee matches nobody.
pub fn is_owner(caller: &str, task: &Task) -> bool {
    task.creator == caller || task.assign_to.as_deref() == Some(caller)
}

// Decides whether the caller may perform the action on the task. Absence is
// reported before ownership, so an unauthorized caller still learns whether
// an id exists.
pub fn authorize<'t>(
    caller: &str,
    task: Option<&'t Task>,
    action: TaskAction,
) -> AppResult<&'t Task> {
    let task = task.ok_or_else(|| AppError::NotFound("Task not found!".to_string()))?;

    if is_owner(caller, task) {
        Ok(task)
    } else {
        Err(AppError::Forbidden(format!(
            "You are not authorized to {} this task",
            action.verb()
        )))
    }
}

// Membership check for incoming status values. Nothing else constrains a
// move; the workflow graph is unrestricted.
pub fn validate_status(raw: &str) -> AppResult<Status> {
    Status::parse(raw)
        .ok_or_else(|| AppError::InvalidInput("Invalid status value".to_string()))
}

// Read view handed out for a share link: ownership fields stripped.
pub fn shared_view(task: &Task) -> SharedTaskView {
    SharedTaskView {
        id: task.id.clone(),
        title: task.title.clone(),
        priority: task.priority,
        status: task.status,
        checklist: task.checklist.clone(),
        due_date: task.due_date,
        is_public: task.is_public,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

// The task id is the only secret in the link; there is no token and no
// expiry.
pub fn share_link(frontend_url: &str, task_id: &str) -> String {
    format!(
        "{}/taskshare/shared/{}",
        frontend_url.trim_end_matches('/'),
        task_id
    )
}

// Due-date filter windows. Weeks run Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWindow {
    Today,
    Week,
    Month,
}

impl DueWindow {
    pub fn parse(value: &str) -> Option<DueWindow> {
        match value {
            "today" => Some(DueWindow::Today),
            "week" => Some(DueWindow::Week),
            "month" => Some(DueWindow::Month),
            _ => None,
        }
    }

    // Inclusive UTC range for the window containing `now`.
    pub fn range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = now.date_naive();
        let day_start = |date: chrono::NaiveDate| date.and_time(NaiveTime::MIN).and_utc();

        let (start, next) = match self {
            DueWindow::Today => {
                let start = day_start(today);
                (start, start + Duration::days(1))
            }
            DueWindow::Week => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                let start = day_start(monday);
                (start, start + Duration::days(7))
            }
            DueWindow::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let next_month = first.checked_add_months(Months::new(1)).unwrap_or(first);
                (day_start(first), day_start(next_month))
            }
        };
        (start, next - Duration::milliseconds(1))
    }
}

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub status_counts: HashMap<String, u64>,
    pub priority_counts: HashMap<String, u64>,
    pub due_date_count: u64,
}

// Single pass over the caller's tasks; only values that occur show up in
// the count maps.
pub fn compute_analytics(tasks: &[Task]) -> Analytics {
    let mut analytics = Analytics::default();
    for task in tasks {
        *analytics
            .status_counts
            .entry(task.status.as_str().to_string())
            .or_insert(0) += 1;
        *analytics
            .priority_counts
            .entry(task.priority.as_str().to_string())
            .or_insert(0) += 1;
        if task.due_date.is_some() {
            analytics.due_date_count += 1;
        }
    }
    analytics
}
