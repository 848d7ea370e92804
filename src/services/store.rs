use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Status, Task, User};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

// Query shape for task lookups. Clauses are AND-ed; a default filter
// matches every task.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    // Matches tasks where the user is creator or assignee
    pub participant: Option<String>,
    // Matches tasks created by exactly this user
    pub creator: Option<String>,
    pub status: Option<Status>,
    // Inclusive due-date window; tasks without a due date match the window too
    pub due_window: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TaskFilter {
    pub fn participant(user_id: &str) -> Self {
        TaskFilter {
            participant: Some(user_id.to_string()),
            ..TaskFilter::default()
        }
    }

    pub fn creator(user_id: &str) -> Self {
        TaskFilter {
            creator: Some(user_id.to_string()),
            ..TaskFilter::default()
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_due_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.due_window = Some((start, end));
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(user_id) = &self.participant {
            let is_creator = task.creator == *user_id;
            let is_assignee = task.assign_to.as_deref() == Some(user_id.as_str());
            if !is_creator && !is_assignee {
                return false;
            }
        }
        if let Some(user_id) = &self.creator {
            if task.creator != *user_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some((start, end)) = self.due_window {
            match task.due_date {
                Some(due) => {
                    if due < start || due > end {
                        return false;
                    }
                }
                // Undated tasks always fall inside the window
                None => {}
            }
        }
        true
    }
}

// Field patch applied by update_many; only assignment fields are ever
// patched in bulk.
#[derive(Debug, Clone)]
pub struct AssignPatch {
    pub assign_to: String,
    pub assigned_email: String,
}

impl AssignPatch {
    pub fn apply(&self, task: &mut Task) {
        task.assign_to = Some(self.assign_to.clone());
        task.assigned_email = Some(self.assigned_email.clone());
        task.updated_at = Utc::now();
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn create(&self, user: &User) -> StoreResult<()>;
    async fn save(&self, user: &User) -> StoreResult<()>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Task>>;
    async fn find(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;
    async fn create(&self, task: &Task) -> StoreResult<()>;
    async fn save(&self, task: &Task) -> StoreResult<()>;
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;
    // Applies the patch to every matching task, returning how many documents
    // changed. Not atomic across documents.
    async fn update_many(&self, filter: &TaskFilter, patch: &AssignPatch) -> StoreResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_task(creator: &str, assign_to: Option<&str>) -> Task {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Task {
            id: "t1".to_string(),
            title: "sample".to_string(),
            priority: crate::models::Priority::Moderate,
            status: Status::Todo,
            creator: creator.to_string(),
            assign_to: assign_to.map(|s| s.to_string()),
            assigned_email: None,
            checklist: Vec::new(),
            due_date: None,
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_participant_filter_matches_creator_and_assignee() {
        let task = sample_task("alice", Some("bob"));

        assert!(TaskFilter::participant("alice").matches(&task));
        assert!(TaskFilter::participant("bob").matches(&task));
        assert!(!TaskFilter::participant("carol").matches(&task));
    }

    #[test]
    fn test_participant_filter_with_unset_assignee() {
        let task = sample_task("alice", None);

        assert!(TaskFilter::participant("alice").matches(&task));
        assert!(!TaskFilter::participant("bob").matches(&task));
    }

    #[test]
    fn test_creator_filter_ignores_assignee() {
        let task = sample_task("alice", Some("bob"));

        assert!(TaskFilter::creator("alice").matches(&task));
        assert!(!TaskFilter::creator("bob").matches(&task));
    }

    #[test]
    fn test_due_window_includes_undated_tasks() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(1);

        let undated = sample_task("alice", None);
        assert!(TaskFilter::default().with_due_window(start, end).matches(&undated));

        let mut inside = sample_task("alice", None);
        inside.due_date = Some(start + Duration::hours(3));
        assert!(TaskFilter::default().with_due_window(start, end).matches(&inside));

        let mut outside = sample_task("alice", None);
        outside.due_date = Some(end + Duration::days(2));
        assert!(!TaskFilter::default().with_due_window(start, end).matches(&outside));
    }

    #[test]
    fn test_status_filter_combines_with_participant() {
        let mut task = sample_task("alice", None);
        task.status = Status::Done;

        let filter = TaskFilter::participant("alice").with_status(Status::Done);
        assert!(filter.matches(&task));

        let filter = TaskFilter::participant("alice").with_status(Status::Backlog);
        assert!(!filter.matches(&task));
    }
}
