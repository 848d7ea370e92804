use std::collections::HashMap;
use std::sync::Mutex;
use async_trait::async_trait;

use crate::models::{Task, User};
use crate::services::store::{AssignPatch, StoreResult, TaskFilter, TaskStore, UserStore};

// In-memory store used by the test suite in place of Redis.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, User>>,
    tasks: Mutex<HashMap<String, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().cloned().collect())
    }

    async fn create(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.lock().unwrap();
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.lock().unwrap();
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks.get(id).cloned())
    }

    async fn find(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks.values().filter(|task| filter.matches(task)).cloned().collect())
    }

    async fn create(&self, task: &Task) -> StoreResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn save(&self, task: &Task) -> StoreResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.remove(id);
        Ok(())
    }

    async fn update_many(&self, filter: &TaskFilter, patch: &AssignPatch) -> StoreResult<u64> {
        let mut tasks = self.tasks.lock().unwrap();
        let mut modified = 0u64;
        for task in tasks.values_mut() {
            if filter.matches(task) {
                patch.apply(task);
                modified += 1;
            }
        }
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Status};
    use chrono::Utc;

    fn task_owned_by(id: &str, creator: &str) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: format!("task {}", id),
            priority: Priority::Low,
            status: Status::Todo,
            creator: creator.to_string(),
            assign_to: None,
            assigned_email: None,
            checklist: Vec::new(),
            due_date: None,
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_update_many_counts_only_matching_tasks() {
        let store = MemoryStore::new();
        TaskStore::create(&store, &task_owned_by("t1", "alice")).await.unwrap();
        TaskStore::create(&store, &task_owned_by("t2", "alice")).await.unwrap();
        TaskStore::create(&store, &task_owned_by("t3", "bob")).await.unwrap();

        let patch = AssignPatch {
            assign_to: "carol".to_string(),
            assigned_email: "carol@example.com".to_string(),
        };
        let modified = store
            .update_many(&TaskFilter::creator("alice"), &patch)
            .await
            .unwrap();

        assert_eq!(modified, 2);
        let untouched = TaskStore::find_by_id(&store, "t3").await.unwrap().unwrap();
        assert_eq!(untouched.assign_to, None);
    }

    #[tokio::test]
    async fn test_update_many_with_no_matches_changes_nothing() {
        let store = MemoryStore::new();
        TaskStore::create(&store, &task_owned_by("t1", "alice")).await.unwrap();

        let patch = AssignPatch {
            assign_to: "carol".to_string(),
            assigned_email: "carol@example.com".to_string(),
        };
        let modified = store
            .update_many(&TaskFilter::creator("nobody"), &patch)
            .await
            .unwrap();

        assert_eq!(modified, 0);
        let task = TaskStore::find_by_id(&store, "t1").await.unwrap().unwrap();
        assert_eq!(task.assign_to, None);
    }

    #[tokio::test]
    async fn test_delete_then_find_returns_none() {
        let store = MemoryStore::new();
        TaskStore::create(&store, &task_owned_by("t1", "alice")).await.unwrap();
        store.delete_by_id("t1").await.unwrap();

        assert!(TaskStore::find_by_id(&store, "t1").await.unwrap().is_none());
    }
}
