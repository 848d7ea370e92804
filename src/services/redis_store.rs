use redis::{AsyncCommands, Client};
use std::sync::Arc;
use async_trait::async_trait;

use crate::models::{Task, User};
use crate::services::store::{AssignPatch, StoreResult, TaskFilter, TaskStore, UserStore};

// Document store over Redis: one JSON document per key, user:{id} and
// task:{id}. Filtered reads scan the keyspace and match in process.
pub struct RedisStore {
    client: Arc<Client>,
}

impl RedisStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    async fn load_all<T: serde::de::DeserializeOwned>(
        &self,
        pattern: &str,
    ) -> StoreResult<Vec<T>> {
        let mut conn = self.client.get_async_connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;

        let mut documents = Vec::with_capacity(keys.len());
        for key in keys {
            let data: Option<String> = conn.get(&key).await?;
            if let Some(data) = data {
                documents.push(serde_json::from_str(&data)?);
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl UserStore for RedisStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users: Vec<User> = self.load_all("user:*").await?;
        Ok(users.into_iter().find(|user| user.email == email))
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let data: Option<String> = conn.get(format!("user:{}", id)).await?;
        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        self.load_all("user:*").await
    }

    async fn create(&self, user: &User) -> StoreResult<()> {
        self.save(user).await
    }

    async fn save(&self, user: &User) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(format!("user:{}", user.id), serde_json::to_string(user)?)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for RedisStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Task>> {
        let mut conn = self.client.get_async_connection().await?;
        let data: Option<String> = conn.get(format!("task:{}", id)).await?;
        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn find(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks: Vec<Task> = self.load_all("task:*").await?;
        Ok(tasks.into_iter().filter(|task| filter.matches(task)).collect())
    }

    async fn create(&self, task: &Task) -> StoreResult<()> {
        self.save(task).await
    }

    async fn save(&self, task: &Task) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(format!("task:{}", task.id), serde_json::to_string(task)?)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.del::<_, ()>(format!("task:{}", id)).await?;
        Ok(())
    }

    // Each matching document is rewritten individually; a failure part-way
    // leaves earlier writes in place.
    async fn update_many(&self, filter: &TaskFilter, patch: &AssignPatch) -> StoreResult<u64> {
        let matching = self.find(filter).await?;

        let mut modified = 0u64;
        for mut task in matching {
            patch.apply(&mut task);
            self.save(&task).await?;
            modified += 1;
        }
        Ok(modified)
    }
}
