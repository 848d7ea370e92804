mod store;
mod redis_store;
mod tokens;
#[cfg(test)]
pub mod memory_store;

use std::sync::Arc;

use crate::config::Config;

pub use store::{AssignPatch, StoreError, TaskFilter, TaskStore, UserStore};
pub use redis_store::RedisStore;
pub use tokens::TokenService;

// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: TokenService,
    pub config: Config,
}
