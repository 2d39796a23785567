use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{BannedTokenStore, ProjectStore, UserStore};

pub type UserStoreType = Arc<RwLock<dyn UserStore + Send + Sync>>;
pub type BannedTokenStoreType = Arc<RwLock<dyn BannedTokenStore + Send + Sync>>;
pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStoreType,
    pub banned_token_store: BannedTokenStoreType,
    pub project_store: ProjectStoreType,
}

impl AppState {
    pub fn new(
        user_store: UserStoreType,
        banned_token_store: BannedTokenStoreType,
        project_store: ProjectStoreType,
    ) -> Self {
        Self {
            user_store,
            banned_token_store,
            project_store,
        }
    }
}
