//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create app state with an injected service.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }

    /// Wire the SeaORM-backed repository and service onto a database.
    pub fn from_database(database: &Database) -> Self {
        let user_repo = Arc::new(UserStore::new(database.get_connection()));
        Self::new(Arc::new(UserManager::new(user_repo)))
    }
}
