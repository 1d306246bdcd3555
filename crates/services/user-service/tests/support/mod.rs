//! Shared fixtures for store-backed tests.

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, Set};

use common::DatabaseConfig;
use domain::NewUser;
use user_service_lib::infra::Database;
use user_service_lib::repository::entities::job;
use user_service_lib::repository::UserStore;
use user_service_lib::service::UserManager;

/// Fresh in-memory SQLite database with all migrations applied.
pub async fn test_database() -> Database {
    Database::connect(&DatabaseConfig::single_connection("sqlite::memory:"))
        .await
        .expect("in-memory database")
}

pub fn store(db: &Database) -> Arc<UserStore> {
    Arc::new(UserStore::new(db.get_connection()))
}

pub fn manager(db: &Database) -> UserManager {
    UserManager::new(store(db))
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        username: Some(username.to_string()),
        password: Some("plain-text".to_string()),
        role: Some("member".to_string()),
        age: Some(36),
    }
}

pub fn names(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

pub async fn insert_job(db: &Database, user_id: i32, is_published: bool) {
    job::ActiveModel {
        name: Set(format!("job for {}", user_id)),
        user_id: Set(user_id),
        is_published: Set(is_published),
        ..Default::default()
    }
    .insert(db.connection())
    .await
    .expect("insert job");
}
