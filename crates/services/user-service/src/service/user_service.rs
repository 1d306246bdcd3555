//! User service - translates user requests into repository calls.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, User, UserChanges, UserSummary};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List all users with their published job counts
    async fn list_users(&self) -> AppResult<Vec<UserSummary>>;

    /// Create a user, then link each named location (skipped when the list
    /// is missing or empty)
    async fn create_user(
        &self,
        new_user: NewUser,
        locations: Option<Vec<String>>,
    ) -> AppResult<User>;

    /// Partially update a user.
    ///
    /// When `locations` is given, the locations currently linked to the user
    /// are deleted before the new names are linked.
    async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
        locations: Option<Vec<String>>,
    ) -> AppResult<User>;

    /// Delete a user
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Check store connectivity
    async fn check_store(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Get-or-create each location by name and link it to the user
    async fn link_locations(&self, user_id: i32, names: &[String]) -> AppResult<()> {
        for name in names {
            let location = self.repo.get_or_create_location(name).await?;
            self.repo.add_location(user_id, location.id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        self.repo.list_with_published_jobs().await
    }

    async fn create_user(
        &self,
        new_user: NewUser,
        locations: Option<Vec<String>>,
    ) -> AppResult<User> {
        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = user.id, "User created");

        match locations {
            Some(names) if !names.is_empty() => {
                self.link_locations(user.id, &names).await?;
                self.repo
                    .find_by_id(user.id)
                    .await?
                    .ok_or_else(|| AppError::internal("created user could not be reloaded"))
            }
            _ => Ok(user),
        }
    }

    async fn update_user(
        &self,
        id: i32,
        changes: UserChanges,
        locations: Option<Vec<String>>,
    ) -> AppResult<User> {
        self.repo.update(id, changes).await?;

        if let Some(names) = locations {
            self.repo.delete_linked_locations(id).await?;
            self.link_locations(id, &names).await?;
        }

        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn check_store(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
