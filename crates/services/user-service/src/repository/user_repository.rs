//! User repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    Statement,
};

use super::entities::job::{self, Entity as JobEntity};
use super::entities::location::{self, Entity as LocationEntity};
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::entities::user_location::{self, Entity as UserLocationEntity};
use common::{AppError, AppResult};
use domain::{Location, NewUser, User, UserChanges, UserSummary};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Each method is a single round of store calls; nothing here spans a
/// transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, with linked locations ordered by location id
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// List all users with their published job counts
    async fn list_with_published_jobs(&self) -> AppResult<Vec<UserSummary>>;

    /// Insert a new user without any locations
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Apply a partial update; `NotFound` if the user does not exist
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<()>;

    /// Delete user by ID; links and jobs cascade
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Return the location named `name`, inserting it if none exists
    async fn get_or_create_location(&self, name: &str) -> AppResult<Location>;

    /// Link a location to a user (no-op when already linked)
    async fn add_location(&self, user_id: i32, location_id: i32) -> AppResult<()>;

    /// Delete every Location row linked to the user.
    ///
    /// This removes the locations themselves, not just this user's links,
    /// so other users lose them as well. Returns the number of locations
    /// deleted.
    async fn delete_linked_locations(&self, user_id: i32) -> AppResult<u64>;

    /// Check that the store answers queries
    async fn ping(&self) -> AppResult<()>;
}

/// Row shape of the published-jobs aggregate
#[derive(Debug, FromQueryResult)]
struct PublishedAds {
    user_id: i32,
    total: i64,
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn published_ads_by_user(&self) -> AppResult<HashMap<i32, i64>> {
        let rows = JobEntity::find()
            .select_only()
            .column(job::Column::UserId)
            .column_as(Expr::col(job::Column::Id).count(), "total")
            .filter(job::Column::IsPublished.eq(true))
            .group_by(job::Column::UserId)
            .into_model::<PublishedAds>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|row| (row.user_id, row.total)).collect())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let locations = model
            .find_related(LocationEntity)
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(model.into_domain(
            locations.into_iter().map(Location::from).collect(),
        )))
    }

    async fn list_with_published_jobs(&self) -> AppResult<Vec<UserSummary>> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .find_with_related(LocationEntity)
            .all(&self.db)
            .await?;
        let ads = self.published_ads_by_user().await?;

        Ok(rows
            .into_iter()
            .map(|(model, mut locations)| {
                locations.sort_by_key(|loc| loc.id);
                let total_ads = ads.get(&model.id).copied().unwrap_or(0);
                UserSummary {
                    user: model.into_domain(locations.into_iter().map(Location::from).collect()),
                    total_ads,
                }
            })
            .collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            username: Set(new_user.username),
            password: Set(new_user.password),
            role: Set(new_user.role),
            age: Set(new_user.age),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model.into_domain(Vec::new()))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(age) = changes.age {
            active.age = Set(age);
        }

        if active.is_changed() {
            active.update(&self.db).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn get_or_create_location(&self, name: &str) -> AppResult<Location> {
        // Names are not unique in the store; the oldest match wins
        let existing = LocationEntity::find()
            .filter(location::Column::Name.eq(name))
            .order_by_asc(location::Column::Id)
            .one(&self.db)
            .await?;

        if let Some(model) = existing {
            return Ok(Location::from(model));
        }

        let model = location::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(location_id = model.id, name, "Created location");
        Ok(Location::from(model))
    }

    async fn add_location(&self, user_id: i32, location_id: i32) -> AppResult<()> {
        let linked = UserLocationEntity::find_by_id((user_id, location_id))
            .one(&self.db)
            .await?;

        if linked.is_some() {
            return Ok(());
        }

        UserLocationEntity::insert(user_location::ActiveModel {
            user_id: Set(user_id),
            location_id: Set(location_id),
        })
        .exec_without_returning(&self.db)
        .await?;

        Ok(())
    }

    async fn delete_linked_locations(&self, user_id: i32) -> AppResult<u64> {
        let location_ids: Vec<i32> = UserLocationEntity::find()
            .select_only()
            .column(user_location::Column::LocationId)
            .filter(user_location::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await?;

        if location_ids.is_empty() {
            return Ok(0);
        }

        let result = LocationEntity::delete_many()
            .filter(location::Column::Id.is_in(location_ids))
            .exec(&self.db)
            .await?;

        tracing::debug!(
            user_id,
            deleted = result.rows_affected,
            "Deleted locations linked to user"
        );
        Ok(result.rows_affected)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
