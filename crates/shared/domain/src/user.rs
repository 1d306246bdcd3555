//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::constants::STATUS_OK;
use crate::location::Location;

/// User domain entity
///
/// Every scalar column is nullable: create accepts missing keys as null and
/// update may explicitly null a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    /// Stored exactly as submitted, never returned to clients
    pub password: Option<String>,
    pub role: Option<String>,
    pub age: Option<i32>,
    /// Linked locations in store order
    pub locations: Vec<Location>,
}

impl User {
    /// Names of the linked locations, preserving order
    pub fn location_names(&self) -> Vec<String> {
        self.locations.iter().map(|loc| loc.name.clone()).collect()
    }
}

/// User together with the number of published jobs it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user: User,
    pub total_ads: i64,
}

/// Fields for inserting a new user.
///
/// `None` means the key was missing from the request and is stored as null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub age: Option<i32>,
}

/// Partial update of a user.
///
/// Outer `None` leaves the column untouched, `Some(None)` writes null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub username: Option<Option<String>>,
    pub age: Option<Option<i32>>,
}

impl UserChanges {
    /// True when no column would be written
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.username.is_none()
            && self.age.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// User identifier
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Ada"))]
    pub first_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Lovelace"))]
    pub last_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "ada"))]
    pub username: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "member"))]
    pub role: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = 36))]
    pub age: Option<i32>,
    /// Names of the linked locations
    pub location: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let location = user.location_names();
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            role: user.role,
            age: user.age,
            location,
        }
    }
}

/// Entry of the user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserListItem {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub age: Option<i32>,
    /// Number of published jobs owned by the user
    pub total_ads: i64,
    pub location: Vec<String>,
}

impl From<UserSummary> for UserListItem {
    fn from(summary: UserSummary) -> Self {
        let UserResponse {
            id,
            first_name,
            last_name,
            username,
            role,
            age,
            location,
        } = UserResponse::from(summary.user);

        Self {
            id,
            first_name,
            last_name,
            username,
            role,
            age,
            total_ads: summary.total_ads,
            location,
        }
    }
}

/// Body returned after deleting a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteResponse {
    #[cfg_attr(feature = "openapi", schema(example = "ok"))]
    pub status: String,
    pub id: i32,
}

impl DeleteResponse {
    pub fn ok(id: i32) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            id,
        }
    }
}
