//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use common::AppResult;
use domain::{DeleteResponse, NewUser, UserChanges, UserListItem, UserResponse};

use crate::api::extractors::{JsonBody, PathParam};
use crate::api::AppState;

/// User creation request. Every key is optional; missing keys store null.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada")]
    pub username: Option<String>,
    /// Stored as given
    pub password: Option<String>,
    #[schema(example = "member")]
    pub role: Option<String>,
    #[schema(example = 36)]
    pub age: Option<i32>,
    /// Location names to link; ignored when empty
    pub locations: Option<Vec<String>>,
}

impl CreateUserRequest {
    fn into_parts(self) -> (NewUser, Option<Vec<String>>) {
        let new_user = NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            password: self.password,
            role: self.role,
            age: self.age,
        };
        (new_user, self.locations)
    }
}

/// Partial user update.
///
/// A present key overwrites the field, even with `null`; an absent key
/// leaves it unchanged. `locations` may not be `null`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub age: Option<Option<i32>>,
    /// Replaces the user's locations when present
    #[serde(default, deserialize_with = "present")]
    pub locations: Option<Vec<String>>,
}

impl UpdateUserRequest {
    fn into_parts(self) -> (UserChanges, Option<Vec<String>>) {
        let changes = UserChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            age: self.age,
        };
        (changes, self.locations)
    }
}

/// Marks a key as present; absent keys fall back to `None` via `serde(default)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users with their published ad counts", body = Vec<UserListItem>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserListItem>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserListItem::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let (new_user, locations) = payload.into_parts();
    let user = state.user_service.create_user(new_user, locations).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let (changes, locations) = payload.into_parts();
    let user = state
        .user_service
        .update_user(id, changes, locations)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<DeleteResponse>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(DeleteResponse::ok(id)))
}
