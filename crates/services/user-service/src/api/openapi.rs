//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::user_handler::{CreateUserRequest, UpdateUserRequest};
use domain::{DeleteResponse, UserListItem, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::user_handler::list_users,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::update_user,
        crate::api::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UserListItem,
            DeleteResponse,
        )
    ),
    tags(
        (name = "Users", description = "User and location management endpoints"),
    )
)]
pub struct ApiDoc;
