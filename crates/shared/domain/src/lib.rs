//! Domain layer - Core entities and response shapes.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! The user service maps database rows into these types and serializes
//! them back out as JSON.

pub mod constants;
pub mod location;
pub mod user;

pub use constants::*;
pub use location::Location;
pub use user::{
    DeleteResponse, NewUser, User, UserChanges, UserListItem, UserResponse, UserSummary,
};
