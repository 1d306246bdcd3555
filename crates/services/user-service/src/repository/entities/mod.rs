//! SeaORM entities.

pub mod job;
pub mod location;
pub mod user;
pub mod user_location;
