//! Location domain entity.

/// A named place shared between users.
///
/// `name` acts as the natural key for get-or-create, but the store does not
/// enforce uniqueness on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: i32,
    pub name: String,
}

impl Location {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
