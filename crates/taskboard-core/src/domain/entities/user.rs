//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user as read back from the store.
///
/// The password is write-only: no read path returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// Login name, used together with the password for credential lookup.
    pub username: String,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewUser {
    /// User's first name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,

    /// User's last name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,

    /// Login name.
    pub username: String,

    /// Password as supplied by the caller; stored and compared verbatim.
    #[serde(skip_serializing)]
    pub password: String,
}

impl NewUser {
    /// Creates a new user input.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the read model this input becomes once stored under `id`.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
        }
    }
}
