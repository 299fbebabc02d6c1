//! PostgreSQL user repository implementation.

use crate::store::{Record, SqlStore, SqlValue, StoreError};
use crate::traits::UserRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use taskboard_core::{NewUser, TaskboardResult, User, UserId, ValidateExt};
use tracing::debug;

const INSERT_USER: &str =
    "INSERT INTO users (first_name, last_name, username, password) VALUES ($1, $2, $3, $4) RETURNING id";

const SELECT_USER_BY_CREDENTIALS: &str =
    "SELECT id, first_name, last_name, username FROM users WHERE username = $1 AND password = $2";

const SELECT_USER_BY_ID: &str =
    "SELECT id, first_name, last_name, username FROM users WHERE id = $1";

/// PostgreSQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct PgUserRepository {
    #[shaku(inject)]
    store: Arc<dyn SqlStore>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(store: Arc<dyn SqlStore>) -> Self {
        Self { store }
    }
}

impl TryFrom<Record> for User {
    type Error = StoreError;

    fn try_from(row: Record) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.get("id")?),
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            username: row.get("username")?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &NewUser) -> TaskboardResult<UserId> {
        user.validate_request()?;
        debug!("Inserting user: {}", user.username);

        let params = [
            SqlValue::from(user.first_name.as_str()),
            SqlValue::from(user.last_name.as_str()),
            SqlValue::from(user.username.as_str()),
            SqlValue::from(user.password.as_str()),
        ];

        let row = self
            .store
            .fetch_one(INSERT_USER, &params)
            .await
            .map_err(|e| e.into_insert_error("users"))?;

        Ok(UserId::new(row.get("id")?))
    }

    async fn get(&self, username: &str, password: &str) -> TaskboardResult<User> {
        debug!("Finding user by credentials: {}", username);

        let row = self
            .store
            .fetch_one(
                SELECT_USER_BY_CREDENTIALS,
                &[SqlValue::from(username), SqlValue::from(password)],
            )
            .await
            .map_err(|e| e.into_lookup_error("user", username))?;

        Ok(User::try_from(row)?)
    }

    async fn get_by_id(&self, id: UserId) -> TaskboardResult<User> {
        debug!("Finding user by id: {}", id);

        let row = self
            .store
            .fetch_one(SELECT_USER_BY_ID, &[SqlValue::from(id.into_inner())])
            .await
            .map_err(|e| e.into_lookup_error("user", id))?;

        Ok(User::try_from(row)?)
    }
}

impl std::fmt::Debug for PgUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUserRepository").finish_non_exhaustive()
    }
}
