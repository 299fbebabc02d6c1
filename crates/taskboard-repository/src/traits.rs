//! Repository trait definitions.

use async_trait::async_trait;
use taskboard_core::{Interface, NewTask, NewUser, Task, TaskId, TaskboardResult, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Persists a new user and returns the store-assigned identifier.
    ///
    /// Fails with `Validation` before touching the store if the first or
    /// last name is empty.
    async fn insert(&self, user: &NewUser) -> TaskboardResult<UserId>;

    /// Finds the user matching both `username` and `password` exactly.
    ///
    /// Fails with `NotFound` if no row matches the pair.
    async fn get(&self, username: &str, password: &str) -> TaskboardResult<User>;

    /// Finds a user by ID, failing with `NotFound` if absent.
    async fn get_by_id(&self, id: UserId) -> TaskboardResult<User>;
}

/// Task repository trait.
#[async_trait]
pub trait TaskRepository: Interface + Send + Sync {
    /// Persists a new task and returns the store-assigned identifier.
    async fn insert(&self, task: &NewTask) -> TaskboardResult<TaskId>;

    /// Finds a task by ID, failing with `NotFound` if absent.
    async fn get_by_id(&self, id: TaskId) -> TaskboardResult<Task>;

    /// Returns every task; an empty table yields an empty vector.
    async fn get_all(&self) -> TaskboardResult<Vec<Task>>;
}
