//! In-memory repository implementations.
//!
//! These honour the same contracts as the PostgreSQL adapters, including
//! validation and not-found classification, so callers can be unit tested
//! without a database. Identifiers start at 1 and are never reused.

use crate::traits::{TaskRepository, UserRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use taskboard_core::{
    NewTask, NewUser, Task, TaskId, TaskboardError, TaskboardResult, User, UserId, ValidateExt,
};
use tracing::debug;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, row: T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, row);
        id
    }
}

/// In-memory [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Table<NewUser>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().rows.len()
    }

    /// Returns true if no user has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> TaskboardResult<UserId> {
        user.validate_request()?;

        let id = UserId::new(self.users.write().insert(user.clone()));
        debug!("Stored user {} in memory", id);
        Ok(id)
    }

    async fn get(&self, username: &str, password: &str) -> TaskboardResult<User> {
        self.users
            .read()
            .rows
            .iter()
            .find(|(_, u)| u.username == username && u.password == password)
            .map(|(id, u)| u.clone().into_user(UserId::new(*id)))
            .ok_or_else(|| TaskboardError::not_found("user", username))
    }

    async fn get_by_id(&self, id: UserId) -> TaskboardResult<User> {
        self.users
            .read()
            .rows
            .get(&id.into_inner())
            .map(|u| u.clone().into_user(id))
            .ok_or_else(|| TaskboardError::not_found("user", id))
    }
}

/// In-memory [`TaskRepository`].
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Table<NewTask>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskboardResult<TaskId> {
        let id = TaskId::new(self.tasks.write().insert(task.clone()));
        debug!("Stored task {} in memory", id);
        Ok(id)
    }

    async fn get_by_id(&self, id: TaskId) -> TaskboardResult<Task> {
        self.tasks
            .read()
            .rows
            .get(&id.into_inner())
            .map(|t| t.clone().into_task(id))
            .ok_or_else(|| TaskboardError::not_found("task", id))
    }

    async fn get_all(&self) -> TaskboardResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .rows
            .iter()
            .map(|(id, t)| t.clone().into_task(TaskId::new(*id)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(username: &str) -> NewUser {
        NewUser::new("first_name", "last_name", username, "password")
    }

    #[tokio::test]
    async fn test_first_insert_gets_id_one() {
        let repo = InMemoryUserRepository::new();
        let id = repo.insert(&new_user("username")).await.unwrap();
        assert_eq!(id, UserId::new(1));

        let user = repo.get_by_id(id).await.unwrap();
        assert_eq!(user.first_name, "first_name");
        assert_eq!(user.last_name, "last_name");
        assert_eq!(user.username, "username");
    }

    #[tokio::test]
    async fn test_insert_with_empty_names_stores_nothing() {
        let repo = InMemoryUserRepository::new();

        let err = repo
            .insert(&NewUser::new("", "", "username", "password"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_distinct_and_increasing() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(&new_user("a")).await.unwrap();
        let b = repo.insert(&new_user("b")).await.unwrap();
        assert!(a.is_assigned());
        assert!(b.into_inner() > a.into_inner());
    }

    #[tokio::test]
    async fn test_shared_username_inserts_twice() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .insert(&NewUser::new("a", "b", "shared", "p1"))
            .await
            .unwrap();
        let second = repo
            .insert(&NewUser::new("c", "d", "shared", "p2"))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get("shared", "p2").await.unwrap().id, second);
    }

    #[tokio::test]
    async fn test_get_requires_exact_credentials() {
        let repo = InMemoryUserRepository::new();
        let id = repo.insert(&new_user("test")).await.unwrap();

        let user = repo.get("test", "password").await.unwrap();
        assert_eq!(user.id, id);

        assert!(repo.get("test", "").await.unwrap_err().is_not_found());
        assert!(repo.get("test", "Password").await.unwrap_err().is_not_found());
        assert!(repo.get("nobody", "password").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.get_by_id(UserId::new(404)).await.unwrap_err();
        assert!(matches!(
            err,
            TaskboardError::NotFound { resource_type: "user", ref id } if id == "404"
        ));
    }

    #[tokio::test]
    async fn test_task_round_trip() {
        let repo = InMemoryTaskRepository::new();
        let mut input = NewTask::new("write report", "quarterly numbers");
        input.completed = true;

        let id = repo.insert(&input).await.unwrap();
        let task = repo.get_by_id(id).await.unwrap();

        assert_eq!(task, input.into_task(id));
    }

    #[tokio::test]
    async fn test_get_all_empty_is_ok() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_returns_every_task_in_id_order() {
        let repo = InMemoryTaskRepository::new();
        for title in ["one", "two", "three"] {
            repo.insert(&NewTask::new(title, "")).await.unwrap();
        }

        let tasks = repo.get_all().await.unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
        assert_eq!(tasks[2].id, TaskId::new(3));
    }

    #[tokio::test]
    async fn test_get_task_missing_is_not_found() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.get_by_id(TaskId::new(1)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let repo = Arc::new(InMemoryTaskRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(&NewTask::new(format!("t{i}"), "")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().into_inner());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 16);
        assert_eq!(repo.get_all().await.unwrap().len(), 16);
    }
}
