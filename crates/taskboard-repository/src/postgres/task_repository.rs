//! PostgreSQL task repository implementation.

use crate::store::{Record, SqlStore, SqlValue, StoreError};
use crate::traits::TaskRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use taskboard_core::{NewTask, Task, TaskId, TaskboardResult};
use tracing::debug;

const INSERT_TASK: &str =
    "INSERT INTO tasks (title, description, completed) VALUES ($1, $2, $3) RETURNING id";

const SELECT_TASK_BY_ID: &str = "SELECT id, title, description, completed FROM tasks WHERE id = $1";

const SELECT_ALL_TASKS: &str = "SELECT id, title, description, completed FROM tasks ORDER BY id";

/// PostgreSQL task repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = TaskRepository)]
pub struct PgTaskRepository {
    #[shaku(inject)]
    store: Arc<dyn SqlStore>,
}

impl PgTaskRepository {
    /// Creates a new PostgreSQL task repository.
    #[must_use]
    pub fn new(store: Arc<dyn SqlStore>) -> Self {
        Self { store }
    }
}

impl TryFrom<Record> for Task {
    type Error = StoreError;

    fn try_from(row: Record) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId::new(row.get("id")?),
            title: row.get("title")?,
            description: row.get("description")?,
            completed: row.get("completed")?,
        })
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskboardResult<TaskId> {
        debug!("Inserting task: {}", task.title);

        let params = [
            SqlValue::from(task.title.as_str()),
            SqlValue::from(task.description.as_str()),
            SqlValue::from(task.completed),
        ];

        let row = self
            .store
            .fetch_one(INSERT_TASK, &params)
            .await
            .map_err(|e| e.into_insert_error("tasks"))?;

        Ok(TaskId::new(row.get("id")?))
    }

    async fn get_by_id(&self, id: TaskId) -> TaskboardResult<Task> {
        debug!("Finding task by id: {}", id);

        let row = self
            .store
            .fetch_one(SELECT_TASK_BY_ID, &[SqlValue::from(id.into_inner())])
            .await
            .map_err(|e| e.into_lookup_error("task", id))?;

        Ok(Task::try_from(row)?)
    }

    async fn get_all(&self) -> TaskboardResult<Vec<Task>> {
        debug!("Finding all tasks");

        let rows = self.store.fetch_all(SELECT_ALL_TASKS, &[]).await?;

        let tasks = rows
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }
}

impl std::fmt::Debug for PgTaskRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTaskRepository").finish_non_exhaustive()
    }
}
