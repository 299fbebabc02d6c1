//! Task entity.

use crate::TaskId;
use serde::{Deserialize, Serialize};

/// A task as stored in one row of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,

    /// Short title.
    pub title: String,

    /// Free-form description.
    pub description: String,

    /// Whether the task has been completed.
    pub completed: bool,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTask {
    /// Creates an open task.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Returns the stored task this input becomes under `id`.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_open() {
        let task = NewTask::new("write report", "quarterly numbers");
        assert!(!task.completed);
    }

    #[test]
    fn test_into_task_keeps_fields() {
        let task = NewTask::new("write report", "quarterly numbers").into_task(TaskId::new(3));
        assert_eq!(task.id, TaskId::new(3));
        assert_eq!(task.title, "write report");
        assert_eq!(task.description, "quarterly numbers");
        assert!(!task.completed);
    }

    #[test]
    fn test_completed_defaults_when_missing() {
        let task: NewTask =
            serde_json::from_str(r#"{"title":"a","description":"b"}"#).unwrap();
        assert!(!task.completed);
    }
}
