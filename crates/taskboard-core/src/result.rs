//! Result type aliases for Taskboard.

use crate::TaskboardError;

/// A specialized `Result` type for Taskboard operations.
pub type TaskboardResult<T> = Result<T, TaskboardError>;
