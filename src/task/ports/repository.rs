//! Repository port for task persistence and due-date lookup.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// `get_all` and `get_by_status` return tasks ordered by creation time
/// (oldest first, ties broken by identifier); `get_due_between` orders by
/// due date.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts the task or replaces the stored record with the same ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Loads a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn get_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Task>;

    /// Returns every stored task.
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks with the given status.
    async fn get_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks whose due date lies in `[start, end)`.
    async fn get_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Runs `work` against a transactional view of the repository.
    ///
    /// Writes made through the view are committed together when `work`
    /// returns `Ok`, and discarded when it returns `Err`. Nested
    /// transactions are not supported.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a persistence error
    /// (converted into `E`) when the transaction cannot begin or commit.
    async fn with_tx<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskRepositoryError> + Send + 'static;
}

/// Synchronous view of the repository inside a transaction.
///
/// Operations mirror [`TaskRepository`] and share its error contract.
pub trait TaskTransaction {
    /// Inserts or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    fn save(&mut self, task: &Task) -> TaskRepositoryResult<()>;

    /// Loads a task by identifier, locking it for the rest of the
    /// transaction where the store supports row locks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    fn get_by_id(&mut self, id: &TaskId) -> TaskRepositoryResult<Task>;

    /// Returns every stored task.
    fn get_all(&mut self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks with the given status.
    fn get_by_status(&mut self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks whose due date lies in `[start, end)`.
    fn get_due_between(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    fn delete(&mut self, id: &TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for [`TaskRepositoryError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
