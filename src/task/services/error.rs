//! Service-level errors carrying the failed operation.

use crate::task::{
    domain::{InvalidFilterError, TaskDomainError, TaskValidationError},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Underlying cause of a failed task operation.
#[derive(Debug, Error)]
pub enum TaskFailure {
    /// Field validation failed.
    #[error(transparent)]
    Validation(TaskValidationError),
    /// A lifecycle rule was violated.
    #[error(transparent)]
    Domain(TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The listing filter name is unknown.
    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),
}

impl From<TaskValidationError> for TaskFailure {
    fn from(err: TaskValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<TaskDomainError> for TaskFailure {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::Validation(validation) => Self::Validation(validation),
            other @ TaskDomainError::AlreadyCompleted(_) => Self::Domain(other),
        }
    }
}

/// Error returned by task service operations.
///
/// Displays as `"<operation>: <cause>"`, e.g. `"get task: task not found: 42"`.
#[derive(Debug, Error)]
#[error("{operation}: {kind}")]
pub struct TaskServiceError {
    operation: &'static str,
    #[source]
    kind: TaskFailure,
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

impl TaskServiceError {
    /// Wraps a failure with the operation it interrupted.
    pub fn new(operation: &'static str, kind: impl Into<TaskFailure>) -> Self {
        Self {
            operation,
            kind: kind.into(),
        }
    }

    /// Returns the operation label.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Returns the underlying failure.
    #[must_use]
    pub const fn kind(&self) -> &TaskFailure {
        &self.kind
    }

    /// Consumes the error and returns the underlying failure.
    #[must_use]
    pub fn into_kind(self) -> TaskFailure {
        self.kind
    }

    /// Returns `true` when the task did not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            TaskFailure::Repository(TaskRepositoryError::NotFound(_))
        )
    }

    /// Returns `true` when the task had already been completed.
    #[must_use]
    pub const fn is_already_completed(&self) -> bool {
        matches!(
            self.kind,
            TaskFailure::Domain(TaskDomainError::AlreadyCompleted(_))
        )
    }
}

/// Raised by repositories while beginning or committing a transaction.
impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        Self::new("run transaction", err)
    }
}

/// Labels a fallible step with the operation name.
pub(crate) trait OperationContext<T> {
    fn context(self, operation: &'static str) -> TaskServiceResult<T>;
}

impl<T, E> OperationContext<T> for Result<T, E>
where
    E: Into<TaskFailure>,
{
    fn context(self, operation: &'static str) -> TaskServiceResult<T> {
        self.map_err(|err| TaskServiceError::new(operation, err))
    }
}
