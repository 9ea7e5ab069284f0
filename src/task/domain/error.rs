//! Error types for task validation and lifecycle rules.

use super::TaskId;
use thiserror::Error;

/// Errors returned while validating task field values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the maximum length.
    #[error("task title is {length} characters long, maximum is {max}")]
    TitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The status value is not one of the supported statuses.
    #[error("invalid task status: {0}")]
    InvalidStatus(String),

    /// The priority value is not one of the supported priorities.
    #[error("invalid task priority: {0}")]
    InvalidPriority(String),
}

/// Errors returned by task lifecycle rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Field validation failed.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The task was already completed.
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),
}

/// Error returned while parsing a due-date filter name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid filter: {0}, expected today, week or overdue")]
pub struct InvalidFilterError(pub String);
