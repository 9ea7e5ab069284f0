//! Domain model for task management.
//!
//! The task domain covers the task entity, its validation and completion
//! rules, and the due-date windows used by queries. Infrastructure concerns
//! stay outside of the domain boundary.

mod error;
mod ids;
mod ordering;
mod task;
mod window;

pub use error::{InvalidFilterError, TaskDomainError, TaskValidationError};
pub use ids::TaskId;
pub use ordering::{SortDirection, TaskSortField, sort_tasks};
pub use task::{
    MAX_TITLE_LENGTH, PersistedTaskData, TIMESTAMP_PRECISION, Task, TaskPriority, TaskStatus,
    truncate_timestamp,
};
pub use window::{DueFilter, DueWindow};
