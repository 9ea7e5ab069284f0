//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepositoryError, TaskRepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
}

/// Insert and update model for task records.
///
/// `None` due dates are written as `NULL` so that an upsert can clear them.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due timestamp.
    pub due_date: Option<DateTime<Utc>>,
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().as_str().to_owned(),
            title: task.title().to_owned(),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            created_at: task.created_at(),
            due_date: task.due_date(),
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskRepositoryError;

    fn try_from(row: TaskRow) -> TaskRepositoryResult<Self> {
        let status =
            TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
        let priority = TaskPriority::try_from(row.priority.as_str())
            .map_err(TaskRepositoryError::persistence)?;

        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from(row.id),
            title: row.title,
            status,
            priority,
            created_at: row.created_at,
            due_date: row.due_date,
        }))
    }
}
