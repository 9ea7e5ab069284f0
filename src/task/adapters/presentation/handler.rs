//! Method-call boundary between the UI shell and the task services.

use super::views::{CreatedTaskView, DashboardView, TaskListView, TaskView};
use crate::task::{
    domain::{SortDirection, TaskId, TaskSortField},
    ports::{TaskRepository, TaskRepositoryError},
    services::{
        CreateTaskRequest, DueDateChange, ListTasksRequest, TaskFailure, TaskService,
        TaskServiceError, UpdateTaskRequest,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad error category exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerErrorKind {
    /// Input failed validation.
    Validation,
    /// The task does not exist.
    NotFound,
    /// The task was already completed.
    AlreadyCompleted,
    /// The listing filter is unknown.
    InvalidFilter,
    /// Storage failure.
    Internal,
}

/// Error surfaced to the UI as a category and a message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct HandlerError {
    /// Error category.
    pub kind: HandlerErrorKind,
    /// Human-readable message including the failed operation.
    pub message: String,
}

impl From<TaskServiceError> for HandlerError {
    fn from(err: TaskServiceError) -> Self {
        let kind = match err.kind() {
            TaskFailure::Validation(_) => HandlerErrorKind::Validation,
            TaskFailure::Domain(_) => HandlerErrorKind::AlreadyCompleted,
            TaskFailure::InvalidFilter(_) => HandlerErrorKind::InvalidFilter,
            TaskFailure::Repository(TaskRepositoryError::NotFound(_)) => {
                HandlerErrorKind::NotFound
            }
            TaskFailure::Repository(TaskRepositoryError::Persistence(_)) => {
                HandlerErrorKind::Internal
            }
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result type for handler methods.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Exposes task use cases to a UI shell.
///
/// Inputs are primitives as a UI binding would marshal them; outputs are
/// serializable views.
#[derive(Clone)]
pub struct TaskHandler<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskService<R, C>,
}

impl<R, C> TaskHandler<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a handler over the given service.
    #[must_use]
    pub const fn new(service: TaskService<R, C>) -> Self {
        Self { service }
    }

    /// Creates a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when validation or storage fails.
    pub async fn create_task(
        &self,
        title: &str,
        priority: Option<&str>,
        due_date: Option<DateTime<Utc>>,
    ) -> HandlerResult<CreatedTaskView> {
        let mut request = CreateTaskRequest::new(title);
        if let Some(name) = priority {
            request = request.with_priority(name);
        }
        if let Some(due) = due_date {
            request = request.with_due_date(due);
        }
        let task = self.service.create_task(request).await?;
        Ok(CreatedTaskView {
            id: task.id().as_str().to_owned(),
        })
    }

    /// Updates the provided fields of a task in a single write.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the task is missing, a field is invalid,
    /// or storage fails.
    pub async fn update_task(
        &self,
        id: &str,
        title: Option<&str>,
        status: Option<&str>,
        priority: Option<&str>,
        due_date: DueDateChange,
    ) -> HandlerResult<()> {
        let mut request = UpdateTaskRequest::new(id).with_due_date_change(due_date);
        if let Some(value) = title {
            request = request.with_title(value);
        }
        if let Some(value) = status {
            request = request.with_status(value);
        }
        if let Some(value) = priority {
            request = request.with_priority(value);
        }
        self.service.update_task(request).await?;
        Ok(())
    }

    /// Removes the due date of a task.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the task is missing or storage fails.
    pub async fn clear_due_date(&self, id: &str) -> HandlerResult<()> {
        self.service
            .update_task(UpdateTaskRequest::new(id).clearing_due_date())
            .await?;
        Ok(())
    }

    /// Marks a task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the task is missing or already
    /// completed.
    pub async fn complete_task(&self, id: &str) -> HandlerResult<()> {
        self.service.complete_task(&TaskId::from(id)).await?;
        Ok(())
    }

    /// Loads one task.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the task is missing.
    pub async fn get_task(&self, id: &str) -> HandlerResult<TaskView> {
        let task = self.service.get_task(&TaskId::from(id)).await?;
        Ok(TaskView::from(&task))
    }

    /// Lists tasks in repository order.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] for unknown filter, status or priority
    /// names, or when storage fails.
    pub async fn list_tasks(
        &self,
        status: Option<&str>,
        priority: Option<&str>,
        filter: Option<&str>,
    ) -> HandlerResult<TaskListView> {
        let request = list_request(status, priority, filter);
        let list = self.service.list_tasks(request).await?;
        Ok(TaskListView::from(&list))
    }

    /// Lists tasks in the requested order.
    ///
    /// # Errors
    ///
    /// Same as [`TaskHandler::list_tasks`].
    pub async fn list_tasks_sorted(
        &self,
        status: Option<&str>,
        priority: Option<&str>,
        filter: Option<&str>,
        field: TaskSortField,
        direction: SortDirection,
    ) -> HandlerResult<TaskListView> {
        let request = list_request(status, priority, filter).sorted_by(field, direction);
        let list = self.service.list_tasks(request).await?;
        Ok(TaskListView::from(&list))
    }

    /// Builds the dashboard overview.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when storage fails.
    pub async fn get_dashboard(&self) -> HandlerResult<DashboardView> {
        let dashboard = self.service.dashboard().await?;
        Ok(DashboardView::from(&dashboard))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the task is missing or storage fails.
    pub async fn delete_task(&self, id: &str) -> HandlerResult<()> {
        self.service.delete_task(&TaskId::from(id)).await?;
        Ok(())
    }
}

fn list_request(
    status: Option<&str>,
    priority: Option<&str>,
    filter: Option<&str>,
) -> ListTasksRequest {
    let mut request = ListTasksRequest::new();
    if let Some(value) = status {
        request = request.with_status(value);
    }
    if let Some(value) = priority {
        request = request.with_priority(value);
    }
    if let Some(value) = filter {
        request = request.with_filter(value);
    }
    request
}
