//! Request and response payloads for task services.
//!
//! Requests carry raw text as received from the UI; the service parses and
//! validates it.

use crate::task::domain::{
    DueFilter, InvalidFilterError, SortDirection, Task, TaskId, TaskPriority, TaskSortField,
    TaskStatus, TaskValidationError,
};
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    priority: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: None,
            due_date: None,
        }
    }

    /// Sets the priority name. Empty names fall back to medium.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub(crate) fn priority(&self) -> Result<TaskPriority, TaskValidationError> {
        match self.priority.as_deref().map(str::trim) {
            None | Some("") => Ok(TaskPriority::Medium),
            Some(name) => TaskPriority::try_from(name),
        }
    }
}

/// Change applied to the due date by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueDateChange {
    /// Leave the due date untouched.
    #[default]
    Keep,
    /// Replace the due date.
    Set(DateTime<Utc>),
    /// Remove the due date.
    Clear,
}

/// Typed partial update. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// Due date change.
    pub due_date: DueDateChange,
}

impl TaskPatch {
    /// Applies the provided fields to `task`.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.set_title(title);
        }
        if let Some(status) = self.status {
            task.set_status(status);
        }
        if let Some(priority) = self.priority {
            task.set_priority(priority);
        }
        match self.due_date {
            DueDateChange::Keep => {}
            DueDateChange::Set(due) => task.set_due_date(Some(due)),
            DueDateChange::Clear => task.set_due_date(None),
        }
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due_date: DueDateChange,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing yet.
    #[must_use]
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            status: None,
            priority: None,
            due_date: DueDateChange::Keep,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the status by name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority by name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = DueDateChange::Set(due_date);
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clearing_due_date(mut self) -> Self {
        self.due_date = DueDateChange::Clear;
        self
    }

    /// Applies an explicit due date change.
    #[must_use]
    pub const fn with_due_date_change(mut self, change: DueDateChange) -> Self {
        self.due_date = change;
        self
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Parses the textual fields into a typed patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::InvalidStatus`] or
    /// [`TaskValidationError::InvalidPriority`] for unknown names.
    pub fn to_patch(&self) -> Result<TaskPatch, TaskValidationError> {
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()?;
        Ok(TaskPatch {
            title: self.title.clone(),
            status,
            priority,
            due_date: self.due_date,
        })
    }
}

/// Request payload for listing tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListTasksRequest {
    status: Option<String>,
    priority: Option<String>,
    filter: Option<String>,
    sort: Option<(TaskSortField, SortDirection)>,
}

impl ListTasksRequest {
    /// Creates a request that lists every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to a status. Ignored when a filter is set.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Keeps only tasks with the given priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Selects a due-date filter: `today`, `week` or `overdue`.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Orders the result. Without it, repository order is kept.
    #[must_use]
    pub const fn sorted_by(mut self, field: TaskSortField, direction: SortDirection) -> Self {
        self.sort = Some((field, direction));
        self
    }

    pub(crate) fn filter(&self) -> Result<Option<DueFilter>, InvalidFilterError> {
        self.filter.as_deref().map(DueFilter::try_from).transpose()
    }

    pub(crate) fn status(&self) -> Result<Option<TaskStatus>, TaskValidationError> {
        self.status.as_deref().map(TaskStatus::try_from).transpose()
    }

    pub(crate) fn priority(&self) -> Result<Option<TaskPriority>, TaskValidationError> {
        self.priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()
    }

    pub(crate) const fn sort(&self) -> Option<(TaskSortField, SortDirection)> {
        self.sort
    }
}

/// Tasks selected by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    /// Selected tasks.
    pub tasks: Vec<Task>,
    /// Number of selected tasks.
    pub total: usize,
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        let total = tasks.len();
        Self { tasks, total }
    }
}

/// Aggregate task overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Number of active tasks.
    pub active_count: usize,
    /// Number of completed tasks.
    pub completed_count: usize,
    /// Number of active tasks past their due date.
    pub overdue_count: usize,
    /// Tasks due during the current local day.
    pub due_today: Vec<Task>,
    /// Tasks due during the current week.
    pub due_this_week: Vec<Task>,
    /// Most recently created active tasks, newest first.
    pub recent_tasks: Vec<Task>,
}
