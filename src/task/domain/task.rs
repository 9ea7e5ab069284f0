//! Task entity and its status and priority values.

use super::{TaskDomainError, TaskId, TaskValidationError};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Fractional-second digits kept on task timestamps, matching `timestamptz`.
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Truncates `at` to [`TIMESTAMP_PRECISION`] so stored tasks compare equal
/// to the ones they were built from.
#[must_use]
pub fn truncate_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(TIMESTAMP_PRECISION)
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open.
    Active,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskValidationError::InvalidStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority, the default for new tasks.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns a rank where higher values mean more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = TaskValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskValidationError::InvalidPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due timestamp, if any.
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new active task with a fresh identifier.
    ///
    /// The title is trimmed before it is stored. Timestamps are truncated
    /// to microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] or
    /// [`TaskValidationError::TitleTooLong`] when the title is rejected.
    pub fn new(
        title: impl Into<String>,
        priority: TaskPriority,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: TaskId::new(),
            title: title.into().trim().to_owned(),
            status: TaskStatus::Active,
            priority,
            created_at: truncate_timestamp(clock.utc()),
            due_date: due_date.map(truncate_timestamp),
        };
        task.validate()?;
        Ok(task)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            due_date: data.due_date,
        }
    }

    /// Checks the task invariants.
    ///
    /// Status and priority are closed enums, so only the title can be
    /// invalid once a task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when the title is empty after
    /// trimming or longer than [`MAX_TITLE_LENGTH`] characters.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let length = self.title.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TaskValidationError::TitleTooLong {
                length,
                max: MAX_TITLE_LENGTH,
            });
        }
        Ok(())
    }

    /// Marks the task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyCompleted`] when the task was
    /// completed before. Completion never fires twice.
    pub fn complete(&mut self) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Completed {
            return Err(TaskDomainError::AlreadyCompleted(self.id.clone()));
        }
        self.status = TaskStatus::Completed;
        Ok(())
    }

    /// Returns `true` when the task is active and its due date has passed.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.is_overdue_at(clock.utc())
    }

    /// Returns `true` when the task is active and due strictly before `now`.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) if self.status == TaskStatus::Active => due < now,
            _ => false,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Replaces the title. Call [`Task::validate`] before persisting.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into().trim().to_owned();
    }

    /// Overwrites the status without lifecycle checks.
    ///
    /// Unlike [`Task::complete`], this can move a completed task back to
    /// active.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Sets or clears the due timestamp, truncated to microseconds.
    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date.map(truncate_timestamp);
    }
}
