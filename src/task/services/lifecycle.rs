//! Task lifecycle use cases: create, update, complete, delete and lookup.

use super::{
    error::{OperationContext, TaskServiceError, TaskServiceResult},
    requests::{CreateTaskRequest, UpdateTaskRequest},
};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Task orchestration service.
///
/// Owns the repository and clock handles shared by every use case. Listing
/// and dashboard queries live in the sibling `query` module.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    pub(super) clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new active task.
    ///
    /// A missing or empty priority defaults to medium.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] labelled `"create task"` when validation
    /// fails, or `"save task"` when the repository rejects the write.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let priority = request.priority().context("create task")?;
        let task = Task::new(request.title(), priority, request.due_date(), &*self.clock)
            .context("create task")?;

        self.repository.save(&task).await.context("save task")?;
        info!(task_id = %task.id(), priority = %task.priority(), "task created");
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Only provided fields change. Setting the status to `active` reopens a
    /// completed task; this bypasses the one-way [`Task::complete`] rule and
    /// is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] labelled `"get task"` when the task does
    /// not exist, `"validate task"` when a field is invalid, or
    /// `"save task"` when the write fails.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let mut task = self
            .repository
            .get_by_id(request.id())
            .await
            .context("get task")?;
        let patch = request.to_patch().context("validate task")?;

        let was_completed = task.status() == TaskStatus::Completed;
        patch.apply(&mut task);
        task.validate().context("validate task")?;
        if was_completed && task.status() == TaskStatus::Active {
            warn!(task_id = %task.id(), "completed task reopened through update");
        }

        self.repository.save(&task).await.context("save task")?;
        info!(task_id = %task.id(), "task updated");
        Ok(task)
    }

    /// Completes a task inside a repository transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] labelled `"get task"` when the task does
    /// not exist, `"complete task"` when it was already completed, or
    /// `"save task"` when the write fails. Nothing is written on error.
    pub async fn complete_task(&self, id: &TaskId) -> TaskServiceResult<Task> {
        let target = id.clone();
        let task = self
            .repository
            .with_tx(move |tx| {
                let mut task = tx.get_by_id(&target).context("get task")?;
                task.complete().context("complete task")?;
                tx.save(&task).context("save task")?;
                Ok::<Task, TaskServiceError>(task)
            })
            .await?;

        info!(task_id = %task.id(), "task completed");
        Ok(task)
    }

    /// Deletes a task after checking that it exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] labelled `"get task"` when the task does
    /// not exist, or `"delete task"` when removal fails.
    pub async fn delete_task(&self, id: &TaskId) -> TaskServiceResult<()> {
        self.repository.get_by_id(id).await.context("get task")?;
        self.repository.delete(id).await.context("delete task")?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Loads a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] labelled `"get task"` when the task does
    /// not exist or the lookup fails.
    pub async fn get_task(&self, id: &TaskId) -> TaskServiceResult<Task> {
        debug!(task_id = %id, "loading task");
        self.repository.get_by_id(id).await.context("get task")
    }
}
