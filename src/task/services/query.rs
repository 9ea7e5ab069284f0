//! Listing and dashboard queries.

use super::{
    error::{OperationContext, TaskServiceResult},
    lifecycle::TaskService,
    requests::{Dashboard, ListTasksRequest, TaskList},
};
use crate::task::{
    domain::{DueFilter, DueWindow, SortDirection, Task, TaskSortField, TaskStatus, sort_tasks},
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use tracing::debug;

/// Number of active tasks shown on the dashboard.
pub const RECENT_TASK_LIMIT: usize = 5;

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Lists tasks.
    ///
    /// A due-date filter takes precedence over a status, which is not even
    /// parsed when a filter is set; with neither, all tasks are returned. A
    /// priority then narrows the selection.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError`] labelled `"list tasks"` for an
    /// unknown filter, status or priority, or `"get tasks"` when the
    /// repository fails.
    pub async fn list_tasks(&self, request: ListTasksRequest) -> TaskServiceResult<TaskList> {
        let filter = request.filter().context("list tasks")?;
        let status = match filter {
            Some(_) => None,
            None => request.status().context("list tasks")?,
        };
        let priority = request.priority().context("list tasks")?;
        debug!(?filter, ?status, ?priority, "listing tasks");

        let mut tasks = match (filter, status) {
            (Some(due), _) => self.tasks_for_filter(due).await,
            (None, Some(wanted)) => self.repository.get_by_status(wanted).await,
            (None, None) => self.repository.get_all().await,
        }
        .context("get tasks")?;

        if let Some(wanted) = priority {
            tasks.retain(|task| task.priority() == wanted);
        }
        if let Some((field, direction)) = request.sort() {
            sort_tasks(&mut tasks, field, direction);
        }
        Ok(TaskList::from(tasks))
    }

    /// Builds the dashboard overview.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError`] labelled with the query that
    /// failed.
    pub async fn dashboard(&self) -> TaskServiceResult<Dashboard> {
        let mut active = self
            .repository
            .get_by_status(TaskStatus::Active)
            .await
            .context("get active tasks")?;
        let completed = self
            .repository
            .get_by_status(TaskStatus::Completed)
            .await
            .context("get completed tasks")?;
        let due_today = self.due_today().await.context("get due today")?;
        let due_this_week = self.due_this_week().await.context("get due this week")?;
        let overdue = self.overdue().await.context("get overdue")?;

        let active_count = active.len();
        sort_tasks(
            &mut active,
            TaskSortField::CreatedAt,
            SortDirection::Descending,
        );
        active.truncate(RECENT_TASK_LIMIT);

        Ok(Dashboard {
            active_count,
            completed_count: completed.len(),
            overdue_count: overdue.len(),
            due_today,
            due_this_week,
            recent_tasks: active,
        })
    }

    async fn tasks_for_filter(&self, filter: DueFilter) -> TaskRepositoryResult<Vec<Task>> {
        match filter {
            DueFilter::Today => self.due_today().await,
            DueFilter::Week => self.due_this_week().await,
            DueFilter::Overdue => self.overdue().await,
        }
    }

    async fn due_today(&self) -> TaskRepositoryResult<Vec<Task>> {
        let window = DueWindow::today(&self.clock.local());
        self.due_within(window).await
    }

    async fn due_this_week(&self) -> TaskRepositoryResult<Vec<Task>> {
        let window = DueWindow::this_week(&self.clock.local());
        self.due_within(window).await
    }

    async fn overdue(&self) -> TaskRepositoryResult<Vec<Task>> {
        let now = self.clock.utc();
        let mut tasks = self.due_within(DueWindow::overdue(now)).await?;
        tasks.retain(|task| task.status() == TaskStatus::Active && task.is_overdue_at(now));
        Ok(tasks)
    }

    async fn due_within(&self, window: DueWindow) -> TaskRepositoryResult<Vec<Task>> {
        self.repository
            .get_due_between(window.start(), window.end())
            .await
    }
}
