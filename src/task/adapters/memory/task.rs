//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::task::{
    domain::{SortDirection, Task, TaskId, TaskSortField, TaskStatus, sort_tasks},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskTransaction},
};

/// Thread-safe in-memory task repository.
///
/// A single reader/writer lock guards the task map. Transactions hold the
/// write lock for their whole duration and work on a staged copy that only
/// replaces the map when the unit of work succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<TaskMap>>,
}

#[derive(Debug, Clone, Default)]
struct TaskMap {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl TaskMap {
    fn get(&self, id: &TaskId) -> TaskRepositoryResult<Task> {
        self.tasks
            .get(id)
            .cloned()
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
    }

    fn select(&self, predicate: impl Fn(&Task) -> bool, field: TaskSortField) -> Vec<Task> {
        let mut selected: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        sort_tasks(&mut selected, field, SortDirection::Ascending);
        selected
    }

    fn all(&self) -> Vec<Task> {
        self.select(|_| true, TaskSortField::CreatedAt)
    }

    fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.select(|task| task.status() == status, TaskSortField::CreatedAt)
    }

    fn due_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Task> {
        self.select(
            |task| {
                task.due_date()
                    .is_some_and(|due| start <= due && due < end)
            },
            TaskSortField::DueDate,
        )
    }

    fn upsert(&mut self, task: &Task) {
        self.tasks.insert(task.id().clone(), task.clone());
    }

    fn remove(&mut self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
    }
}

impl TaskTransaction for TaskMap {
    fn save(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        self.upsert(task);
        Ok(())
    }

    fn get_by_id(&mut self, id: &TaskId) -> TaskRepositoryResult<Task> {
        self.get(id)
    }

    fn get_all(&mut self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.all())
    }

    fn get_by_status(&mut self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.by_status(status))
    }

    fn get_due_between(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.due_between(start, end))
    }

    fn delete(&mut self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.remove(id)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.upsert(task);
        Ok(())
    }

    async fn get_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Task> {
        let state = self.state.read().map_err(lock_error)?;
        state.get(id)
    }

    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.all())
    }

    async fn get_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.by_status(status))
    }

    async fn get_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.due_between(start, end))
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.remove(id)
    }

    async fn with_tx<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskRepositoryError> + Send + 'static,
    {
        let mut state = self
            .state
            .write()
            .map_err(|err| E::from(lock_error(err)))?;
        let mut staged = state.clone();
        let outcome = work(&mut staged);
        if outcome.is_ok() {
            *state = staged;
            debug!("in-memory task transaction committed");
        } else {
            debug!("in-memory task transaction rolled back");
        }
        outcome
    }
}
