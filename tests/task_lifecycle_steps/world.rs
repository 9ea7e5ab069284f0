//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::FixedClock;
use rstest::fixture;
use taskdesk::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{Dashboard, TaskList, TaskService, TaskServiceResult},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, FixedClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskWorld {
    pub service: TestTaskService,
    pub clock: Arc<FixedClock>,
    pub last_task: Option<Task>,
    pub last_create_result: Option<TaskServiceResult<Task>>,
    pub last_complete_result: Option<TaskServiceResult<Task>>,
    pub last_list_result: Option<TaskServiceResult<TaskList>>,
    pub dashboard: Option<Dashboard>,
}

impl TaskWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::default());
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&clock),
        );
        Self {
            service,
            clock,
            last_task: None,
            last_create_result: None,
            last_complete_result: None,
            last_list_result: None,
            dashboard: None,
        }
    }

    /// Returns the task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
