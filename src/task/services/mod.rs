//! Application services for task management.

mod error;
mod lifecycle;
mod query;
mod requests;

pub use error::{TaskFailure, TaskServiceError, TaskServiceResult};
pub use lifecycle::TaskService;
pub use query::RECENT_TASK_LIMIT;
pub use requests::{
    CreateTaskRequest, Dashboard, DueDateChange, ListTasksRequest, TaskList, TaskPatch,
    UpdateTaskRequest,
};
