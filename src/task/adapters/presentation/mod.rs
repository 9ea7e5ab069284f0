//! Presentation adapter exposing task use cases to a UI shell.

mod handler;
mod views;

pub use handler::{HandlerError, HandlerErrorKind, HandlerResult, TaskHandler};
pub use views::{CreatedTaskView, DashboardView, TaskListView, TaskView};
