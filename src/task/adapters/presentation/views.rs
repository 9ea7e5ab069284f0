//! Serializable views returned to the UI shell.

use crate::task::{
    domain::{Task, TaskPriority, TaskStatus},
    services::{Dashboard, TaskList},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain-data task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Due timestamp, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: TaskPriority,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().as_str().to_owned(),
            title: task.title().to_owned(),
            status: task.status(),
            created_at: task.created_at(),
            due_date: task.due_date(),
            priority: task.priority(),
        }
    }
}

fn views(tasks: &[Task]) -> Vec<TaskView> {
    tasks.iter().map(TaskView::from).collect()
}

/// Identifier of a newly created task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTaskView {
    /// Task identifier.
    pub id: String,
}

/// Listing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListView {
    /// Selected tasks.
    pub tasks: Vec<TaskView>,
    /// Number of selected tasks.
    pub total: usize,
}

impl From<&TaskList> for TaskListView {
    fn from(list: &TaskList) -> Self {
        Self {
            tasks: views(&list.tasks),
            total: list.total,
        }
    }
}

/// Dashboard overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Number of active tasks.
    pub active_count: usize,
    /// Number of completed tasks.
    pub completed_count: usize,
    /// Number of overdue tasks.
    pub overdue_count: usize,
    /// Tasks due today.
    pub due_today: Vec<TaskView>,
    /// Tasks due this week.
    pub due_this_week: Vec<TaskView>,
    /// Most recently created active tasks.
    pub recent_tasks: Vec<TaskView>,
}

impl From<&Dashboard> for DashboardView {
    fn from(dashboard: &Dashboard) -> Self {
        Self {
            active_count: dashboard.active_count,
            completed_count: dashboard.completed_count,
            overdue_count: dashboard.overdue_count,
            due_today: views(&dashboard.due_today),
            due_this_week: views(&dashboard.due_this_week),
            recent_tasks: views(&dashboard.recent_tasks),
        }
    }
}
