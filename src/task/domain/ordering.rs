//! Sorting helpers for task collections.

use super::Task;
use std::cmp::Ordering;

/// Field used to order tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Due timestamp; tasks without one sort first.
    DueDate,
    /// Priority rank.
    Priority,
    /// Identifier text.
    Id,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Sorts tasks in place by `field`, breaking ties by identifier.
pub fn sort_tasks(tasks: &mut [Task], field: TaskSortField, direction: SortDirection) {
    tasks.sort_by(|left, right| {
        let ordering = compare(left, right, field).then_with(|| left.id().cmp(right.id()));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(left: &Task, right: &Task, field: TaskSortField) -> Ordering {
    match field {
        TaskSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        TaskSortField::DueDate => left.due_date().cmp(&right.due_date()),
        TaskSortField::Priority => left.priority().rank().cmp(&right.priority().rank()),
        TaskSortField::Id => Ordering::Equal,
    }
}
