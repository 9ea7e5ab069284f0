//! In-memory integration tests for the presentation handler.

use super::helpers::{Workspace, workspace};
use chrono::Duration;
use rstest::rstest;
use serde_json::{Value, json};
use taskdesk::task::{
    adapters::presentation::HandlerErrorKind,
    domain::{SortDirection, TaskPriority, TaskSortField, TaskStatus},
    services::DueDateChange,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handler_round_trip_uses_primitives(workspace: Workspace) -> Result<(), eyre::Report> {
    let handler = workspace.handler();
    let due = workspace.now() + Duration::days(1);

    let created = handler.create_task("Buy milk", None, Some(due)).await?;
    handler
        .update_task(&created.id, None, None, Some("high"), DueDateChange::Keep)
        .await?;
    let view = handler.get_task(&created.id).await?;

    assert_eq!(view.id, created.id);
    assert_eq!(view.title, "Buy milk");
    assert_eq!(view.priority, TaskPriority::High);
    assert_eq!(view.status, TaskStatus::Active);
    assert_eq!(view.due_date, Some(due));

    handler.clear_due_date(&created.id).await?;
    handler.complete_task(&created.id).await?;
    let finished = handler.get_task(&created.id).await?;
    assert_eq!(finished.due_date, None);
    assert_eq!(finished.status, TaskStatus::Completed);

    handler.delete_task(&created.id).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn single_update_renames_and_clears_due_date(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let handler = workspace.handler();
    let due = workspace.now() + Duration::hours(6);
    let created = handler.create_task("Draft", None, Some(due)).await?;

    handler
        .update_task(
            &created.id,
            Some("Final"),
            None,
            None,
            DueDateChange::Clear,
        )
        .await?;
    let view = handler.get_task(&created.id).await?;

    assert_eq!(view.title, "Final");
    assert_eq!(view.due_date, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_view_serializes_with_camel_case_keys(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let handler = workspace.handler();
    let created = handler.create_task("Serialize me", Some("low"), None).await?;

    let value = serde_json::to_value(handler.get_task(&created.id).await?)?;

    assert_eq!(
        value,
        json!({
            "id": created.id,
            "title": "Serialize me",
            "status": "active",
            "createdAt": "2026-03-18T12:00:00Z",
            "dueDate": null,
            "priority": "low",
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_and_list_views_use_snake_case_keys(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let handler = workspace.handler();
    handler.create_task("One", None, None).await?;

    let dashboard = serde_json::to_value(handler.get_dashboard().await?)?;
    let list = serde_json::to_value(handler.list_tasks(None, None, None).await?)?;

    for key in [
        "active_count",
        "completed_count",
        "overdue_count",
        "due_today",
        "due_this_week",
        "recent_tasks",
    ] {
        assert!(dashboard.get(key).is_some(), "missing dashboard key {key}");
    }
    assert_eq!(dashboard.get("active_count"), Some(&Value::from(1)));
    assert_eq!(list.get("total"), Some(&Value::from(1)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sorted_listing_orders_by_priority(workspace: Workspace) -> Result<(), eyre::Report> {
    let handler = workspace.handler();
    for (title, priority) in [("mid", "medium"), ("top", "high"), ("bottom", "low")] {
        handler.create_task(title, Some(priority), None).await?;
    }

    let list = handler
        .list_tasks_sorted(
            None,
            None,
            None,
            TaskSortField::Priority,
            SortDirection::Descending,
        )
        .await?;

    let order: Vec<_> = list.tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(order, vec!["top", "mid", "bottom"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_maps_to_validation_error(workspace: Workspace) {
    let err = workspace
        .handler()
        .create_task("   ", None, None)
        .await
        .expect_err("blank title should fail");

    assert_eq!(err.kind, HandlerErrorKind::Validation);
    assert_eq!(err.message, "create task: task title must not be empty");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handler_errors_carry_kind_and_operation(workspace: Workspace) {
    let handler = workspace.handler();
    let created = handler
        .create_task("Once", None, None)
        .await
        .expect("task creation should succeed");
    handler
        .complete_task(&created.id)
        .await
        .expect("first completion should succeed");

    let twice = handler
        .complete_task(&created.id)
        .await
        .expect_err("second completion should fail");
    let missing = handler
        .get_task("no-such-task")
        .await
        .expect_err("missing task should fail");
    let filter = handler
        .list_tasks(None, None, Some("someday"))
        .await
        .expect_err("unknown filter should fail");
    let status = handler
        .list_tasks(Some("paused"), None, None)
        .await
        .expect_err("unknown status should fail");

    assert_eq!(twice.kind, HandlerErrorKind::AlreadyCompleted);
    assert!(twice.message.starts_with("complete task: "));
    assert_eq!(missing.kind, HandlerErrorKind::NotFound);
    assert_eq!(missing.message, "get task: task not found: no-such-task");
    assert_eq!(filter.kind, HandlerErrorKind::InvalidFilter);
    assert_eq!(status.kind, HandlerErrorKind::Validation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handler_error_serializes_for_the_ui(workspace: Workspace) -> Result<(), eyre::Report> {
    let err = workspace
        .handler()
        .delete_task("ghost")
        .await
        .expect_err("missing task should fail");

    let value = serde_json::to_value(&err)?;

    assert_eq!(
        value,
        json!({ "kind": "not_found", "message": "get task: task not found: ghost" })
    );
    Ok(())
}
