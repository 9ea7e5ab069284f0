//! In-memory integration tests for due-date filters and the dashboard.

use super::helpers::{Workspace, titles, workspace};
use chrono::Duration;
use mockable::Clock;
use rstest::rstest;
use taskdesk::task::{
    domain::DueWindow,
    services::{ListTasksRequest, RECENT_TASK_LIMIT},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_yields_empty_dashboard(workspace: Workspace) -> Result<(), eyre::Report> {
    let dashboard = workspace.service.dashboard().await?;

    assert_eq!(dashboard.active_count, 0);
    assert_eq!(dashboard.completed_count, 0);
    assert_eq!(dashboard.overdue_count, 0);
    assert!(dashboard.due_today.is_empty());
    assert!(dashboard.due_this_week.is_empty());
    assert!(dashboard.recent_tasks.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn three_active_one_overdue_two_completed(workspace: Workspace) -> Result<(), eyre::Report> {
    let now = workspace.now();
    workspace.create("overdue", Some(now - Duration::days(1))).await?;
    workspace.create("soon", Some(now + Duration::days(1))).await?;
    workspace.create("whenever", None).await?;
    workspace.create_completed("done", None).await?;
    workspace
        .create_completed("done late", Some(now - Duration::days(3)))
        .await?;

    let dashboard = workspace.service.dashboard().await?;

    assert_eq!(dashboard.active_count, 3);
    assert_eq!(dashboard.completed_count, 2);
    assert_eq!(dashboard.overdue_count, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_becomes_overdue_as_time_passes(workspace: Workspace) -> Result<(), eyre::Report> {
    let due = workspace.now() + Duration::hours(2);
    workspace.create("deadline", Some(due)).await?;

    let before = workspace.service.dashboard().await?;
    workspace.clock.advance(Duration::hours(3));
    let after = workspace.service.dashboard().await?;

    assert_eq!(before.overdue_count, 0);
    assert_eq!(after.overdue_count, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_lists_include_completed_tasks_in_the_window(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let today = DueWindow::today(&workspace.clock.local());
    let due = today.end() - Duration::minutes(5);
    workspace.create_completed("finished today", Some(due)).await?;
    workspace.create("open today", Some(due)).await?;

    let dashboard = workspace.service.dashboard().await?;
    let listed = workspace
        .service
        .list_tasks(ListTasksRequest::new().with_filter("today"))
        .await?;

    assert_eq!(dashboard.due_today.len(), 2);
    assert_eq!(listed.total, 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_tasks_are_newest_active_first(workspace: Workspace) -> Result<(), eyre::Report> {
    for n in 0..7 {
        workspace.create(&format!("task {n}"), None).await?;
    }
    workspace.create_completed("completed newest", None).await?;

    let dashboard = workspace.service.dashboard().await?;

    assert_eq!(dashboard.recent_tasks.len(), RECENT_TASK_LIMIT);
    assert_eq!(
        titles(&dashboard.recent_tasks),
        vec!["task 6", "task 5", "task 4", "task 3", "task 2"]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filter_takes_precedence_over_status(workspace: Workspace) -> Result<(), eyre::Report> {
    let week = DueWindow::this_week(&workspace.clock.local());
    workspace.create("this week", Some(week.start())).await?;
    workspace.create_completed("completed undated", None).await?;

    let list = workspace
        .service
        .list_tasks(
            ListTasksRequest::new()
                .with_status("completed")
                .with_filter("week"),
        )
        .await?;

    assert_eq!(titles(&list.tasks), vec!["this week"]);
    Ok(())
}
