//! `PostgreSQL` integration tests for task repository operations.

use super::helpers::{BoxError, context, own};
use crate::test_helpers::reference_instant;
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use taskdesk::task::{
    domain::{Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

fn task(title: &str, priority: TaskPriority, due_in: Option<Duration>) -> Result<Task, BoxError> {
    let clock = crate::test_helpers::FixedClock::default();
    let due = due_in.map(|step| reference_instant() + step);
    Ok(Task::new(title, priority, due, &clock)?)
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn save_then_get_round_trips_every_field() -> Result<(), BoxError> {
    let ctx = context()?;
    let saved = task("Round trip", TaskPriority::High, Some(Duration::days(2)))?;

    ctx.repository.save(&saved).await?;
    let fetched = ctx.repository.get_by_id(saved.id()).await?;

    assert_eq!(fetched, saved);
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn wall_clock_task_with_nanosecond_due_date_round_trips() -> Result<(), BoxError> {
    let ctx = context()?;
    let due = Utc::now() + Duration::days(1) + Duration::nanoseconds(123_456_789);
    let saved = Task::new("Wall clock", TaskPriority::Low, Some(due), &DefaultClock)?;

    ctx.repository.save(&saved).await?;
    let fetched = ctx.repository.get_by_id(saved.id()).await?;

    assert_eq!(fetched, saved);
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn save_replaces_existing_row_and_clears_due_date() -> Result<(), BoxError> {
    let ctx = context()?;
    let mut stored = task("Before", TaskPriority::Low, Some(Duration::hours(3)))?;
    ctx.repository.save(&stored).await?;

    stored.set_title("After");
    stored.set_due_date(None);
    stored.complete()?;
    ctx.repository.save(&stored).await?;
    let fetched = ctx.repository.get_by_id(stored.id()).await?;

    assert_eq!(fetched.title(), "After");
    assert_eq!(fetched.due_date(), None);
    assert_eq!(fetched.status(), TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_reports_not_found() -> Result<(), BoxError> {
    let ctx = context()?;
    let id = TaskId::new();

    let lookup = ctx.repository.get_by_id(&id).await;
    let removal = ctx.repository.delete(&id).await;

    assert!(matches!(lookup, Err(TaskRepositoryError::NotFound(_))));
    assert!(matches!(removal, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_row() -> Result<(), BoxError> {
    let ctx = context()?;
    let doomed = task("Doomed", TaskPriority::Medium, None)?;
    ctx.repository.save(&doomed).await?;

    ctx.repository.delete(doomed.id()).await?;

    let all = ctx.repository.get_all().await?;
    assert!(own(&all, &[doomed.id()]).is_empty());
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_status_filters_rows() -> Result<(), BoxError> {
    let ctx = context()?;
    let open = task("Open", TaskPriority::Medium, None)?;
    let mut closed = task("Closed", TaskPriority::Medium, None)?;
    closed.complete()?;
    ctx.repository.save(&open).await?;
    ctx.repository.save(&closed).await?;

    let active = ctx.repository.get_by_status(TaskStatus::Active).await?;
    let completed = ctx.repository.get_by_status(TaskStatus::Completed).await?;
    let ids = [open.id(), closed.id()];

    assert_eq!(own(&active, &ids), vec![&open]);
    assert_eq!(own(&completed, &ids), vec![&closed]);
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn get_due_between_is_half_open_and_ordered() -> Result<(), BoxError> {
    let ctx = context()?;
    let start = reference_instant();
    let end = start + Duration::days(1);
    let at_start = task("at start", TaskPriority::Low, Some(Duration::zero()))?;
    let inside = task("inside", TaskPriority::Low, Some(Duration::hours(5)))?;
    let at_end = task("at end", TaskPriority::Low, Some(Duration::days(1)))?;
    let before = task("before", TaskPriority::Low, Some(Duration::seconds(-1)))?;
    for candidate in [&inside, &at_end, &before, &at_start] {
        ctx.repository.save(candidate).await?;
    }

    let due = ctx.repository.get_due_between(start, end).await?;
    let ids = [at_start.id(), inside.id(), at_end.id(), before.id()];

    assert_eq!(own(&due, &ids), vec![&at_start, &inside]);
    Ok(())
}

#[rstest]
#[ignore = "needs PostgreSQL"]
#[tokio::test(flavor = "multi_thread")]
async fn failed_transaction_rolls_back() -> Result<(), BoxError> {
    let ctx = context()?;
    let original = task("Original", TaskPriority::Medium, None)?;
    ctx.repository.save(&original).await?;
    let id = original.id().clone();

    let result = ctx
        .repository
        .with_tx(move |tx| {
            let mut staged = tx.get_by_id(&id)?;
            staged.set_title("Staged");
            tx.save(&staged)?;
            tx.delete(&TaskId::new())?;
            Ok::<(), TaskRepositoryError>(())
        })
        .await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
    let fetched = ctx.repository.get_by_id(original.id()).await?;
    assert_eq!(fetched.title(), "Original");
    Ok(())
}
