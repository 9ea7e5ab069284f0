//! Shared test helpers for `PostgreSQL` integration tests.

use super::cluster::embedded_database_url;
use crate::test_helpers::FixedClock;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use std::{env, sync::Arc, sync::OnceLock};
use taskdesk::task::{
    adapters::postgres::{CREATE_TASKS_SQL, PostgresTaskRepository, build_pool},
    domain::{Task, TaskId},
    services::TaskService,
};

/// Boxed error type for fallible tests.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming an external test database. When unset, an
/// embedded cluster is started instead.
pub const DATABASE_URL_ENV: &str = "TASKDESK_TEST_DATABASE_URL";

static SCHEMA: OnceLock<Result<(), String>> = OnceLock::new();

/// Repository and service bound to the test database.
pub struct PgContext {
    /// Repository under test.
    pub repository: Arc<PostgresTaskRepository>,
    /// Service over the repository.
    pub service: TaskService<PostgresTaskRepository, FixedClock>,
    /// Clock shared with the service.
    pub clock: Arc<FixedClock>,
}

/// Resolves the test database: the external URL when configured, otherwise
/// the embedded cluster.
///
/// # Errors
///
/// Returns an error if the embedded cluster cannot be started.
pub fn database_url() -> Result<String, BoxError> {
    match env::var(DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        _ => embedded_database_url(),
    }
}

/// Applies the task schema once per test binary.
fn apply_schema(url: &str) -> Result<(), BoxError> {
    SCHEMA
        .get_or_init(|| {
            let mut connection = PgConnection::establish(url).map_err(|err| err.to_string())?;
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(|err| err.to_string())
        })
        .clone()
        .map_err(BoxError::from)
}

/// Connects to the test database with the schema applied.
///
/// # Errors
///
/// Returns an error if no database is reachable, the schema cannot be
/// applied, or the pool cannot be built.
pub fn context() -> Result<PgContext, BoxError> {
    let url = database_url()?;
    apply_schema(&url)?;
    let pool = build_pool(&url, 4)?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let clock = Arc::new(FixedClock::default());
    let service = TaskService::new(Arc::clone(&repository), Arc::clone(&clock));
    Ok(PgContext {
        repository,
        service,
        clock,
    })
}

/// Keeps the tasks whose identifiers appear in `ids`, preserving order.
pub fn own<'a>(tasks: &'a [Task], ids: &[&TaskId]) -> Vec<&'a Task> {
    tasks.iter().filter(|task| ids.contains(&task.id())).collect()
}
