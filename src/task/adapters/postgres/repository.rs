//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskTransaction},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for the `tasks` table. Safe to apply more than once.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
/// created.
pub fn build_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the statement fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = NewTaskRow::from(task);
        self.run_blocking(move |connection| upsert_task(connection, &row))
            .await
    }

    async fn get_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Task> {
        let lookup_id = id.clone();
        self.run_blocking(move |connection| find_task(connection, &lookup_id, false))
            .await
    }

    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(load_all).await
    }

    async fn get_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| load_by_status(connection, status))
            .await
    }

    async fn get_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| load_due_between(connection, start, end))
            .await
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let target = id.clone();
        self.run_blocking(move |connection| delete_task(connection, &target))
            .await
    }

    async fn with_tx<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let joined = tokio::task::spawn_blocking(move || -> Result<T, E> {
            let mut pooled = pool
                .get()
                .map_err(|err| E::from(TaskRepositoryError::persistence(err)))?;
            let connection: &mut PgConnection = &mut pooled;
            let outcome = connection.transaction::<T, TxFailure<E>, _>(|tx_connection| {
                let mut view = PgTaskTransaction {
                    connection: tx_connection,
                };
                work(&mut view).map_err(TxFailure::Work)
            });
            match outcome {
                Ok(value) => {
                    debug!("task transaction committed");
                    Ok(value)
                }
                Err(TxFailure::Work(err)) => {
                    debug!("task transaction rolled back");
                    Err(err)
                }
                Err(TxFailure::Database(err)) => {
                    Err(E::from(TaskRepositoryError::persistence(err)))
                }
            }
        })
        .await;
        joined.map_err(|err| E::from(TaskRepositoryError::persistence(err)))?
    }
}

/// Separates failures of the unit of work from database failures raised by
/// Diesel while beginning or committing the transaction.
enum TxFailure<E> {
    Work(E),
    Database(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TxFailure<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

/// Transactional view over a connection with an open transaction.
struct PgTaskTransaction<'conn> {
    connection: &'conn mut PgConnection,
}

impl TaskTransaction for PgTaskTransaction<'_> {
    fn save(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        upsert_task(self.connection, &NewTaskRow::from(task))
    }

    fn get_by_id(&mut self, id: &TaskId) -> TaskRepositoryResult<Task> {
        find_task(self.connection, id, true)
    }

    fn get_all(&mut self) -> TaskRepositoryResult<Vec<Task>> {
        load_all(self.connection)
    }

    fn get_by_status(&mut self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        load_by_status(self.connection, status)
    }

    fn get_due_between(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        load_due_between(self.connection, start, end)
    }

    fn delete(&mut self, id: &TaskId) -> TaskRepositoryResult<()> {
        delete_task(self.connection, id)
    }
}

fn upsert_task(connection: &mut PgConnection, row: &NewTaskRow) -> TaskRepositoryResult<()> {
    diesel::insert_into(tasks::table)
        .values(row)
        .on_conflict(tasks::id)
        .do_update()
        .set(row)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(())
}

fn find_task(
    connection: &mut PgConnection,
    id: &TaskId,
    lock_row: bool,
) -> TaskRepositoryResult<Task> {
    let query = tasks::table
        .find(id.as_str().to_owned())
        .select(TaskRow::as_select());
    let fetched = if lock_row {
        query.for_update().get_result::<TaskRow>(connection)
    } else {
        query.get_result::<TaskRow>(connection)
    };
    let row = fetched
        .optional()
        .map_err(TaskRepositoryError::persistence)?;

    row.ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
        .and_then(Task::try_from)
}

fn load_all(connection: &mut PgConnection) -> TaskRepositoryResult<Vec<Task>> {
    let rows = tasks::table
        .order((tasks::created_at.asc(), tasks::id.asc()))
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    rows.into_iter().map(Task::try_from).collect()
}

fn load_by_status(
    connection: &mut PgConnection,
    status: TaskStatus,
) -> TaskRepositoryResult<Vec<Task>> {
    let rows = tasks::table
        .filter(tasks::status.eq(status.as_str()))
        .order((tasks::created_at.asc(), tasks::id.asc()))
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    rows.into_iter().map(Task::try_from).collect()
}

fn load_due_between(
    connection: &mut PgConnection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> TaskRepositoryResult<Vec<Task>> {
    let rows = tasks::table
        .filter(tasks::due_date.ge(start))
        .filter(tasks::due_date.lt(end))
        .order((tasks::due_date.asc(), tasks::id.asc()))
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    rows.into_iter().map(Task::try_from).collect()
}

fn delete_task(connection: &mut PgConnection, id: &TaskId) -> TaskRepositoryResult<()> {
    let deleted = diesel::delete(tasks::table.find(id.as_str().to_owned()))
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if deleted == 0 {
        return Err(TaskRepositoryError::NotFound(id.clone()));
    }
    Ok(())
}
