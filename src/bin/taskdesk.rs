//! Command-line shell over the task presentation handler.
//!
//! Usage:
//!
//! ```text
//! taskdesk [--config <path>] <command> [options]
//! ```
//!
//! Every command prints its result as JSON on stdout. Storage is selected by
//! the configuration (`storage: memory | postgres`); the in-memory backend
//! only lives for the duration of one invocation.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use serde::Serialize;
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};
use taskdesk::{
    config::{self, AppConfig, ConfigError, StorageBackend},
    task::{
        adapters::{
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, build_pool},
            presentation::{HandlerError, TaskHandler},
        },
        domain::{SortDirection, TaskSortField},
        ports::{TaskRepository, TaskRepositoryError},
        services::{DueDateChange, TaskService},
    },
    telemetry::{self, TelemetryError},
};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "taskdesk", about = "Personal task management")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a task.
    Create {
        /// Task title.
        title: String,
        /// Priority: low, medium or high.
        #[arg(long)]
        priority: Option<String>,
        /// Due timestamp (RFC 3339).
        #[arg(long, value_parser = parse_timestamp)]
        due: Option<DateTime<Utc>>,
    },
    /// Update fields of a task.
    Update {
        /// Task identifier.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New status: active or completed.
        #[arg(long)]
        status: Option<String>,
        /// New priority.
        #[arg(long)]
        priority: Option<String>,
        /// New due timestamp (RFC 3339).
        #[arg(long, value_parser = parse_timestamp, conflicts_with = "clear_due")]
        due: Option<DateTime<Utc>>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
    },
    /// Mark a task as completed.
    Complete {
        /// Task identifier.
        id: String,
    },
    /// Show one task.
    Get {
        /// Task identifier.
        id: String,
    },
    /// List tasks.
    List {
        /// Status: active or completed.
        #[arg(long)]
        status: Option<String>,
        /// Priority: low, medium or high.
        #[arg(long)]
        priority: Option<String>,
        /// Due window: today, week or overdue.
        #[arg(long)]
        filter: Option<String>,
        /// Sort key.
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Sort descending.
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Show the dashboard overview.
    Dashboard,
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    Created,
    Due,
    Priority,
    Id,
}

impl From<SortKey> for TaskSortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Created => Self::CreatedAt,
            SortKey::Due => Self::DueDate,
            SortKey::Priority => Self::Priority,
            SortKey::Id => Self::Id,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("storage unavailable: {0}")]
    Storage(#[from] TaskRepositoryError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: &'a str,
}

#[derive(Serialize)]
struct Updated<'a> {
    updated: &'a str,
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|stamp| stamp.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {err}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    config::load_dotenv();
    let app_config = AppConfig::load(cli.config.as_deref())?;
    telemetry::init(&app_config.log.filter)?;

    match app_config.storage {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            execute(Arc::new(InMemoryTaskRepository::new()), cli.command).await
        }
        StorageBackend::Postgres => {
            let pool = build_pool(&app_config.database.dsn(), app_config.database.pool_size)?;
            let repository = PostgresTaskRepository::new(pool);
            repository.ensure_schema().await?;
            info!("using postgres storage");
            execute(Arc::new(repository), cli.command).await
        }
    }
}

async fn execute<R: TaskRepository>(repository: Arc<R>, command: Command) -> Result<(), CliError> {
    let handler = TaskHandler::new(TaskService::new(repository, Arc::new(DefaultClock)));
    match command {
        Command::Create {
            title,
            priority,
            due,
        } => emit(
            &handler
                .create_task(&title, priority.as_deref(), due)
                .await?,
        ),
        Command::Update {
            id,
            title,
            status,
            priority,
            due,
            clear_due,
        } => {
            let due_change = match (due, clear_due) {
                (_, true) => DueDateChange::Clear,
                (Some(at), false) => DueDateChange::Set(at),
                (None, false) => DueDateChange::Keep,
            };
            handler
                .update_task(
                    &id,
                    title.as_deref(),
                    status.as_deref(),
                    priority.as_deref(),
                    due_change,
                )
                .await?;
            emit(&Updated { updated: &id })
        }
        Command::Complete { id } => {
            handler.complete_task(&id).await?;
            emit(&handler.get_task(&id).await?)
        }
        Command::Get { id } => emit(&handler.get_task(&id).await?),
        Command::List {
            status,
            priority,
            filter,
            sort,
            desc,
        } => {
            let list = match sort {
                Some(key) => {
                    let direction = if desc {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    };
                    handler
                        .list_tasks_sorted(
                            status.as_deref(),
                            priority.as_deref(),
                            filter.as_deref(),
                            key.into(),
                            direction,
                        )
                        .await?
                }
                None => {
                    handler
                        .list_tasks(status.as_deref(), priority.as_deref(), filter.as_deref())
                        .await?
                }
            };
            emit(&list)
        }
        Command::Dashboard => emit(&handler.get_dashboard().await?),
        Command::Delete { id } => {
            handler.delete_task(&id).await?;
            emit(&Deleted { deleted: &id })
        }
    }
}

fn emit<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout).map_err(serde_json::Error::io)?;
    Ok(())
}

fn report(err: &CliError) {
    let mut stderr = io::stderr().lock();
    if writeln!(stderr, "taskdesk: {err}").is_err() {
        error!(error = %err, "failed to write error report");
    }
}
