//! Taskdesk: personal task management core.
//!
//! This crate provides task creation, editing, completion, deletion,
//! due-date filtering and a dashboard overview, behind storage ports with
//! in-memory and PostgreSQL adapters.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports and the UI boundary
//!
//! # Modules
//!
//! - [`task`]: Task domain, storage and use cases
//! - [`config`]: YAML and environment configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
