//! Personal task management.
//!
//! Tasks carry a title, a priority, an optional due date, and an
//! active/completed status. The module follows hexagonal architecture:
//!
//! - Domain types and due-date windows in [`domain`]
//! - Port contracts in [`ports`]
//! - Storage and presentation adapters in [`adapters`]
//! - Use-case services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
