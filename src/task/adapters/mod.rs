//! Adapter implementations for task ports and the UI boundary.

pub mod memory;
pub mod postgres;
pub mod presentation;
