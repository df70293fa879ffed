//! Shared types for the equipment management system.

pub mod types;

pub use types::{OrderId, StorageKey};
