//! HTTP route handlers.

pub mod data;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod orders;
pub mod people;

use std::sync::Arc;

use domain::EquipmentStore;
use storage::DocumentStorage;

/// Shared application state accessible from all handlers.
pub struct AppState<S: DocumentStorage> {
    pub store: EquipmentStore<S>,
}

/// State handle passed to handlers.
pub type SharedState<S> = Arc<AppState<S>>;
