//! Local HTTP surface for the equipment management system.
//!
//! The rendering layer reads the collections and dispatches mutations
//! through these routes. Structured logging (tracing) and Prometheus
//! metrics are wired in here.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use domain::{EquipmentStore, StoreConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use storage::DocumentStorage;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::metrics::MetricsState;
use routes::{AppState, SharedState};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DocumentStorage + 'static>(
    state: SharedState<S>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get::<S>))
        .with_state(Arc::new(MetricsState {
            handle: metrics_handle,
            app: state.clone(),
        }));

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/overview", get(routes::data::overview::<S>))
        .route("/export", get(routes::data::export::<S>))
        .route("/import", post(routes::data::import::<S>))
        .route(
            "/supervisors",
            get(routes::people::list_supervisors::<S>).post(routes::people::create_supervisor::<S>),
        )
        .route(
            "/supervisors/{code}",
            delete(routes::people::delete_supervisor::<S>),
        )
        .route(
            "/riders",
            get(routes::people::list_riders::<S>).post(routes::people::create_rider::<S>),
        )
        .route("/riders/import", post(routes::people::import_riders::<S>))
        .route(
            "/riders/{code}",
            get(routes::people::get_rider::<S>).delete(routes::people::delete_rider::<S>),
        )
        .route("/riders/{code}/photo", put(routes::people::set_photo::<S>))
        .route(
            "/riders/{code}/deductions",
            post(routes::people::add_deduction::<S>),
        )
        .route("/inventory", get(routes::inventory::get::<S>))
        .route("/inventory/adjust", post(routes::inventory::adjust::<S>))
        .route(
            "/orders",
            get(routes::orders::list::<S>).post(routes::orders::create::<S>),
        )
        .route("/orders/{id}/approve", post(routes::orders::approve::<S>))
        .route("/orders/{id}/reject", post(routes::orders::reject::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Loads the store from `storage` and wraps it as shared state.
pub async fn create_state<S: DocumentStorage + 'static>(
    storage: S,
    config: StoreConfig,
) -> SharedState<S> {
    let store = EquipmentStore::load(storage, config).await;
    Arc::new(AppState { store })
}
