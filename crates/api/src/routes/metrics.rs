//! Prometheus metrics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use domain::EquipmentItem;
use metrics_exporter_prometheus::PrometheusHandle;
use storage::DocumentStorage;

use super::AppState;

/// State for the metrics route: the recorder handle plus the store to sample.
pub struct MetricsState<S: DocumentStorage> {
    pub handle: PrometheusHandle,
    pub app: Arc<AppState<S>>,
}

/// GET /metrics: samples pool levels, then renders all metrics.
pub async fn get<S: DocumentStorage + 'static>(
    State(state): State<Arc<MetricsState<S>>>,
) -> impl IntoResponse {
    let pool = state.app.store.inventory().await;
    for item in EquipmentItem::ALL {
        metrics::gauge!("ems_inventory_available", "item" => item.as_str())
            .set(f64::from(pool.available(item)));
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
