//! Order request, approval and rejection endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{EquipmentCounts, Order, OrderId, SupervisorCode};
use serde::Deserialize;
use storage::DocumentStorage;

use super::SharedState;
use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub supervisor_code: String,
    #[serde(flatten)]
    pub quantities: EquipmentCounts,
}

/// GET /orders
pub async fn list<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
) -> Json<Vec<Order>> {
    Json(state.store.orders().await)
}

/// POST /orders: raise a pending request.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .store
        .request_order(SupervisorCode::new(req.supervisor_code), req.quantities)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /orders/{id}/approve
#[tracing::instrument(skip(state))]
pub async fn approve<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state.store.approve_order(parse_order_id(&id)?).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/reject
#[tracing::instrument(skip(state))]
pub async fn reject<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state.store.reject_order(parse_order_id(&id)?).await?;
    Ok(Json(order))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id: {e}")))
}
