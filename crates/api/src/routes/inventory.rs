//! Inventory pool endpoints.

use axum::Json;
use axum::extract::State;
use domain::{EquipmentCounts, EquipmentItem};
use serde::{Deserialize, Serialize};
use storage::DocumentStorage;

use super::SharedState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct AdjustRequest {
    pub item: EquipmentItem,
    pub delta: i64,
}

#[derive(Serialize)]
pub struct AdjustResponse {
    pub item: EquipmentItem,
    pub available: u32,
}

/// GET /inventory
pub async fn get<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
) -> Json<EquipmentCounts> {
    Json(state.store.inventory().await.counts())
}

/// POST /inventory/adjust: manual +/- stepping; never goes below zero.
#[tracing::instrument(skip(state, req), fields(item = %req.item, delta = req.delta))]
pub async fn adjust<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Json(req): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let available = state.store.adjust_inventory(req.item, req.delta).await?;
    Ok(Json(AdjustResponse {
        item: req.item,
        available,
    }))
}
