//! Supervisor and rider endpoints, including photos, deductions and bulk import.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{
    DeductionEntry, Deductions, ImportReport, Money, Rider, RiderCode, RiderForm, Supervisor,
    SupervisorCode, SupervisorForm,
};
use serde::{Deserialize, Serialize};
use storage::DocumentStorage;

use super::SharedState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct RiderSearch {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRequest {
    pub image_data: String,
}

// -- Response types --

/// Supervisor as listed to the rendering layer; the stored password is not echoed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorResponse {
    pub code: String,
    pub name: String,
    pub region: String,
    pub username: String,
}

impl From<Supervisor> for SupervisorResponse {
    fn from(s: Supervisor) -> Self {
        Self {
            code: s.code.to_string(),
            name: s.name,
            region: s.region,
            username: s.username,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderResponse {
    #[serde(flatten)]
    pub rider: Rider,
    pub total_deductions: Money,
}

impl From<Rider> for RiderResponse {
    fn from(rider: Rider) -> Self {
        let total_deductions = rider.deductions.total();
        Self {
            rider,
            total_deductions,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionsResponse {
    pub deductions: Deductions,
    pub total: Money,
}

// -- Supervisor handlers --

/// GET /supervisors
pub async fn list_supervisors<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
) -> Json<Vec<SupervisorResponse>> {
    let supervisors = state.store.supervisors().await;
    Json(supervisors.into_iter().map(Into::into).collect())
}

/// POST /supervisors
#[tracing::instrument(skip(state, form))]
pub async fn create_supervisor<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Json(form): Json<SupervisorForm>,
) -> Result<(StatusCode, Json<SupervisorResponse>), ApiError> {
    let supervisor = state.store.add_supervisor(form).await?;
    Ok((StatusCode::CREATED, Json(supervisor.into())))
}

/// DELETE /supervisors/{code}
#[tracing::instrument(skip(state))]
pub async fn delete_supervisor<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .remove_supervisor(&SupervisorCode::new(code))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Rider handlers --

/// GET /riders?q=: all riders, or those matching the search text.
pub async fn list_riders<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Query(search): Query<RiderSearch>,
) -> Json<Vec<RiderResponse>> {
    let riders = state.store.search_riders(&search.q).await;
    Json(riders.into_iter().map(Into::into).collect())
}

/// GET /riders/{code}
pub async fn get_rider<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(code): Path<String>,
) -> Result<Json<RiderResponse>, ApiError> {
    let code = RiderCode::new(code);
    let rider = state
        .store
        .rider(&code)
        .await
        .ok_or_else(|| domain::DomainError::NotFound {
            kind: "Rider",
            key: code.to_string(),
        })?;
    Ok(Json(rider.into()))
}

/// POST /riders
#[tracing::instrument(skip(state, form))]
pub async fn create_rider<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Json(form): Json<RiderForm>,
) -> Result<(StatusCode, Json<RiderResponse>), ApiError> {
    let rider = state.store.add_rider(form).await?;
    Ok((StatusCode::CREATED, Json(rider.into())))
}

/// DELETE /riders/{code}
#[tracing::instrument(skip(state))]
pub async fn delete_rider<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.remove_rider(&RiderCode::new(code)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /riders/{code}/photo
#[tracing::instrument(skip(state, req))]
pub async fn set_photo<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(code): Path<String>,
    Json(req): Json<PhotoRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .set_rider_photo(&RiderCode::new(code), req.image_data)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /riders/{code}/deductions
#[tracing::instrument(skip(state, entry))]
pub async fn add_deduction<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Path(code): Path<String>,
    Json(entry): Json<DeductionEntry>,
) -> Result<Json<DeductionsResponse>, ApiError> {
    let deductions = state
        .store
        .add_deduction(&RiderCode::new(code), entry)
        .await?;
    Ok(Json(DeductionsResponse {
        total: deductions.total(),
        deductions,
    }))
}

/// POST /riders/import: body is `code,name,region,vehicleType,tshirtQuantity` lines.
#[tracing::instrument(skip(state, body))]
pub async fn import_riders<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    body: String,
) -> Result<Json<ImportReport>, ApiError> {
    let report = state.store.import_riders_csv(&body).await?;
    Ok(Json(report))
}
