//! Dashboard, export and import endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use domain::{Collections, Overview};
use storage::DocumentStorage;

use super::SharedState;
use crate::error::ApiError;

/// GET /overview: dashboard figures.
pub async fn overview<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
) -> Json<Overview> {
    Json(state.store.overview().await)
}

/// GET /export: the indented export document as a download.
#[tracing::instrument(skip(state))]
pub async fn export<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state.store.export().await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ems-data.json\"",
            ),
        ],
        document,
    ))
}

/// POST /import: replace all collections with a previous export.
#[tracing::instrument(skip(state, collections))]
pub async fn import<S: DocumentStorage + 'static>(
    State(state): State<SharedState<S>>,
    Json(collections): Json<Collections>,
) -> Result<StatusCode, ApiError> {
    state.store.import(collections).await?;
    Ok(StatusCode::NO_CONTENT)
}
