//! Target routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use super::error::ApiError;
use crate::application::Services;
use crate::domain::{MissionId, NewTarget, TargetId, TargetUpdate};

/// POST /missions/{id}/targets
pub(crate) async fn create(
    State(services): State<Services>,
    Path(mission_id): Path<MissionId>,
    body: Result<Json<NewTarget>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let target = services
        .targets
        .create(&mission_id, input)
        .await
        .map_err(ApiError::during("create target"))?;
    Ok(Json(target))
}

/// GET /missions/{id}/targets
pub(crate) async fn list(
    State(services): State<Services>,
    Path(mission_id): Path<MissionId>,
) -> Result<impl IntoResponse, ApiError> {
    let targets = services
        .targets
        .list(&mission_id)
        .await
        .map_err(ApiError::during("list targets"))?;
    Ok(Json(targets))
}

/// PUT /targets/{id}
pub(crate) async fn update(
    State(services): State<Services>,
    Path(id): Path<TargetId>,
    body: Result<Json<TargetUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(update) = body?;
    let target = services
        .targets
        .update(&id, update)
        .await
        .map_err(ApiError::during("update target"))?;
    Ok(Json(target))
}

/// DELETE /targets/{id}
pub(crate) async fn delete(
    State(services): State<Services>,
    Path(id): Path<TargetId>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .targets
        .delete(&id)
        .await
        .map_err(ApiError::during("delete target"))?;
    Ok(Json(
        serde_json::json!({ "message": "target deleted successfully" }),
    ))
}
