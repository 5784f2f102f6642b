//! Mission routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use crate::application::Services;
use crate::domain::{MissionId, NewMission, SpyCatId};

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateMissionRequest {
    completed: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignRequest {
    #[serde(rename = "spyCatId", alias = "spyCatID")]
    spy_cat_id: SpyCatId,
}

/// POST /missions
pub(crate) async fn create(
    State(services): State<Services>,
    body: Result<Json<NewMission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let mission = services
        .missions
        .create(input)
        .await
        .map_err(ApiError::during("create mission"))?;
    Ok(Json(mission))
}

/// GET /missions
pub(crate) async fn list(State(services): State<Services>) -> Result<impl IntoResponse, ApiError> {
    let missions = services
        .missions
        .list()
        .await
        .map_err(ApiError::during("list missions"))?;
    Ok(Json(missions))
}

/// GET /missions/{id}
pub(crate) async fn get(
    State(services): State<Services>,
    Path(id): Path<MissionId>,
) -> Result<impl IntoResponse, ApiError> {
    let mission = services
        .missions
        .get(&id)
        .await
        .map_err(ApiError::during("get mission"))?;
    Ok(Json(mission))
}

/// PUT /missions/{id}
pub(crate) async fn update(
    State(services): State<Services>,
    Path(id): Path<MissionId>,
    body: Result<Json<UpdateMissionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let mission = services
        .missions
        .update(&id, request.completed)
        .await
        .map_err(ApiError::during("update mission"))?;
    Ok(Json(mission))
}

/// DELETE /missions/{id}
pub(crate) async fn delete(
    State(services): State<Services>,
    Path(id): Path<MissionId>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .missions
        .delete(&id)
        .await
        .map_err(ApiError::during("delete mission"))?;
    Ok(Json(
        serde_json::json!({ "message": "mission deleted successfully" }),
    ))
}

/// POST /missions/{id}/assign
pub(crate) async fn assign(
    State(services): State<Services>,
    Path(id): Path<MissionId>,
    body: Result<Json<AssignRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    services
        .missions
        .assign(&id, &request.spy_cat_id)
        .await
        .map_err(ApiError::during("assign spy cat"))?;
    Ok(Json(
        serde_json::json!({ "message": "spy cat assigned successfully" }),
    ))
}
