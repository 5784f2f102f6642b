//! Spy cat routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::ApiError;
use crate::application::Services;
use crate::domain::{NewSpyCat, SpyCatId};

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateSalaryRequest {
    salary: Decimal,
}

/// POST /spycats
pub(crate) async fn create(
    State(services): State<Services>,
    body: Result<Json<NewSpyCat>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let cat = services
        .spy_cats
        .create(input)
        .await
        .map_err(ApiError::during("create spy cat"))?;
    Ok(Json(cat))
}

/// GET /spycats
pub(crate) async fn list(State(services): State<Services>) -> Result<impl IntoResponse, ApiError> {
    let cats = services
        .spy_cats
        .list()
        .await
        .map_err(ApiError::during("list spy cats"))?;
    Ok(Json(cats))
}

/// GET /spycats/{id}
pub(crate) async fn get(
    State(services): State<Services>,
    Path(id): Path<SpyCatId>,
) -> Result<impl IntoResponse, ApiError> {
    let cat = services
        .spy_cats
        .get(&id)
        .await
        .map_err(ApiError::during("get spy cat"))?;
    Ok(Json(cat))
}

/// DELETE /spycats/{id}
pub(crate) async fn delete(
    State(services): State<Services>,
    Path(id): Path<SpyCatId>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .spy_cats
        .delete(&id)
        .await
        .map_err(ApiError::during("delete spy cat"))?;
    Ok(Json(
        serde_json::json!({ "message": "spy cat deleted successfully" }),
    ))
}

/// PUT /spycats/{id}/salary
pub(crate) async fn update_salary(
    State(services): State<Services>,
    Path(id): Path<SpyCatId>,
    body: Result<Json<UpdateSalaryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cat = services
        .spy_cats
        .update_salary(&id, request.salary)
        .await
        .map_err(ApiError::during("update spy cat salary"))?;
    Ok(Json(cat))
}
