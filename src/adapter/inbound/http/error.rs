//! Mapping of service errors onto HTTP responses.
//!
//! | Error                      | Status | Body                                   |
//! |----------------------------|--------|----------------------------------------|
//! | business rule              | 422    | `{"message": <rule message>}`          |
//! | malformed body             | 422    | `{"message": "invalid request body", "details": ...}` |
//! | concurrent modification    | 409    | `{"message": ...}`                     |
//! | anything else              | 500    | `{"message": "failed to <operation>"}` |

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info, warn};

use crate::error::Error;

/// Construct a JSON error response with the given status code and message.
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

/// A failed request.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// The request body could not be decoded.
    Body(JsonRejection),
    /// The service call failed.
    Service {
        operation: &'static str,
        error: Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` naming the operation that failed.
    pub(crate) fn during(operation: &'static str) -> impl FnOnce(Error) -> Self {
        move |error| Self::Service { operation, error }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Body(rejection) => {
                info!(details = %rejection.body_text(), "Invalid request body");
                let body = serde_json::json!({
                    "message": "invalid request body",
                    "details": rejection.body_text(),
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Service {
                error: Error::Domain(err),
                ..
            } => json_error(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
            ApiError::Service {
                operation,
                error: error @ Error::Conflict { .. },
            } => {
                warn!(operation, error = %error, "Concurrent modification");
                json_error(
                    StatusCode::CONFLICT,
                    "resource was modified concurrently, retry the request",
                )
            }
            ApiError::Service { operation, error } => {
                error!(operation, error = %error, "Request failed");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("failed to {operation}"),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn business_errors_are_unprocessable() {
        let response = ApiError::during("delete mission")(DomainError::AssignedToCat.into())
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflicts_map_to_409() {
        let response = ApiError::during("update target")(Error::Conflict {
            entity: "mission",
            id: "m-1".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_errors_hide_details() {
        let response =
            ApiError::during("list missions")(Error::Database("disk full".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
