//! HTTP JSON API over the agency services.
//!
//! Endpoints:
//! - GET    /ping                    - Liveness check
//! - POST   /spycats                 - Register a spy cat
//! - GET    /spycats                 - List spy cats
//! - GET    /spycats/{id}            - Get a spy cat
//! - DELETE /spycats/{id}            - Delete a spy cat
//! - PUT    /spycats/{id}/salary     - Update a spy cat's salary
//! - POST   /missions                - Create a mission with its targets
//! - GET    /missions                - List missions
//! - GET    /missions/{id}           - Get a mission
//! - PUT    /missions/{id}           - Set a mission's completed flag
//! - DELETE /missions/{id}           - Delete an unassigned mission
//! - POST   /missions/{id}/assign    - Assign a spy cat to a mission
//! - POST   /missions/{id}/targets   - Add a target to a mission
//! - GET    /missions/{id}/targets   - List a mission's targets
//! - PUT    /targets/{id}            - Update a target's notes or completion
//! - DELETE /targets/{id}            - Delete an open target
//!
//! All bodies are JSON with camelCase field names. Business rule
//! violations answer 422 with `{"message": ...}`; see [`error`] for the
//! full mapping.

mod error;
mod middleware;
mod mission;
mod spy_cat;
mod target;

use std::future::Future;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{middleware as axum_middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use self::middleware::REQUEST_ID_HEADER;

use self::error::json_error;
use self::middleware::request_log_middleware;
use crate::application::Services;
use crate::error::Result;

/// Maximum request body size: 1 MB.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// GET /ping
async fn handle_ping() -> StatusCode {
    StatusCode::OK
}

/// Fallback handler for unmatched routes.
async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// Build the application router.
pub fn router(services: Services) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/ping", get(handle_ping))
        .route("/spycats", post(spy_cat::create).get(spy_cat::list))
        .route("/spycats/{id}", get(spy_cat::get).delete(spy_cat::delete))
        .route("/spycats/{id}/salary", put(spy_cat::update_salary))
        .route("/missions", post(mission::create).get(mission::list))
        .route(
            "/missions/{id}",
            get(mission::get)
                .put(mission::update)
                .delete(mission::delete),
        )
        .route("/missions/{id}/assign", post(mission::assign))
        .route(
            "/missions/{id}/targets",
            post(target::create).get(target::list),
        )
        .route("/targets/{id}", put(target::update).delete(target::delete))
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(services)
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the server fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
