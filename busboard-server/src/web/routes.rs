//! HTTP route handlers.
//!
//! Thin plumbing: each handler calls exactly one catalog or registry
//! operation and serializes the result (or a classified error).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::bustime::BustimeError;
use crate::catalog::CatalogError;
use crate::registry::RegistryError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the admin UI assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_redirect))
        .route("/health", get(health))
        .route("/api/routes", get(list_routes))
        .route("/api/routes/:route_id/directions", get(route_directions))
        .route(
            "/api/routes/:route_id/directions/:direction_id/stops",
            get(direction_stops),
        )
        .route("/api/routes/:route_id/stops/:stop_id", get(stop_info))
        .route("/api/tracked", get(list_tracked))
        .route("/api/tracked", post(track_stop))
        .route("/api/tracked/:index", delete(untrack_stop))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The admin UI is a static page.
async fn index_redirect() -> Redirect {
    Redirect::to("/static/index.html")
}

/// The agency's route catalog.
async fn list_routes(State(state): State<AppState>) -> Result<Json<RoutesResponse>, AppError> {
    let routes = state.catalog.routes().await?;
    Ok(Json(RoutesResponse { routes }))
}

/// Direction label → direction id for a route.
async fn route_directions(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let directions = state.catalog.directions(&route_id).await?;

    let map: serde_json::Map<String, serde_json::Value> = directions
        .into_iter()
        .map(|d| (d.label, serde_json::Value::String(d.id)))
        .collect();

    Ok(Json(serde_json::Value::Object(map)))
}

/// Stop name → stop id for one direction of a route.
async fn direction_stops(
    State(state): State<AppState>,
    Path((route_id, direction_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stops = state.catalog.stops(&route_id, &direction_id).await?;

    let map: serde_json::Map<String, serde_json::Value> = stops
        .into_iter()
        .map(|s| (s.name, serde_json::Value::String(s.id)))
        .collect();

    Ok(Json(serde_json::Value::Object(map)))
}

/// Merged direction + stop metadata for a (route, stop) pair.
async fn stop_info(
    State(state): State<AppState>,
    Path((route_id, stop_id)): Path<(String, String)>,
) -> Result<Json<crate::catalog::StopInfo>, AppError> {
    let info = state.catalog.stop_info(&route_id, &stop_id).await?;
    Ok(Json(info))
}

/// The curated tracked-stop list.
async fn list_tracked(State(state): State<AppState>) -> Json<TrackedResponse> {
    Json(TrackedResponse {
        stops: state.registry.list().await,
    })
}

/// Track a stop, replacing any existing entry for the same pair.
async fn track_stop(
    State(state): State<AppState>,
    Json(req): Json<TrackRequest>,
) -> Result<StatusCode, AppError> {
    state.registry.upsert(req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a tracked stop by its position in the list.
async fn untrack_stop(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    state.registry.remove_at(index).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error for HTTP responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            // upstream unreachable or talking nonsense: the operator
            // can't fix the request, so both classes map to 502
            CatalogError::Upstream(BustimeError::Unauthorized) => AppError::BadGateway {
                message: "upstream rejected the API key".to_string(),
            },
            CatalogError::Upstream(inner) => AppError::BadGateway {
                message: inner.to_string(),
            },
            CatalogError::MissingStopGrouping
            | CatalogError::DirectionNotFound { .. }
            | CatalogError::StopNotOnRoute { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::OutOfRange { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            RegistryError::Config(inner) => AppError::Internal {
                message: inner.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        };

        tracing::warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_statuses() {
        let err: AppError = CatalogError::StopNotOnRoute {
            stop_id: "MTA_305183".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: AppError = CatalogError::MissingStopGrouping.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: AppError = CatalogError::Upstream(BustimeError::Api {
            status: 503,
            message: "maintenance".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: AppError = CatalogError::Upstream(BustimeError::Xml {
            message: "bad envelope".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn registry_errors_map_to_statuses() {
        let err: AppError = RegistryError::OutOfRange { index: 3, len: 1 }.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        match err {
            AppError::NotFound { message } => assert!(message.contains("out of range")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
