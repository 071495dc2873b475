//! Preview server
//!
//! Serves the build output as static files and the live portfolio model as
//! JSON under `/api`, backed by a cache that the watcher invalidates.

use std::{path::Path, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use folio_core::{Collection, CoreError};
use folio_generator::{CachedPortfolio, Scene};
use serde::Serialize;
use tower_http::services::ServeDir;

/// Shared server state.
pub type ServerState = Arc<CachedPortfolio>;

/// Error returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Content could not be read or validated.
    Content(CoreError),
    /// The blocking task running the lookup failed.
    Task(tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Content(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Content(e) if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match self {
            Self::Content(e) => e.to_string(),
            Self::Task(e) => e.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(%message, "API request failed");
        }
        (status, message).into_response()
    }
}

#[derive(Serialize)]
struct CollectionResponse<'a> {
    #[serde(flatten)]
    collection: &'a Collection,
    scenes: Vec<Scene<'a>>,
}

/// Create the preview server router.
pub fn create_router(output_dir: &Path, state: ServerState) -> Router {
    Router::new()
        .route("/api/collections", get(list_collections))
        .route("/api/collections/{slug}", get(get_collection))
        .route("/api/journey", get(journey))
        .fallback_service(ServeDir::new(output_dir))
        .with_state(state)
}

/// Run a portfolio lookup off the async runtime.
async fn blocking<T, F>(state: ServerState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CachedPortfolio) -> folio_core::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::Content)
}

async fn list_collections(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let listing = blocking(state, |p| p.list_collections()).await?;
    Ok(Json(listing.as_slice()).into_response())
}

async fn get_collection(
    State(state): State<ServerState>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Response, ApiError> {
    let collection = blocking(state.clone(), move |p| p.get_collection(&slug)).await?;
    let body = CollectionResponse {
        collection: &*collection,
        scenes: state.partition_into_scenes(&*collection),
    };
    Ok(Json(body).into_response())
}

async fn journey(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let feed = blocking(state, |p| p.get_journey_feed()).await?;
    Ok(Json(feed.as_slice()).into_response())
}
