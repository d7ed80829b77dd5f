//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    ComputeTimelineRequest, HealthResponse, OccupancyTimeline, StoreRentalsResponse,
    TimelineParams,
};
use super::error::AppError;
use super::state::AppState;
use crate::core::domain::Interval;
use crate::io::loaders::{records_to_intervals, RentalRecord};
use crate::services::timeline::{compute_occupancy_timeline, fetch_timeline_rentals};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let rentals = state.repository.rental_count().await.ok();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository,
        rentals,
    }))
}

// =============================================================================
// Rentals
// =============================================================================

/// POST /v1/rentals
///
/// Insert or replace rentals by id.
pub async fn store_rentals(
    State(state): State<AppState>,
    Json(records): Json<Vec<RentalRecord>>,
) -> Result<(StatusCode, Json<StoreRentalsResponse>), AppError> {
    let rentals = records_to_intervals(records)?;
    let stored = state.repository.store_rentals(rentals).await?;
    let total = state.repository.rental_count().await?;

    tracing::info!(stored, total, "Stored rentals");

    Ok((StatusCode::CREATED, Json(StoreRentalsResponse { stored, total })))
}

/// GET /v1/rentals/{rental_id}
///
/// A single stored rental; `404` when the id is unknown.
pub async fn get_rental(
    State(state): State<AppState>,
    Path(rental_id): Path<String>,
) -> HandlerResult<Interval> {
    let rental = state.repository.get_rental(&rental_id).await?;
    Ok(Json(rental))
}

// =============================================================================
// Timeline
// =============================================================================

/// GET /v1/timeline
///
/// Occupancy timeline over the stored rentals. The response carries an
/// `ETag`; a matching `If-None-Match` yields `304 Not Modified`.
pub async fn get_timeline(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let query = params.into_query(&state.defaults)?;
    let rentals = fetch_timeline_rentals(state.repository.as_ref(), &query).await?;

    let (timeline, fingerprint) = tokio::task::spawn_blocking(move || {
        let timeline = compute_occupancy_timeline(&rentals, &query);
        timeline.fingerprint().map(|fp| (timeline, fp))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let etag = HeaderValue::from_str(&format!("\"{}\"", fingerprint))
        .map_err(|e| AppError::Internal(format!("Invalid ETag: {}", e)))?;

    let not_modified = headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| etag_matches(value, &fingerprint));
    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok(([(header::ETAG, etag)], Json(timeline)).into_response())
}

/// Weak comparison of an `If-None-Match` value against an entity tag.
///
/// Accepts `*`, comma-separated lists and `W/` validators.
fn etag_matches(if_none_match: &str, fingerprint: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|tag| {
        tag == "*"
            || tag
                .strip_prefix("W/")
                .unwrap_or(tag)
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                == Some(fingerprint)
    })
}

/// POST /v1/timeline/compute
///
/// Stateless computation over the rentals in the request body.
pub async fn compute_timeline(
    State(state): State<AppState>,
    Json(request): Json<ComputeTimelineRequest>,
) -> HandlerResult<OccupancyTimeline> {
    let query = request.params.into_query(&state.defaults)?;
    let rentals = records_to_intervals(request.rentals)?;

    // Packing is CPU-bound; keep it off the async workers.
    let timeline =
        tokio::task::spawn_blocking(move || compute_occupancy_timeline(&rentals, &query))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(timeline))
}
