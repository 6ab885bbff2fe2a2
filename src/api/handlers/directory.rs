//! Directory handlers: cities, areas, homepage and deals.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    AreasResponse, CitiesResponse, DealResponse, HomepageParams, HomepageResponse,
};
use crate::app_state::AppState;
use crate::domain::{CityId, DealId, RequestContext};
use crate::error::{ApiError, ErrorResponse};

/// `GET /cities`: Active cities with live offers.
///
/// # Errors
///
/// Returns [`ApiError::QueryFailed`] if the directory read fails.
#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "Directory",
    summary = "List cities with offers",
    description = "Returns every active city with at least one live offer, ordered by name. Read-only and idempotent.",
    responses(
        (status = 200, description = "City directory", body = CitiesResponse),
        (status = 500, description = "Directory query failed", body = ErrorResponse),
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let cities = state.directory.list_cities_with_offers(Utc::now()).await?;
    tracing::debug!(request_id = %ctx.request_id, count = cities.len(), "cities served");
    Ok(Json(CitiesResponse { cities }))
}

/// `GET /cities/{id}/areas`: Location areas of a city.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for unknown or inactive cities.
#[utoipa::path(
    get,
    path = "/api/cities/{id}/areas",
    tag = "Directory",
    summary = "List location areas",
    description = "Returns the neighbourhoods of an active city, ordered by name.",
    params(
        ("id" = uuid::Uuid, Path, description = "City UUID"),
    ),
    responses(
        (status = 200, description = "Location areas", body = AreasResponse),
        (status = 400, description = "Malformed city id", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Query failed", body = ErrorResponse),
    )
)]
pub async fn list_areas(
    State(state): State<AppState>,
    path: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let areas = state.directory.location_areas(CityId::from_uuid(id)).await?;
    Ok(Json(AreasResponse { areas }))
}

/// `GET /homepage`: Categories and newest deals for one city.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] on malformed parameters and
/// [`ApiError::NotFound`] if the city is not in the directory.
#[utoipa::path(
    get,
    path = "/api/homepage",
    tag = "Directory",
    summary = "Homepage aggregation",
    description = "Returns the directory city, its categories with live deal counts and the newest live deals.",
    params(HomepageParams),
    responses(
        (status = 200, description = "Homepage data", body = HomepageResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "City not in the directory", body = ErrorResponse),
        (status = 500, description = "Query failed", body = ErrorResponse),
    )
)]
pub async fn homepage(
    State(state): State<AppState>,
    ctx: RequestContext,
    params: Result<Query<HomepageParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let snapshot = state
        .directory
        .homepage(CityId::from_uuid(params.city_id), params.limit, Utc::now())
        .await?;
    tracing::debug!(
        request_id = %ctx.request_id,
        city_id = %params.city_id,
        deals = snapshot.deals.len(),
        "homepage served"
    );
    Ok(Json(HomepageResponse::from(snapshot)))
}

/// `GET /deals/{id}`: A single live deal.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] unless the deal exists and is live.
#[utoipa::path(
    get,
    path = "/api/deals/{id}",
    tag = "Directory",
    summary = "Get a live deal",
    description = "Returns a deal with formatted prices. Drafts, paused and expired deals are reported as not found.",
    params(
        ("id" = uuid::Uuid, Path, description = "Deal UUID"),
    ),
    responses(
        (status = 200, description = "Deal details", body = DealResponse),
        (status = 400, description = "Malformed deal id", body = ErrorResponse),
        (status = 404, description = "Deal not found or not live", body = ErrorResponse),
        (status = 500, description = "Query failed", body = ErrorResponse),
    )
)]
pub async fn get_deal(
    State(state): State<AppState>,
    path: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let deal = state
        .directory
        .live_deal(DealId::from_uuid(id), Utc::now())
        .await?;
    Ok(Json(DealResponse::from(deal)))
}

/// Directory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/cities/{id}/areas", get(list_areas))
        .route("/homepage", get(homepage))
        .route("/deals/{id}", get(get_deal))
}
