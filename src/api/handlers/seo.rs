//! SEO endpoints: crawler policy, sitemap and structured data.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::StructuredDataResponse;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::seo::{build_sitemap, organization_schema, robots_policy, website_schema};

/// `GET /robots.txt`: Crawler policy for the deployment environment.
#[utoipa::path(
    get,
    path = "/robots.txt",
    tag = "SEO",
    summary = "Crawler policy",
    description = "Production allows crawling outside private areas; every other environment disallows everything. Always names the sitemap.",
    responses(
        (status = 200, description = "robots.txt", body = String, content_type = "text/plain"),
    )
)]
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let body = robots_policy(&state.site).render();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// `GET /sitemap.xml`: Static pages plus every directory city.
///
/// # Errors
///
/// Returns [`ApiError::QueryFailed`] if the directory read fails.
#[utoipa::path(
    get,
    path = "/sitemap.xml",
    tag = "SEO",
    summary = "XML sitemap",
    responses(
        (status = 200, description = "Sitemap", body = String, content_type = "application/xml"),
        (status = 500, description = "Directory query failed", body = ErrorResponse),
    )
)]
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cities = state.directory.list_cities_with_offers(Utc::now()).await?;
    let body = build_sitemap(&state.site, &cities);
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body))
}

/// `GET /seo/structured-data`: Organization and WebSite JSON-LD.
#[utoipa::path(
    get,
    path = "/api/seo/structured-data",
    tag = "SEO",
    summary = "Structured data",
    description = "Returns the schema.org Organization and WebSite objects embedded on every page.",
    responses(
        (status = 200, description = "JSON-LD objects", body = StructuredDataResponse),
    )
)]
pub async fn structured_data(State(state): State<AppState>) -> impl IntoResponse {
    Json(StructuredDataResponse {
        organization: organization_schema(&state.site),
        website: website_schema(&state.site),
    })
}

/// SEO routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/robots.txt", get(robots_txt))
        .route("/sitemap.xml", get(sitemap_xml))
}

/// SEO routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/seo/structured-data", get(structured_data))
}
