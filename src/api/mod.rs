//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! JSON endpoints are mounted under `/api`; `robots.txt`, `sitemap.xml`
//! and `/health` live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::{BoxError, Router};
use tower::ServiceBuilder;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Body message of a request cut off by the request timeout.
pub const TIMEOUT_MESSAGE: &str = "query timed out";

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::seo::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the router with state applied and every request bounded by
/// `request_timeout`.
///
/// A request that runs out of time answers 500 with the standard
/// `{ "error": ... }` body.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::QueryFailed(TIMEOUT_MESSAGE.to_string())
    } else {
        ApiError::Internal(err.to_string())
    }
}
