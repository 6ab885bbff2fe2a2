//! Account handlers: caller profile, claim inbox and claim messages.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ClaimsParams, ClaimsResponse, MeResponse, MessagesResponse};
use crate::app_state::AppState;
use crate::domain::{ClaimId, RequestContext};
use crate::error::{ApiError, ErrorResponse};

/// `GET /me`: Resolved identity of the caller.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] if the forwarded identity has no
/// account record.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Accounts",
    summary = "Current caller",
    description = "Returns the caller's role and, when signed in, the matching account record.",
    responses(
        (status = 200, description = "Caller profile", body = MeResponse),
        (status = 401, description = "Unknown account", body = ErrorResponse),
        (status = 500, description = "Query failed", body = ErrorResponse),
    )
)]
pub async fn me(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.accounts.profile(&ctx).await?;
    Ok(Json(MeResponse::from(profile)))
}

/// `GET /business/claims`: Claims on the caller's deals.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] / [`ApiError::Forbidden`] unless the
/// caller is a business owner.
#[utoipa::path(
    get,
    path = "/api/business/claims",
    tag = "Accounts",
    summary = "Business claim inbox",
    description = "Returns claims on deals owned by the calling business, newest first.",
    params(ClaimsParams),
    responses(
        (status = 200, description = "Claims", body = ClaimsResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not a business owner", body = ErrorResponse),
        (status = 500, description = "Query failed", body = ErrorResponse),
    )
)]
pub async fn business_claims(
    State(state): State<AppState>,
    ctx: RequestContext,
    params: Result<Query<ClaimsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let claims = state.accounts.business_claims(&ctx, params.status).await?;
    Ok(Json(ClaimsResponse { claims }))
}

/// `GET /claims/{id}/messages`: Conversation on a claim.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for unknown claims and
/// [`ApiError::Unauthorized`] / [`ApiError::Forbidden`] for callers who
/// may not read it.
#[utoipa::path(
    get,
    path = "/api/claims/{id}/messages",
    tag = "Accounts",
    summary = "Claim messages",
    description = "Returns the messages on a claim, oldest first. Readable by the owning business and by admins.",
    params(
        ("id" = uuid::Uuid, Path, description = "Claim UUID"),
    ),
    responses(
        (status = 200, description = "Messages", body = MessagesResponse),
        (status = 400, description = "Malformed claim id", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Claim belongs to another business", body = ErrorResponse),
        (status = 404, description = "Claim not found", body = ErrorResponse),
        (status = 500, description = "Query failed", body = ErrorResponse),
    )
)]
pub async fn claim_messages(
    State(state): State<AppState>,
    ctx: RequestContext,
    path: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let messages = state
        .accounts
        .claim_messages(&ctx, ClaimId::from_uuid(id))
        .await?;
    Ok(Json(MessagesResponse { messages }))
}

/// Account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/business/claims", get(business_claims))
        .route("/claims/{id}/messages", get(claim_messages))
}
