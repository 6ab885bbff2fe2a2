//! REST endpoint handlers organized by resource.

pub mod account;
pub mod directory;
pub mod seo;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(directory::routes())
        .merge(account::routes())
        .merge(seo::api_routes())
}
