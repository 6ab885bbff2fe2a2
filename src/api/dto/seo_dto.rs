//! Structured-data DTO.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `GET /api/seo/structured-data` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StructuredDataResponse {
    /// schema.org `Organization` JSON-LD.
    pub organization: serde_json::Value,
    /// schema.org `WebSite` JSON-LD.
    pub website: serde_json::Value,
}
