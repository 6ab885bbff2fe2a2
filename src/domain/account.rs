//! Business owner and admin profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AdminId, BusinessId, CityId};

/// A business listing deals on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOwner {
    /// Business identifier.
    pub id: BusinessId,
    /// Public business name.
    pub business_name: String,
    /// Person managing the account.
    pub contact_name: String,
    /// Login and contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Home city.
    pub city_id: Option<CityId>,
    /// Whether staff verified the business.
    pub is_verified: bool,
    /// Signup timestamp.
    pub created_at: DateTime<Utc>,
}

/// Marketplace staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// Admin identifier.
    pub id: AdminId,
    /// Login email.
    pub email: String,
    /// Name shown in the admin UI.
    pub display_name: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}
