//! Directory, homepage and deal DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Deal, DirectoryCity, HomepageCategory, HomepageDealPreview, LocationArea};
use crate::format::format_money;
use crate::service::HomepageSnapshot;
use crate::service::directory_service::DEFAULT_HOMEPAGE_LIMIT;

/// `GET /api/cities` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitiesResponse {
    /// Active cities with at least one live offer, ordered by name.
    pub cities: Vec<DirectoryCity>,
}

/// `GET /api/cities/{id}/areas` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AreasResponse {
    /// Location areas ordered by name.
    pub areas: Vec<LocationArea>,
}

/// Query parameters for the homepage endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HomepageParams {
    /// City to render.
    pub city_id: uuid::Uuid,
    /// Maximum number of deal previews (1 to 50). Defaults to 12.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HOMEPAGE_LIMIT
}

/// `GET /api/homepage` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomepageResponse {
    /// The directory city.
    pub city: DirectoryCity,
    /// Categories with live deals, busiest first.
    pub categories: Vec<HomepageCategory>,
    /// Newest live deals.
    pub deals: Vec<HomepageDealPreview>,
}

impl From<HomepageSnapshot> for HomepageResponse {
    fn from(snapshot: HomepageSnapshot) -> Self {
        Self {
            city: snapshot.city,
            categories: snapshot.categories,
            deals: snapshot.deals,
        }
    }
}

/// `GET /api/deals/{id}` response: the deal plus display-ready prices.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealResponse {
    /// The live deal.
    pub deal: Deal,
    /// Formatted original price, e.g. `"1,200"`.
    pub original_price_display: String,
    /// Formatted discounted price, e.g. `"899.5"`.
    pub discount_price_display: String,
    /// Whole-percent saving off the original price.
    pub discount_percent: u32,
}

impl From<Deal> for DealResponse {
    fn from(deal: Deal) -> Self {
        Self {
            original_price_display: format_money(Some(deal.original_price)),
            discount_price_display: format_money(Some(deal.discount_price)),
            discount_percent: deal.discount_percent(),
            deal,
        }
    }
}
