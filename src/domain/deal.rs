//! Deals (offers), their categories and listing projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AreaId, BusinessId, CategoryId, CityId, DealId};

/// Publication status of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    /// Being edited by the business; not visible.
    Draft,
    /// Published and claimable.
    Active,
    /// Temporarily hidden by the business.
    Paused,
    /// Past its offer window.
    Expired,
}

impl DealStatus {
    /// Parses the stored status string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns the stored status string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Expired => "expired",
        }
    }
}

/// A priced service listing offered by a business in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Deal identifier.
    pub id: DealId,
    /// Owning business.
    pub business_id: BusinessId,
    /// City the offer is redeemable in.
    pub city_id: CityId,
    /// Optional sub-region within the city.
    pub location_area_id: Option<AreaId>,
    /// Service category.
    pub category_id: CategoryId,
    /// Listing title.
    pub title: String,
    /// Long description.
    pub description: Option<String>,
    /// Where the listing came from, e.g. `"business"` or `"imported"`.
    pub source: String,
    /// Listing layout template, e.g. `"standard"`.
    pub template_type: String,
    /// Name of the service, e.g. `"Botox (per unit)"`.
    pub service_name: String,
    /// Regular price in USD.
    pub original_price: f64,
    /// Deal price in USD.
    pub discount_price: f64,
    /// Publication status.
    pub status: DealStatus,
    /// Start of the offer window; open-ended when `None`.
    pub starts_at: Option<DateTime<Utc>>,
    /// End of the offer window (exclusive); open-ended when `None`.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Returns `true` if the deal is published and `now` falls inside its
    /// offer window.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == DealStatus::Active
            && self.starts_at.is_none_or(|start| start <= now)
            && self.expires_at.is_none_or(|end| end > now)
    }

    /// Percentage saved, rounded to the nearest whole percent.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        discount_percent(self.original_price, self.discount_price)
    }
}

/// Percentage saved going from `original` to `discount`.
///
/// Returns `0` when `original` is not positive or the discount is not an
/// actual reduction.
#[must_use]
pub fn discount_percent(original: f64, discount: f64) -> u32 {
    if !original.is_finite() || original <= 0.0 || !discount.is_finite() || discount >= original {
        return 0;
    }
    let pct = ((original - discount.max(0.0)) / original * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        pct.clamp(0.0, 100.0) as u32
    }
}

/// Service category a deal is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name, e.g. `"Injectables"`.
    pub name: String,
    /// URL slug, e.g. `"injectables"`.
    pub slug: String,
    /// Icon name for the UI.
    pub icon: Option<String>,
}

/// Category tile on the homepage, with its live deal count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomepageCategory {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Icon name.
    pub icon: Option<String>,
    /// Number of live deals in the category, recomputed per request.
    pub deal_count: u32,
}

impl HomepageCategory {
    /// Attaches a computed deal count to a category.
    #[must_use]
    pub fn new(category: Category, deal_count: u32) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            icon: category.icon,
            deal_count,
        }
    }
}

/// Read-only projection of a deal for listing surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomepageDealPreview {
    /// Deal identifier.
    pub id: DealId,
    /// Listing title.
    pub title: String,
    /// Listing source.
    pub source: String,
    /// Listing layout template.
    pub template_type: String,
    /// Service name.
    pub service_name: String,
    /// Name of the deal's location area, if any.
    pub location_area_name: Option<String>,
    /// Regular price in USD.
    pub original_price: f64,
    /// Deal price in USD.
    pub discount_price: f64,
    /// Whole-percent saving.
    pub discount_percent: u32,
}

impl HomepageDealPreview {
    /// Projects a deal, resolving its area name.
    #[must_use]
    pub fn from_deal(deal: &Deal, location_area_name: Option<String>) -> Self {
        Self {
            id: deal.id,
            title: deal.title.clone(),
            source: deal.source.clone(),
            template_type: deal.template_type.clone(),
            service_name: deal.service_name.clone(),
            location_area_name,
            original_price: deal.original_price,
            discount_price: deal.discount_price,
            discount_percent: deal.discount_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn deal(status: DealStatus) -> Deal {
        let now = Utc::now();
        Deal {
            id: DealId::new(),
            business_id: BusinessId::new(),
            city_id: CityId::new(),
            location_area_id: None,
            category_id: CategoryId::new(),
            title: "Botox".into(),
            description: None,
            source: "business".into(),
            template_type: "standard".into(),
            service_name: "Botox (per unit)".into(),
            original_price: 15.0,
            discount_price: 10.0,
            status,
            starts_at: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn only_active_deals_are_live() {
        let now = Utc::now();
        assert!(deal(DealStatus::Active).is_live(now));
        assert!(!deal(DealStatus::Draft).is_live(now));
        assert!(!deal(DealStatus::Paused).is_live(now));
        assert!(!deal(DealStatus::Expired).is_live(now));
    }

    #[test]
    fn offer_window_is_respected() {
        let now = Utc::now();
        let mut d = deal(DealStatus::Active);

        d.expires_at = Some(now);
        assert!(!d.is_live(now), "expiry is exclusive");

        d.expires_at = Some(now + Duration::days(1));
        d.starts_at = Some(now + Duration::hours(1));
        assert!(!d.is_live(now), "not started yet");

        d.starts_at = Some(now);
        assert!(d.is_live(now));
    }

    #[test]
    fn discount_percent_rounds() {
        assert_eq!(discount_percent(15.0, 10.0), 33);
        assert_eq!(discount_percent(600.0, 399.0), 34);
        assert_eq!(discount_percent(100.0, 0.0), 100);
    }

    #[test]
    fn discount_percent_degenerate_inputs() {
        assert_eq!(discount_percent(0.0, 0.0), 0);
        assert_eq!(discount_percent(100.0, 120.0), 0);
        assert_eq!(discount_percent(f64::NAN, 10.0), 0);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            DealStatus::Draft,
            DealStatus::Active,
            DealStatus::Paused,
            DealStatus::Expired,
        ] {
            assert_eq!(DealStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DealStatus::parse("published"), None);
    }

    #[test]
    fn preview_projection() {
        let d = deal(DealStatus::Active);
        let preview = HomepageDealPreview::from_deal(&d, Some("Downtown".into()));
        assert_eq!(preview.id, d.id);
        assert_eq!(preview.discount_percent, 33);
        assert_eq!(preview.location_area_name.as_deref(), Some("Downtown"));
    }
}
