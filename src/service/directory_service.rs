//! Directory service: the city/offer read model and its projections.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    CityId, Deal, DealId, DirectoryCity, HomepageCategory, HomepageDealPreview, LocationArea,
};
use crate::error::ApiError;
use crate::persistence::MarketplaceStore;

/// Default number of deal previews on the homepage.
pub const DEFAULT_HOMEPAGE_LIMIT: usize = 12;

/// Upper bound on deal previews per homepage request.
pub const MAX_HOMEPAGE_LIMIT: usize = 50;

/// Everything the homepage of one city renders.
#[derive(Debug, Clone, PartialEq)]
pub struct HomepageSnapshot {
    /// The directory city.
    pub city: DirectoryCity,
    /// Categories with at least one live deal, busiest first.
    pub categories: Vec<HomepageCategory>,
    /// Newest live deals.
    pub deals: Vec<HomepageDealPreview>,
}

/// Read model over active cities and their live offers.
///
/// Stateless: every call is a fresh read through the store, evaluated at
/// the instant passed in.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    store: Arc<dyn MarketplaceStore>,
}

impl DirectoryService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketplaceStore>) -> Self {
        Self { store }
    }

    /// Active cities with at least one live offer at `now`, ordered by
    /// name, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::QueryFailed`] if the store read fails.
    pub async fn list_cities_with_offers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<DirectoryCity>, ApiError> {
        let cities = self.store.list_cities_with_offers(now).await?;
        let fetched = cities.len();

        let mut seen = HashSet::with_capacity(fetched);
        let mut cities: Vec<DirectoryCity> = cities
            .into_iter()
            .filter(|c| c.city.is_active && c.offer_count > 0)
            .filter(|c| seen.insert(c.city.id))
            .collect();
        cities.sort_by(|a, b| {
            a.city
                .name
                .cmp(&b.city.name)
                .then_with(|| a.city.id.cmp(&b.city.id))
        });

        if cities.len() != fetched {
            tracing::warn!(
                fetched,
                kept = cities.len(),
                "store returned cities outside the directory"
            );
        }
        tracing::debug!(count = cities.len(), "directory loaded");
        Ok(cities)
    }

    /// Looks up one city of the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the city is unknown, inactive or
    /// has no live offers, and [`ApiError::QueryFailed`] on store failure.
    pub async fn directory_city(
        &self,
        city_id: CityId,
        now: DateTime<Utc>,
    ) -> Result<DirectoryCity, ApiError> {
        self.list_cities_with_offers(now)
            .await?
            .into_iter()
            .find(|c| c.city.id == city_id)
            .ok_or_else(|| ApiError::not_found("city", city_id))
    }

    /// Builds the homepage aggregation for a directory city.
    ///
    /// `limit` is clamped to `1..=`[`MAX_HOMEPAGE_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the city is not in the directory,
    /// and [`ApiError::QueryFailed`] on store failure.
    pub async fn homepage(
        &self,
        city_id: CityId,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<HomepageSnapshot, ApiError> {
        let city = self.directory_city(city_id, now).await?;
        let deals = self.store.list_live_deals(city_id, now).await?;
        let areas = self.store.list_location_areas(city_id).await?;
        let categories = self.store.list_categories().await?;

        // The store already filters; re-check so counts and previews agree.
        let mut live: Vec<Deal> = deals.into_iter().filter(|d| d.is_live(now)).collect();

        let mut counts: HashMap<_, u32> = HashMap::new();
        for deal in &live {
            *counts.entry(deal.category_id).or_default() += 1;
        }
        let mut categories: Vec<HomepageCategory> = categories
            .into_iter()
            .filter_map(|c| {
                let count = counts.get(&c.id).copied()?;
                Some(HomepageCategory::new(c, count))
            })
            .collect();
        categories.sort_by(|a, b| {
            b.deal_count
                .cmp(&a.deal_count)
                .then_with(|| a.name.cmp(&b.name))
        });

        let area_names: HashMap<_, _> = areas.into_iter().map(|a| (a.id, a.name)).collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        let deals = live
            .iter()
            .take(limit.clamp(1, MAX_HOMEPAGE_LIMIT))
            .map(|d| {
                let area = d.location_area_id.and_then(|id| area_names.get(&id).cloned());
                HomepageDealPreview::from_deal(d, area)
            })
            .collect();

        Ok(HomepageSnapshot {
            city,
            categories,
            deals,
        })
    }

    /// Location areas of an active city, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the city is unknown or inactive,
    /// and [`ApiError::QueryFailed`] on store failure.
    pub async fn location_areas(&self, city_id: CityId) -> Result<Vec<LocationArea>, ApiError> {
        match self.store.get_city(city_id).await? {
            Some(city) if city.is_active => {}
            _ => return Err(ApiError::not_found("city", city_id)),
        }
        let mut areas = self.store.list_location_areas(city_id).await?;
        areas.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(areas)
    }

    /// Returns a deal if it is live at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the deal is unknown or not live,
    /// and [`ApiError::QueryFailed`] on store failure.
    pub async fn live_deal(&self, deal_id: DealId, now: DateTime<Utc>) -> Result<Deal, ApiError> {
        self.store
            .get_deal(deal_id)
            .await?
            .filter(|d| d.is_live(now))
            .ok_or_else(|| ApiError::not_found("deal", deal_id))
    }
}
