//! In-process implementation of [`MarketplaceStore`].
//!
//! Holds raw rows behind a [`tokio::sync::RwLock`] and answers queries
//! with the same filters the SQL uses, converting through the same
//! validating `TryFrom` impls. Used for `STORE_BACKEND=memory` and as
//! the test double for services and handlers.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::MarketplaceStore;
use super::models::{
    AdminRow, BusinessOwnerRow, CategoryRow, CityRow, ClaimRow, DealRow, DirectoryCityRow,
    LocationAreaRow, MessageRow, convert_all,
};
use crate::domain::{
    Admin, AdminId, BusinessId, BusinessOwner, Category, City, CityId, Claim, ClaimId,
    ClaimStatus, Deal, DealId, DealStatus, DirectoryCity, LocationArea, Message,
};
use crate::error::ApiError;

#[derive(Debug, Default)]
struct Tables {
    cities: Vec<CityRow>,
    areas: Vec<LocationAreaRow>,
    categories: Vec<CategoryRow>,
    deals: Vec<DealRow>,
    claims: Vec<ClaimRow>,
    messages: Vec<MessageRow>,
    business_owners: Vec<BusinessOwnerRow>,
    admins: Vec<AdminRow>,
}

/// Row store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failure: RwLock<Option<String>>,
}

fn row_is_live(row: &DealRow, now: DateTime<Utc>) -> bool {
    row.status == DealStatus::Active.as_str()
        && row.starts_at.is_none_or(|start| start <= now)
        && row.expires_at.is_none_or(|end| end > now)
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read fail with `message`; `None` clears it.
    pub async fn set_failure(&self, message: Option<&str>) {
        *self.failure.write().await = message.map(str::to_string);
    }

    /// Adds a city row.
    pub async fn insert_city(&self, row: CityRow) {
        self.tables.write().await.cities.push(row);
    }

    /// Adds a location area row.
    pub async fn insert_area(&self, row: LocationAreaRow) {
        self.tables.write().await.areas.push(row);
    }

    /// Adds a category row.
    pub async fn insert_category(&self, row: CategoryRow) {
        self.tables.write().await.categories.push(row);
    }

    /// Adds a deal row.
    pub async fn insert_deal(&self, row: DealRow) {
        self.tables.write().await.deals.push(row);
    }

    /// Adds a claim row.
    pub async fn insert_claim(&self, row: ClaimRow) {
        self.tables.write().await.claims.push(row);
    }

    /// Adds a message row.
    pub async fn insert_message(&self, row: MessageRow) {
        self.tables.write().await.messages.push(row);
    }

    /// Adds a business owner row.
    pub async fn insert_business_owner(&self, row: BusinessOwnerRow) {
        self.tables.write().await.business_owners.push(row);
    }

    /// Adds an admin row.
    pub async fn insert_admin(&self, row: AdminRow) {
        self.tables.write().await.admins.push(row);
    }

    async fn check_failure(&self) -> Result<(), ApiError> {
        match self.failure.read().await.as_deref() {
            Some(message) => Err(ApiError::QueryFailed(message.to_string())),
            None => Ok(()),
        }
    }

    /// Builds a store populated with a small demo marketplace.
    ///
    /// Ids are fixed (see [`seed_ids`]) so local requests can be written
    /// by hand.
    pub async fn seeded() -> Self {
        const CHICAGO: &str = "America/Chicago";
        const NEW_YORK: &str = "America/New_York";
        const DENVER: &str = "America/Denver";

        let store = Self::new();
        let now = Utc::now();
        let created = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).single().unwrap_or(now);

        let city = |id: Uuid,
                    name: &str,
                    state: &str,
                    state_code: &str,
                    (lat, lng): (f64, f64),
                    tz: &str| CityRow {
            id,
            name: name.into(),
            state: state.into(),
            state_code: state_code.into(),
            latitude: lat,
            longitude: lng,
            timezone: tz.into(),
            is_active: true,
        };
        let cities = [
            city(seed_ids::AUSTIN, "Austin", "Texas", "TX", (30.2672, -97.7431), CHICAGO),
            city(seed_ids::DALLAS, "Dallas", "Texas", "TX", (32.7767, -96.7970), CHICAGO),
            CityRow {
                is_active: false,
                ..city(seed_ids::MIAMI, "Miami", "Florida", "FL", (25.7617, -80.1918), NEW_YORK)
            },
            city(seed_ids::DENVER, "Denver", "Colorado", "CO", (39.7392, -104.9903), DENVER),
        ];
        for row in cities {
            store.insert_city(row).await;
        }

        for (id, city_id, name, lat, lng) in [
            (seed_ids::DOWNTOWN_AUSTIN, seed_ids::AUSTIN, "Downtown", 30.2682, -97.7429),
            (seed_ids::DOMAIN_AUSTIN, seed_ids::AUSTIN, "The Domain", 30.4021, -97.7253),
            (seed_ids::UPTOWN_DALLAS, seed_ids::DALLAS, "Uptown", 32.8002, -96.8016),
        ] {
            store
                .insert_area(LocationAreaRow {
                    id,
                    city_id,
                    name: name.into(),
                    latitude: lat,
                    longitude: lng,
                    radius_miles: 3.0,
                })
                .await;
        }

        for (id, name, slug, icon) in [
            (seed_ids::INJECTABLES, "Injectables", "injectables", "syringe"),
            (seed_ids::LASER, "Laser Treatments", "laser-treatments", "sparkles"),
            (seed_ids::FACIALS, "Facials", "facials", "face"),
        ] {
            store
                .insert_category(CategoryRow {
                    id,
                    name: name.into(),
                    slug: slug.into(),
                    icon: Some(icon.into()),
                })
                .await;
        }

        store
            .insert_business_owner(BusinessOwnerRow {
                id: seed_ids::GLOW_MEDSPA,
                business_name: "Glow Medspa".into(),
                contact_name: "Jordan Lee".into(),
                email: "owner@glowmedspa.com".into(),
                phone: Some("512-555-0142".into()),
                city_id: Some(seed_ids::AUSTIN),
                is_verified: true,
                created_at: created,
            })
            .await;
        store
            .insert_admin(AdminRow {
                id: seed_ids::ADMIN,
                email: "ops@costfinders.ai".into(),
                display_name: "CostFinders Ops".into(),
                created_at: created,
            })
            .await;

        let deal = |id: Uuid,
                    city_id: Uuid,
                    category_id: Uuid,
                    title: &str,
                    service: &str,
                    prices: (f64, f64)| {
            DealRow {
                id,
                business_id: seed_ids::GLOW_MEDSPA,
                city_id,
                location_area_id: None,
                category_id,
                title: title.into(),
                description: None,
                source: "business".into(),
                template_type: "standard".into(),
                service_name: service.into(),
                original_price: prices.0,
                discount_price: prices.1,
                status: DealStatus::Active.as_str().into(),
                starts_at: None,
                expires_at: None,
                created_at: created,
                updated_at: created,
            }
        };

        let botox = DealRow {
            location_area_id: Some(seed_ids::DOWNTOWN_AUSTIN),
            ..deal(
                seed_ids::BOTOX_DEAL,
                seed_ids::AUSTIN,
                seed_ids::INJECTABLES,
                "Botox $10/unit",
                "Botox (per unit)",
                (15.0, 10.0),
            )
        };
        let filler = DealRow {
            location_area_id: Some(seed_ids::DOMAIN_AUSTIN),
            expires_at: Some(now + Duration::days(30)),
            ..deal(
                seed_ids::FILLER_DEAL,
                seed_ids::AUSTIN,
                seed_ids::INJECTABLES,
                "Lip filler special",
                "Juvederm (1 syringe)",
                (750.0, 499.0),
            )
        };
        let ipl = DealRow {
            location_area_id: Some(seed_ids::UPTOWN_DALLAS),
            ..deal(
                seed_ids::IPL_DEAL,
                seed_ids::DALLAS,
                seed_ids::LASER,
                "IPL photofacial",
                "IPL (full face)",
                (400.0, 249.0),
            )
        };
        let hydrafacial = DealRow {
            status: DealStatus::Expired.as_str().into(),
            expires_at: Some(now - Duration::days(3)),
            ..deal(
                seed_ids::HYDRAFACIAL_DEAL,
                seed_ids::DALLAS,
                seed_ids::FACIALS,
                "HydraFacial intro",
                "HydraFacial",
                (225.0, 149.0),
            )
        };
        let miami = deal(
            seed_ids::MIAMI_DEAL,
            seed_ids::MIAMI,
            seed_ids::INJECTABLES,
            "Dysport $4/unit",
            "Dysport (per unit)",
            (6.0, 4.0),
        );
        for row in [botox, filler, ipl, hydrafacial, miami] {
            store.insert_deal(row).await;
        }

        store
            .insert_claim(ClaimRow {
                id: seed_ids::CLAIM,
                deal_id: seed_ids::BOTOX_DEAL,
                consumer_name: "Sam Rivera".into(),
                consumer_email: "sam@example.com".into(),
                consumer_phone: None,
                status: "contacted".into(),
                created_at: created,
                updated_at: created,
            })
            .await;
        store
            .insert_message(MessageRow {
                id: Uuid::from_u128(0x6000),
                claim_id: seed_ids::CLAIM,
                sender: "business".into(),
                body: "Thanks for claiming! Does Thursday at 3pm work?".into(),
                created_at: created + Duration::hours(1),
            })
            .await;

        store
    }
}

/// Fixed ids used by [`MemoryStore::seeded`].
#[allow(missing_docs)]
pub mod seed_ids {
    use uuid::Uuid;

    pub const AUSTIN: Uuid = Uuid::from_u128(0x1001);
    pub const DALLAS: Uuid = Uuid::from_u128(0x1002);
    pub const MIAMI: Uuid = Uuid::from_u128(0x1003);
    pub const DENVER: Uuid = Uuid::from_u128(0x1004);
    pub const DOWNTOWN_AUSTIN: Uuid = Uuid::from_u128(0x2001);
    pub const DOMAIN_AUSTIN: Uuid = Uuid::from_u128(0x2002);
    pub const UPTOWN_DALLAS: Uuid = Uuid::from_u128(0x2003);
    pub const INJECTABLES: Uuid = Uuid::from_u128(0x3001);
    pub const LASER: Uuid = Uuid::from_u128(0x3002);
    pub const FACIALS: Uuid = Uuid::from_u128(0x3003);
    pub const BOTOX_DEAL: Uuid = Uuid::from_u128(0x4001);
    pub const FILLER_DEAL: Uuid = Uuid::from_u128(0x4002);
    pub const IPL_DEAL: Uuid = Uuid::from_u128(0x4003);
    pub const HYDRAFACIAL_DEAL: Uuid = Uuid::from_u128(0x4004);
    pub const MIAMI_DEAL: Uuid = Uuid::from_u128(0x4005);
    pub const CLAIM: Uuid = Uuid::from_u128(0x5001);
    pub const GLOW_MEDSPA: Uuid = Uuid::from_u128(0x7001);
    pub const ADMIN: Uuid = Uuid::from_u128(0x8001);
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn list_cities_with_offers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<DirectoryCity>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;

        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for deal in tables.deals.iter().filter(|d| row_is_live(d, now)) {
            *counts.entry(deal.city_id).or_default() += 1;
        }

        let mut rows: Vec<DirectoryCityRow> = tables
            .cities
            .iter()
            .filter(|c| c.is_active)
            .filter_map(|c| {
                counts.get(&c.id).map(|&offer_count| DirectoryCityRow {
                    city: c.clone(),
                    offer_count,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.city
                .name
                .cmp(&b.city.name)
                .then_with(|| a.city.id.cmp(&b.city.id))
        });
        rows.dedup_by_key(|r| r.city.id);
        Ok(convert_all(rows)?)
    }

    async fn get_city(&self, id: CityId) -> Result<Option<City>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let row = tables.cities.iter().find(|c| c.id == *id.as_uuid()).cloned();
        Ok(row.map(City::try_from).transpose()?)
    }

    async fn list_location_areas(&self, city_id: CityId) -> Result<Vec<LocationArea>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let mut rows: Vec<LocationAreaRow> = tables
            .areas
            .iter()
            .filter(|a| a.city_id == *city_id.as_uuid())
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(convert_all(rows)?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let mut rows = tables.categories.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(convert_all(rows)?)
    }

    async fn list_live_deals(
        &self,
        city_id: CityId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Deal>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let mut rows: Vec<DealRow> = tables
            .deals
            .iter()
            .filter(|d| d.city_id == *city_id.as_uuid() && row_is_live(d, now))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(convert_all(rows)?)
    }

    async fn get_deal(&self, id: DealId) -> Result<Option<Deal>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let row = tables.deals.iter().find(|d| d.id == *id.as_uuid()).cloned();
        Ok(row.map(Deal::try_from).transpose()?)
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let row = tables.claims.iter().find(|c| c.id == *id.as_uuid()).cloned();
        Ok(row.map(Claim::try_from).transpose()?)
    }

    async fn list_claims_for_business(
        &self,
        business_id: BusinessId,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let mut rows: Vec<ClaimRow> = tables
            .claims
            .iter()
            .filter(|c| {
                tables
                    .deals
                    .iter()
                    .any(|d| d.id == c.deal_id && d.business_id == *business_id.as_uuid())
            })
            .filter(|c| status.is_none_or(|s| c.status == s.as_str()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(convert_all(rows)?)
    }

    async fn list_messages_for_claim(&self, claim_id: ClaimId) -> Result<Vec<Message>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let mut rows: Vec<MessageRow> = tables
            .messages
            .iter()
            .filter(|m| m.claim_id == *claim_id.as_uuid())
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(convert_all(rows)?)
    }

    async fn get_business_owner(&self, id: BusinessId) -> Result<Option<BusinessOwner>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let row = tables
            .business_owners
            .iter()
            .find(|b| b.id == *id.as_uuid())
            .cloned();
        Ok(row.map(BusinessOwner::try_from).transpose()?)
    }

    async fn get_admin(&self, id: AdminId) -> Result<Option<Admin>, ApiError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let row = tables.admins.iter().find(|a| a.id == *id.as_uuid()).cloned();
        Ok(row.map(Admin::try_from).transpose()?)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_directory_excludes_inactive_and_offerless_cities() {
        let store = MemoryStore::seeded().await;
        let result = store.list_cities_with_offers(Utc::now()).await;
        let Ok(cities) = result else {
            panic!("directory query failed");
        };
        let names: Vec<&str> = cities.iter().map(|c| c.city.name.as_str()).collect();
        // Miami is inactive, Denver has no deals.
        assert_eq!(names, vec!["Austin", "Dallas"]);
        assert_eq!(cities.first().map(|c| c.offer_count), Some(2));
        // Dallas' HydraFacial deal is expired.
        assert_eq!(cities.get(1).map(|c| c.offer_count), Some(1));
    }

    #[tokio::test]
    async fn failure_is_reported_for_every_read() {
        let store = MemoryStore::seeded().await;
        store.set_failure(Some("connection reset")).await;
        let result = store.list_cities_with_offers(Utc::now()).await;
        assert!(matches!(result, Err(ApiError::QueryFailed(ref m)) if m == "connection reset"));
        assert!(store.list_categories().await.is_err());

        store.set_failure(None).await;
        assert!(store.list_categories().await.is_ok());
    }

    #[tokio::test]
    async fn claims_filtered_by_owner_and_status() {
        let store = MemoryStore::seeded().await;
        let owner = BusinessId::from_uuid(seed_ids::GLOW_MEDSPA);

        let all = store.list_claims_for_business(owner, None).await;
        assert_eq!(all.map(|c| c.len()).ok(), Some(1));

        let pending = store
            .list_claims_for_business(owner, Some(ClaimStatus::Pending))
            .await;
        assert_eq!(pending.map(|c| c.len()).ok(), Some(0));

        let stranger = store.list_claims_for_business(BusinessId::new(), None).await;
        assert_eq!(stranger.map(|c| c.len()).ok(), Some(0));
    }

    #[tokio::test]
    async fn invalid_row_fails_the_whole_read() {
        let store = MemoryStore::new();
        store
            .insert_category(CategoryRow {
                id: Uuid::new_v4(),
                name: String::new(),
                slug: "broken".into(),
                icon: None,
            })
            .await;
        let result = store.list_categories().await;
        assert!(matches!(result, Err(ApiError::QueryFailed(ref m)) if m.contains("name")));
    }
}
