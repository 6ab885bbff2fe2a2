//! Persistence layer: read access to the hosted marketplace database.
//!
//! [`MarketplaceStore`] is the contract the rest of the service consumes.
//! [`PostgresStore`] runs it against PostgreSQL with `sqlx::PgPool`;
//! [`MemoryStore`] keeps rows in process for local runs and tests.
//! Both convert rows through the validating `TryFrom` impls in
//! [`models`].

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::{
    Admin, AdminId, BusinessId, BusinessOwner, Category, City, CityId, Claim, ClaimId,
    ClaimStatus, Deal, DealId, DirectoryCity, LocationArea, Message,
};
use crate::error::ApiError;

/// Read contract over the marketplace database.
///
/// Every method is a single read. Failures surface as
/// [`ApiError::QueryFailed`] and carry no partial result.
#[async_trait]
pub trait MarketplaceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Active cities with at least one deal live at `now`, each with its
    /// live deal count.
    async fn list_cities_with_offers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<DirectoryCity>, ApiError>;

    /// Looks up a city by id regardless of its active flag.
    async fn get_city(&self, id: CityId) -> Result<Option<City>, ApiError>;

    /// Location areas of a city.
    async fn list_location_areas(&self, city_id: CityId) -> Result<Vec<LocationArea>, ApiError>;

    /// All deal categories.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Deals in `city_id` that are live at `now`.
    async fn list_live_deals(
        &self,
        city_id: CityId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Deal>, ApiError>;

    /// Looks up a deal by id regardless of status.
    async fn get_deal(&self, id: DealId) -> Result<Option<Deal>, ApiError>;

    /// Looks up a claim by id.
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, ApiError>;

    /// Claims on deals owned by `business_id`, newest first, optionally
    /// filtered by status.
    async fn list_claims_for_business(
        &self,
        business_id: BusinessId,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, ApiError>;

    /// Messages on a claim, oldest first.
    async fn list_messages_for_claim(&self, claim_id: ClaimId) -> Result<Vec<Message>, ApiError>;

    /// Looks up a business owner profile.
    async fn get_business_owner(&self, id: BusinessId) -> Result<Option<BusinessOwner>, ApiError>;

    /// Looks up an admin profile.
    async fn get_admin(&self, id: AdminId) -> Result<Option<Admin>, ApiError>;
}
