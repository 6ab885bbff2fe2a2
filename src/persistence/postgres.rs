//! PostgreSQL implementation of [`MarketplaceStore`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::MarketplaceStore;
use super::models::{
    AdminRow, BusinessOwnerRow, CategoryRow, CityRow, ClaimRow, DealRow, DirectoryCityRow,
    LocationAreaRow, MessageRow, convert_all,
};
use crate::config::AppConfig;
use crate::domain::{
    Admin, AdminId, BusinessId, BusinessOwner, Category, City, CityId, Claim, ClaimId,
    ClaimStatus, Deal, DealId, DirectoryCity, LocationArea, Message,
};
use crate::error::ApiError;

const CITY_COLUMNS: &str =
    "c.id, c.name, c.state, c.state_code, c.latitude, c.longitude, c.timezone, c.is_active";

const DEAL_COLUMNS: &str = "d.id, d.business_id, d.city_id, d.location_area_id, d.category_id, \
     d.title, d.description, d.source, d.template_type, d.service_name, d.original_price, \
     d.discount_price, d.status, d.starts_at, d.expires_at, d.created_at, d.updated_at";

const CLAIM_COLUMNS: &str = "cl.id, cl.deal_id, cl.consumer_name, cl.consumer_email, \
     cl.consumer_phone, cl.status, cl.created_at, cl.updated_at";

/// Predicate selecting deals live at bind parameter `$1`.
const LIVE_DEAL_PREDICATE: &str = "d.status = 'active' \
     AND (d.starts_at IS NULL OR d.starts_at <= $1) \
     AND (d.expires_at IS NULL OR d.expires_at > $1)";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::QueryFailed`] if the database is unreachable.
    pub async fn connect(config: &AppConfig) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        tracing::info!(
            max_connections = config.database_max_connections,
            "database pool ready"
        );
        Ok(Self::new(pool))
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Internal(format!("migration failed: {e}")))
    }
}

#[async_trait]
impl MarketplaceStore for PostgresStore {
    async fn list_cities_with_offers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<DirectoryCity>, ApiError> {
        let sql = format!(
            "SELECT {CITY_COLUMNS}, COUNT(d.id) AS offer_count \
             FROM cities c JOIN deals d ON d.city_id = c.id \
             WHERE c.is_active = TRUE AND {LIVE_DEAL_PREDICATE} \
             GROUP BY c.id \
             ORDER BY c.name ASC, c.id ASC"
        );
        let rows = sqlx::query_as::<_, DirectoryCityRow>(&sql)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        Ok(convert_all(rows)?)
    }

    async fn get_city(&self, id: CityId) -> Result<Option<City>, ApiError> {
        let sql = format!("SELECT {CITY_COLUMNS} FROM cities c WHERE c.id = $1");
        let row = sqlx::query_as::<_, CityRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(City::try_from).transpose()?)
    }

    async fn list_location_areas(&self, city_id: CityId) -> Result<Vec<LocationArea>, ApiError> {
        let rows = sqlx::query_as::<_, LocationAreaRow>(
            "SELECT id, city_id, name, latitude, longitude, radius_miles \
             FROM location_areas WHERE city_id = $1 ORDER BY name ASC, id ASC",
        )
        .bind(city_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(convert_all(rows)?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, icon FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(convert_all(rows)?)
    }

    async fn list_live_deals(
        &self,
        city_id: CityId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Deal>, ApiError> {
        let sql = format!(
            "SELECT {DEAL_COLUMNS} FROM deals d \
             WHERE d.city_id = $2 AND {LIVE_DEAL_PREDICATE} \
             ORDER BY d.created_at DESC, d.id ASC"
        );
        let rows = sqlx::query_as::<_, DealRow>(&sql)
            .bind(now)
            .bind(city_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(convert_all(rows)?)
    }

    async fn get_deal(&self, id: DealId) -> Result<Option<Deal>, ApiError> {
        let sql = format!("SELECT {DEAL_COLUMNS} FROM deals d WHERE d.id = $1");
        let row = sqlx::query_as::<_, DealRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Deal::try_from).transpose()?)
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, ApiError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims cl WHERE cl.id = $1");
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Claim::try_from).transpose()?)
    }

    async fn list_claims_for_business(
        &self,
        business_id: BusinessId,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, ApiError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims cl JOIN deals d ON d.id = cl.deal_id \
             WHERE d.business_id = $1 AND ($2::text IS NULL OR cl.status = $2) \
             ORDER BY cl.created_at DESC, cl.id ASC"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(business_id.as_uuid())
            .bind(status.map(ClaimStatus::as_str))
            .fetch_all(&self.pool)
            .await?;
        Ok(convert_all(rows)?)
    }

    async fn list_messages_for_claim(&self, claim_id: ClaimId) -> Result<Vec<Message>, ApiError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, claim_id, sender, body, created_at FROM messages \
             WHERE claim_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(claim_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(convert_all(rows)?)
    }

    async fn get_business_owner(&self, id: BusinessId) -> Result<Option<BusinessOwner>, ApiError> {
        let row = sqlx::query_as::<_, BusinessOwnerRow>(
            "SELECT id, business_name, contact_name, email, phone, city_id, is_verified, created_at \
             FROM business_owners WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(BusinessOwner::try_from).transpose()?)
    }

    async fn get_admin(&self, id: AdminId) -> Result<Option<Admin>, ApiError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, email, display_name, created_at FROM admins WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Admin::try_from).transpose()?)
    }
}
