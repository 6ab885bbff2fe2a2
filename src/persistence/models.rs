//! Database rows and their validated conversion into domain records.
//!
//! Rows mirror the table columns one-to-one. Every `TryFrom<Row>` impl
//! is the validation boundary: a row either becomes a well-formed record
//! or a [`ValidationError`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Admin, AdminId, AreaId, BusinessId, BusinessOwner, Category, CategoryId, City, CityId, Claim,
    ClaimId, ClaimStatus, Coordinates, Deal, DealId, DealStatus, DirectoryCity, LocationArea,
    Message, MessageId, MessageSender, RecordCheck, ValidationError,
};

/// A row from the `cities` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CityRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Full state name.
    pub state: String,
    /// Two-letter state code.
    pub state_code: String,
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// IANA timezone.
    pub timezone: String,
    /// Visibility flag.
    pub is_active: bool,
}

impl TryFrom<CityRow> for City {
    type Error = ValidationError;

    fn try_from(row: CityRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("city", row.id);
        Ok(Self {
            id: CityId::from_uuid(row.id),
            name: check.text("name", row.name)?,
            state: check.text("state", row.state)?,
            state_code: check.state_code(row.state_code)?,
            coordinates: Coordinates {
                latitude: check.latitude(row.latitude)?,
                longitude: check.longitude(row.longitude)?,
            },
            timezone: check.text("timezone", row.timezone)?,
            is_active: row.is_active,
        })
    }
}

/// A city row joined with its live offer count.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct DirectoryCityRow {
    /// City columns.
    #[sqlx(flatten)]
    pub city: CityRow,
    /// `COUNT(*)` of live deals.
    pub offer_count: i64,
}

impl TryFrom<DirectoryCityRow> for DirectoryCity {
    type Error = ValidationError;

    fn try_from(row: DirectoryCityRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("city", row.city.id);
        let offer_count = u32::try_from(row.offer_count).map_err(|_| {
            check.invalid("offer_count", format!("out of range: {}", row.offer_count))
        })?;
        Ok(Self {
            city: City::try_from(row.city)?,
            offer_count,
        })
    }
}

/// A row from the `location_areas` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LocationAreaRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning city.
    pub city_id: Uuid,
    /// Display name.
    pub name: String,
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Radius in miles.
    pub radius_miles: f64,
}

impl TryFrom<LocationAreaRow> for LocationArea {
    type Error = ValidationError;

    fn try_from(row: LocationAreaRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("location area", row.id);
        Ok(Self {
            id: AreaId::from_uuid(row.id),
            city_id: CityId::from_uuid(row.city_id),
            name: check.text("name", row.name)?,
            coordinates: Coordinates {
                latitude: check.latitude(row.latitude)?,
                longitude: check.longitude(row.longitude)?,
            },
            radius_miles: check.non_negative("radius_miles", row.radius_miles)?,
        })
    }
}

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CategoryRow {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Icon name.
    pub icon: Option<String>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = ValidationError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("category", row.id);
        Ok(Self {
            id: CategoryId::from_uuid(row.id),
            name: check.text("name", row.name)?,
            slug: check.text("slug", row.slug)?,
            icon: check.optional_text(row.icon),
        })
    }
}

/// A row from the `deals` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct DealRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning business.
    pub business_id: Uuid,
    /// City.
    pub city_id: Uuid,
    /// Optional location area.
    pub location_area_id: Option<Uuid>,
    /// Category.
    pub category_id: Uuid,
    /// Listing title.
    pub title: String,
    /// Long description.
    pub description: Option<String>,
    /// Listing source.
    pub source: String,
    /// Layout template.
    pub template_type: String,
    /// Service name.
    pub service_name: String,
    /// Regular price.
    pub original_price: f64,
    /// Deal price.
    pub discount_price: f64,
    /// Status string.
    pub status: String,
    /// Window start.
    pub starts_at: Option<DateTime<Utc>>,
    /// Window end.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DealRow> for Deal {
    type Error = ValidationError;

    fn try_from(row: DealRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("deal", row.id);
        if let (Some(start), Some(end)) = (row.starts_at, row.expires_at)
            && end < start
        {
            return Err(check.invalid("expires_at", "is before starts_at"));
        }
        Ok(Self {
            id: DealId::from_uuid(row.id),
            business_id: BusinessId::from_uuid(row.business_id),
            city_id: CityId::from_uuid(row.city_id),
            location_area_id: row.location_area_id.map(AreaId::from_uuid),
            category_id: CategoryId::from_uuid(row.category_id),
            title: check.text("title", row.title)?,
            description: check.optional_text(row.description),
            source: check.text("source", row.source)?,
            template_type: check.text("template_type", row.template_type)?,
            service_name: check.text("service_name", row.service_name)?,
            original_price: check.non_negative("original_price", row.original_price)?,
            discount_price: check.non_negative("discount_price", row.discount_price)?,
            status: check.status(&row.status, DealStatus::parse)?,
            starts_at: row.starts_at,
            expires_at: row.expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `claims` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ClaimRow {
    /// Primary key.
    pub id: Uuid,
    /// Claimed deal.
    pub deal_id: Uuid,
    /// Consumer name.
    pub consumer_name: String,
    /// Consumer email.
    pub consumer_email: String,
    /// Consumer phone.
    pub consumer_phone: Option<String>,
    /// Status string.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = ValidationError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("claim", row.id);
        Ok(Self {
            id: ClaimId::from_uuid(row.id),
            deal_id: DealId::from_uuid(row.deal_id),
            consumer_name: check.text("consumer_name", row.consumer_name)?,
            consumer_email: check.email(row.consumer_email)?,
            consumer_phone: check.optional_text(row.consumer_phone),
            status: check.status(&row.status, ClaimStatus::parse)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MessageRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning claim.
    pub claim_id: Uuid,
    /// Sender string.
    pub sender: String,
    /// Message text.
    pub body: String,
    /// Send timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = ValidationError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("message", row.id);
        let sender = MessageSender::parse(&row.sender)
            .ok_or_else(|| check.invalid("sender", format!("unknown value {:?}", row.sender)))?;
        Ok(Self {
            id: MessageId::from_uuid(row.id),
            claim_id: ClaimId::from_uuid(row.claim_id),
            sender,
            body: check.text("body", row.body)?,
            created_at: row.created_at,
        })
    }
}

/// A row from the `business_owners` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BusinessOwnerRow {
    /// Primary key.
    pub id: Uuid,
    /// Public business name.
    pub business_name: String,
    /// Contact person.
    pub contact_name: String,
    /// Email.
    pub email: String,
    /// Phone.
    pub phone: Option<String>,
    /// Home city.
    pub city_id: Option<Uuid>,
    /// Verification flag.
    pub is_verified: bool,
    /// Signup timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BusinessOwnerRow> for BusinessOwner {
    type Error = ValidationError;

    fn try_from(row: BusinessOwnerRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("business owner", row.id);
        Ok(Self {
            id: BusinessId::from_uuid(row.id),
            business_name: check.text("business_name", row.business_name)?,
            contact_name: check.text("contact_name", row.contact_name)?,
            email: check.email(row.email)?,
            phone: check.optional_text(row.phone),
            city_id: row.city_id.map(CityId::from_uuid),
            is_verified: row.is_verified,
            created_at: row.created_at,
        })
    }
}

/// A row from the `admins` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AdminRow {
    /// Primary key.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = ValidationError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let check = RecordCheck::new("admin", row.id);
        Ok(Self {
            id: AdminId::from_uuid(row.id),
            email: check.email(row.email)?,
            display_name: check.text("display_name", row.display_name)?,
            created_at: row.created_at,
        })
    }
}

/// Converts a batch of rows, failing the whole batch on the first
/// invalid row.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, ValidationError>
where
    T: TryFrom<R, Error = ValidationError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_row() -> CityRow {
        CityRow {
            id: Uuid::new_v4(),
            name: " Austin ".into(),
            state: "Texas".into(),
            state_code: "tx".into(),
            latitude: 30.2672,
            longitude: -97.7431,
            timezone: "America/Chicago".into(),
            is_active: true,
        }
    }

    #[test]
    fn valid_city_row_converts() {
        let row = city_row();
        let id = row.id;
        let city = City::try_from(row);
        assert!(city.is_ok());
        if let Ok(city) = city {
            assert_eq!(*city.id.as_uuid(), id);
            assert_eq!(city.name, "Austin");
            assert_eq!(city.state_code, "TX");
        }
    }

    #[test]
    fn invalid_city_row_names_the_field() {
        let mut row = city_row();
        row.latitude = 120.0;
        let err = City::try_from(row).err();
        assert_eq!(err.map(|e| e.field), Some("latitude"));
    }

    #[test]
    fn negative_offer_count_rejected() {
        let row = DirectoryCityRow {
            city: city_row(),
            offer_count: -1,
        };
        assert!(DirectoryCity::try_from(row).is_err());
    }

    #[test]
    fn deal_with_unknown_status_rejected() {
        let now = Utc::now();
        let row = DealRow {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            city_id: Uuid::new_v4(),
            location_area_id: None,
            category_id: Uuid::new_v4(),
            title: "Lip filler".into(),
            description: Some("  ".into()),
            source: "business".into(),
            template_type: "standard".into(),
            service_name: "Juvederm".into(),
            original_price: 700.0,
            discount_price: 499.0,
            status: "published".into(),
            starts_at: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        };
        let err = Deal::try_from(row.clone()).err();
        assert_eq!(err.map(|e| e.field), Some("status"));

        let ok = Deal::try_from(DealRow {
            status: "active".into(),
            ..row
        });
        assert!(matches!(ok, Ok(Deal { description: None, .. })));
    }

    #[test]
    fn convert_all_is_all_or_nothing() {
        let mut bad = city_row();
        bad.name = String::new();
        let result: Result<Vec<City>, _> = convert_all(vec![city_row(), bad]);
        assert!(result.is_err());

        let result: Result<Vec<City>, _> = convert_all(vec![city_row(), city_row()]);
        assert_eq!(result.map(|v| v.len()).ok(), Some(2));
    }
}
