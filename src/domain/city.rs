//! City reference data and its sub-regions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AreaId, CityId};

/// WGS-84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    /// Degrees north, within `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east, within `[-180, 180]`.
    pub longitude: f64,
}

/// A metro the marketplace operates in.
///
/// Immutable reference data; `is_active` gates visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// City identifier.
    pub id: CityId,
    /// Display name, e.g. `"Austin"`.
    pub name: String,
    /// Full state name.
    pub state: String,
    /// Two-letter upper-case state code.
    pub state_code: String,
    /// City center.
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// IANA timezone name.
    pub timezone: String,
    /// Whether the city is shown on discovery surfaces.
    pub is_active: bool,
}

/// A city eligible for the directory, with its live offer count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryCity {
    /// The city record.
    #[serde(flatten)]
    pub city: City,
    /// Number of live offers in the city; at least one.
    pub offer_count: u32,
}

/// Sub-region of a [`City`], e.g. a neighbourhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationArea {
    /// Area identifier.
    pub id: AreaId,
    /// Owning city.
    pub city_id: CityId,
    /// Display name.
    pub name: String,
    /// Area center.
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// Radius around the center, in miles.
    pub radius_miles: f64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn city_serializes_camel_case_with_flat_coordinates() {
        let city = City {
            id: CityId::new(),
            name: "Austin".into(),
            state: "Texas".into(),
            state_code: "TX".into(),
            coordinates: Coordinates {
                latitude: 30.27,
                longitude: -97.74,
            },
            timezone: "America/Chicago".into(),
            is_active: true,
        };
        let Ok(value) = serde_json::to_value(DirectoryCity {
            city,
            offer_count: 3,
        }) else {
            panic!("serialization failed");
        };
        assert_eq!(value["name"], "Austin");
        assert_eq!(value["stateCode"], "TX");
        assert_eq!(value["isActive"], true);
        assert_eq!(value["latitude"], 30.27);
        assert_eq!(value["offerCount"], 3);
    }
}
