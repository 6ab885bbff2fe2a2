//! Type-safe record identifiers.
//!
//! Every record kind gets its own newtype around [`uuid::Uuid`] so a
//! deal id cannot be passed where a city id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Creates a new random identifier (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wraps an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

record_id!(
    /// Identifier of a [`super::City`].
    CityId
);
record_id!(
    /// Identifier of a [`super::LocationArea`].
    AreaId
);
record_id!(
    /// Identifier of a deal category.
    CategoryId
);
record_id!(
    /// Identifier of a [`super::Deal`].
    DealId
);
record_id!(
    /// Identifier of a [`super::Claim`].
    ClaimId
);
record_id!(
    /// Identifier of a [`super::Message`].
    MessageId
);
record_id!(
    /// Identifier of a [`super::BusinessOwner`]; deals reference it as
    /// their owning business.
    BusinessId
);
record_id!(
    /// Identifier of an [`super::Admin`].
    AdminId
);
