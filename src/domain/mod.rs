//! Domain layer: marketplace records, identifiers, boundary validation
//! and the request-scoped caller context.
//!
//! Records are passive: status fields describe where an entity stands,
//! but transitions are owned by the backend.

pub mod account;
pub mod city;
pub mod claim;
pub mod context;
pub mod deal;
pub mod ids;
pub mod validation;

pub use account::{Admin, BusinessOwner};
pub use city::{City, Coordinates, DirectoryCity, LocationArea};
pub use claim::{Claim, ClaimStatus, Message, MessageSender};
pub use context::{Identity, Permission, RequestContext};
pub use deal::{Category, Deal, DealStatus, HomepageCategory, HomepageDealPreview};
pub use ids::{AdminId, AreaId, BusinessId, CategoryId, CityId, ClaimId, DealId, MessageId};
pub use validation::{RecordCheck, ValidationError};
