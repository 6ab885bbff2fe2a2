//! Data Transfer Objects for REST request/response serialization.
//!
//! Response bodies use camelCase keys; domain records are embedded as
//! they serialize.

pub mod account_dto;
pub mod directory_dto;
pub mod seo_dto;

pub use account_dto::*;
pub use directory_dto::*;
pub use seo_dto::*;
