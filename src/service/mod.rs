//! Service layer: read models over the marketplace store.
//!
//! [`DirectoryService`] serves the public city/offer directory and its
//! projections; [`AccountService`] serves permission-checked account
//! reads.

pub mod account_service;
pub mod directory_service;

pub use account_service::{AccountService, Profile};
pub use directory_service::{DirectoryService, HomepageSnapshot};
