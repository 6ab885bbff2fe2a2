//! # costfinders-api
//!
//! Read-side HTTP service for the CostFinders medspa deals marketplace.
//!
//! Serves the city/offer directory (active cities that have at least one
//! live deal), the per-city homepage aggregation, permission-checked
//! claim inboxes, and the SEO surface: `robots.txt`, `sitemap.xml` and
//! schema.org JSON-LD. Writes are owned by the hosted backend; this
//! service only reads.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser, SSR frontend, crawlers)
//!     │
//!     ├── REST Handlers (api/)  ── RequestContext per request
//!     ├── SEO emitters (seo/)
//!     │
//!     ├── DirectoryService / AccountService (service/)
//!     │
//!     ├── MarketplaceStore (persistence/)
//!     │       ├── PostgresStore (sqlx)
//!     │       └── MemoryStore
//!     │
//!     └── Domain records + boundary validation (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod persistence;
pub mod seo;
pub mod service;
