//! Search-engine facing output: JSON-LD structured data, crawler policy
//! and the sitemap.
//!
//! Everything here is a pure function of [`crate::config::SiteConfig`]
//! (and, for the sitemap, the directory); nothing performs I/O.

pub mod robots;
pub mod schema;
pub mod sitemap;

pub use robots::{RobotsPolicy, RobotsRule, robots_policy};
pub use schema::{json_ld_script, organization_schema, website_schema};
pub use sitemap::build_sitemap;
