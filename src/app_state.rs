//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::persistence::MarketplaceStore;
use crate::service::{AccountService, DirectoryService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// City/offer directory and its projections.
    pub directory: Arc<DirectoryService>,
    /// Permission-checked account reads.
    pub accounts: Arc<AccountService>,
    /// Site identity for SEO output.
    pub site: Arc<SiteConfig>,
}

impl AppState {
    /// Wires both services over one store.
    #[must_use]
    pub fn new(store: Arc<dyn MarketplaceStore>, site: SiteConfig) -> Self {
        Self {
            directory: Arc::new(DirectoryService::new(Arc::clone(&store))),
            accounts: Arc::new(AccountService::new(store)),
            site: Arc::new(site),
        }
    }
}
