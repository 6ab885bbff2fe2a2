//! Account service: caller profiles and claim inboxes.
//!
//! Every method takes the [`RequestContext`] of the current request and
//! checks its permissions before reading.

use std::sync::Arc;

use crate::domain::{
    Admin, BusinessOwner, Claim, ClaimId, ClaimStatus, Identity, Message, RequestContext,
};
use crate::error::ApiError;
use crate::persistence::MarketplaceStore;

/// Profile of the caller behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    /// No resolved identity.
    Anonymous,
    /// A business owner account.
    BusinessOwner(BusinessOwner),
    /// An admin account.
    Admin(Admin),
}

/// Permission-checked reads of account-scoped records.
#[derive(Debug, Clone)]
pub struct AccountService {
    store: Arc<dyn MarketplaceStore>,
}

impl AccountService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketplaceStore>) -> Self {
        Self { store }
    }

    /// Resolves the caller's profile record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if the identity has no matching
    /// account, and [`ApiError::QueryFailed`] on store failure.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<Profile, ApiError> {
        match ctx.identity {
            Identity::Anonymous => Ok(Profile::Anonymous),
            Identity::BusinessOwner(id) => self
                .store
                .get_business_owner(id)
                .await?
                .map(Profile::BusinessOwner)
                .ok_or(ApiError::Unauthorized),
            Identity::Admin(id) => self
                .store
                .get_admin(id)
                .await?
                .map(Profile::Admin)
                .ok_or(ApiError::Unauthorized),
        }
    }

    /// Claims on the calling business owner's deals, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] / [`ApiError::Forbidden`] unless
    /// the caller is a business owner, and [`ApiError::QueryFailed`] on
    /// store failure.
    pub async fn business_claims(
        &self,
        ctx: &RequestContext,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, ApiError> {
        let business_id = ctx.require_business()?;
        let claims = self
            .store
            .list_claims_for_business(business_id, status)
            .await?;
        tracing::debug!(
            request_id = %ctx.request_id,
            %business_id,
            count = claims.len(),
            "business claims loaded"
        );
        Ok(claims)
    }

    /// Messages on a claim, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the claim or its deal is missing,
    /// [`ApiError::Unauthorized`] / [`ApiError::Forbidden`] if the caller
    /// may not read it, and [`ApiError::QueryFailed`] on store failure.
    pub async fn claim_messages(
        &self,
        ctx: &RequestContext,
        claim_id: ClaimId,
    ) -> Result<Vec<Message>, ApiError> {
        if matches!(ctx.identity, Identity::Anonymous) {
            return Err(ApiError::Unauthorized);
        }
        let claim = self
            .store
            .get_claim(claim_id)
            .await?
            .ok_or_else(|| ApiError::not_found("claim", claim_id))?;
        let deal = self
            .store
            .get_deal(claim.deal_id)
            .await?
            .ok_or_else(|| ApiError::not_found("deal", claim.deal_id))?;
        ctx.authorize_claim_read(deal.business_id)?;

        self.store.list_messages_for_claim(claim_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AdminId, BusinessId};
    use crate::persistence::MemoryStore;
    use crate::persistence::memory::seed_ids;

    async fn service() -> AccountService {
        AccountService::new(Arc::new(MemoryStore::seeded().await))
    }

    fn owner_ctx() -> RequestContext {
        RequestContext::with_identity(Identity::BusinessOwner(BusinessId::from_uuid(
            seed_ids::GLOW_MEDSPA,
        )))
    }

    fn admin_ctx() -> RequestContext {
        RequestContext::with_identity(Identity::Admin(AdminId::from_uuid(seed_ids::ADMIN)))
    }

    #[tokio::test]
    async fn profile_resolution() {
        let service = service().await;

        let anon = service.profile(&RequestContext::anonymous()).await;
        assert_eq!(anon.ok(), Some(Profile::Anonymous));

        let owner = service.profile(&owner_ctx()).await;
        assert!(
            matches!(owner, Ok(Profile::BusinessOwner(ref b)) if b.business_name == "Glow Medspa")
        );

        let admin = service.profile(&admin_ctx()).await;
        assert!(matches!(admin, Ok(Profile::Admin(_))));

        let ghost = RequestContext::with_identity(Identity::Admin(AdminId::new()));
        assert!(matches!(service.profile(&ghost).await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn business_claims_require_business_owner() {
        let service = service().await;

        let claims = service.business_claims(&owner_ctx(), None).await;
        assert_eq!(claims.map(|c| c.len()).ok(), Some(1));

        let anon = service.business_claims(&RequestContext::anonymous(), None).await;
        assert!(matches!(anon, Err(ApiError::Unauthorized)));

        let admin = service.business_claims(&admin_ctx(), None).await;
        assert!(matches!(admin, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn claim_messages_gated_by_ownership() {
        let service = service().await;
        let claim = ClaimId::from_uuid(seed_ids::CLAIM);

        let messages = service.claim_messages(&owner_ctx(), claim).await;
        assert_eq!(messages.map(|m| m.len()).ok(), Some(1));

        let messages = service.claim_messages(&admin_ctx(), claim).await;
        assert!(messages.is_ok());

        let stranger =
            RequestContext::with_identity(Identity::BusinessOwner(BusinessId::new()));
        let denied = service.claim_messages(&stranger, claim).await;
        assert!(matches!(denied, Err(ApiError::Forbidden(_))));

        let anon = service.claim_messages(&RequestContext::anonymous(), claim).await;
        assert!(matches!(anon, Err(ApiError::Unauthorized)));

        let missing = service.claim_messages(&admin_ctx(), ClaimId::new()).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }
}
