//! Request-scoped caller context.
//!
//! Authentication happens upstream; the fronting auth layer forwards the
//! resolved subject and role as headers. Each request builds its own
//! [`RequestContext`] from those headers. Nothing here is process-wide.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use super::{AdminId, BusinessId};
use crate::error::ApiError;

/// Header carrying the authenticated subject id (a UUID).
pub const SUBJECT_HEADER: &str = "x-costfinders-subject";

/// Header carrying the authenticated role.
pub const ROLE_HEADER: &str = "x-costfinders-role";

/// Header carrying the caller-supplied request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Who is calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// No resolved identity; public reads only.
    Anonymous,
    /// A signed-in business owner.
    BusinessOwner(BusinessId),
    /// A signed-in admin.
    Admin(AdminId),
}

/// Capability checked by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read public directory and deal data.
    ReadPublic,
    /// Read claims and messages on the caller's own deals.
    ReadOwnClaims,
    /// Read every claim and message.
    ReadAllClaims,
}

impl Identity {
    /// Permissions granted to this identity.
    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Anonymous => &[Permission::ReadPublic],
            Self::BusinessOwner(_) => &[Permission::ReadPublic, Permission::ReadOwnClaims],
            Self::Admin(_) => &[Permission::ReadPublic, Permission::ReadAllClaims],
        }
    }

    /// Resolves an identity from the forwarded auth headers.
    ///
    /// Missing, unknown or malformed values resolve to
    /// [`Identity::Anonymous`].
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        };
        let Some(subject) = header(SUBJECT_HEADER).and_then(|s| s.parse::<uuid::Uuid>().ok())
        else {
            return Self::Anonymous;
        };
        match header(ROLE_HEADER) {
            Some("business_owner") => Self::BusinessOwner(BusinessId::from_uuid(subject)),
            Some("admin") => Self::Admin(AdminId::from_uuid(subject)),
            _ => Self::Anonymous,
        }
    }
}

/// Identity and correlation id resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id, echoed from `x-request-id` or generated.
    pub request_id: String,
    /// Resolved caller.
    pub identity: Identity,
}

impl RequestContext {
    /// Context for an unauthenticated caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            identity: Identity::Anonymous,
        }
    }

    /// Context for a resolved identity.
    #[must_use]
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity,
            ..Self::anonymous()
        }
    }

    /// Builds the context from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= 128)
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
        Self {
            request_id,
            identity: Identity::from_headers(headers),
        }
    }

    /// Returns `true` if the caller holds `permission`.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.identity.permissions().contains(&permission)
    }

    /// Requires a business owner identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for anonymous callers and
    /// [`ApiError::Forbidden`] for other roles.
    pub fn require_business(&self) -> Result<BusinessId, ApiError> {
        match self.identity {
            Identity::BusinessOwner(id) if self.can(Permission::ReadOwnClaims) => Ok(id),
            _ => Err(self.denied("business owner account required")),
        }
    }

    /// Checks read access to claims on deals owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for anonymous callers and
    /// [`ApiError::Forbidden`] when the caller neither owns the deal nor
    /// reads all claims.
    pub fn authorize_claim_read(&self, owner: BusinessId) -> Result<(), ApiError> {
        if self.can(Permission::ReadAllClaims) {
            return Ok(());
        }
        if !self.can(Permission::ReadOwnClaims) {
            return Err(self.denied("claim read not permitted"));
        }
        match self.identity {
            Identity::BusinessOwner(id) if id == owner => Ok(()),
            _ => Err(ApiError::Forbidden("claim belongs to another business".to_string())),
        }
    }

    /// 401 for anonymous callers, 403 with `reason` otherwise.
    fn denied(&self, reason: &str) -> ApiError {
        match self.identity {
            Identity::Anonymous => ApiError::Unauthorized,
            _ => ApiError::Forbidden(reason.to_string()),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            if let Ok(v) = HeaderValue::from_str(value) {
                map.insert(*name, v);
            }
        }
        map
    }

    #[test]
    fn missing_headers_resolve_to_anonymous() {
        let ctx = RequestContext::from_headers(&HeaderMap::new());
        assert_eq!(ctx.identity, Identity::Anonymous);
        assert!(!ctx.request_id.is_empty());
        assert!(ctx.can(Permission::ReadPublic));
        assert!(!ctx.can(Permission::ReadOwnClaims));
    }

    #[test]
    fn business_owner_resolved() {
        let id = uuid::Uuid::new_v4();
        let ctx = RequestContext::from_headers(&headers(&[
            (SUBJECT_HEADER, &id.to_string()),
            (ROLE_HEADER, "business_owner"),
            (REQUEST_ID_HEADER, "req-42"),
        ]));
        assert_eq!(ctx.identity, Identity::BusinessOwner(BusinessId::from_uuid(id)));
        assert_eq!(ctx.request_id, "req-42");
        assert_eq!(ctx.require_business().ok(), Some(BusinessId::from_uuid(id)));
    }

    #[test]
    fn malformed_subject_or_role_is_anonymous() {
        let ctx = RequestContext::from_headers(&headers(&[
            (SUBJECT_HEADER, "not-a-uuid"),
            (ROLE_HEADER, "admin"),
        ]));
        assert_eq!(ctx.identity, Identity::Anonymous);

        let ctx = RequestContext::from_headers(&headers(&[
            (SUBJECT_HEADER, &uuid::Uuid::new_v4().to_string()),
            (ROLE_HEADER, "superuser"),
        ]));
        assert_eq!(ctx.identity, Identity::Anonymous);
    }

    #[test]
    fn claim_read_authorization() {
        let owner = BusinessId::new();
        let other = BusinessId::new();

        let as_owner = RequestContext::with_identity(Identity::BusinessOwner(owner));
        assert!(as_owner.authorize_claim_read(owner).is_ok());
        assert!(matches!(
            as_owner.authorize_claim_read(other),
            Err(ApiError::Forbidden(_))
        ));

        let as_admin = RequestContext::with_identity(Identity::Admin(AdminId::new()));
        assert!(as_admin.authorize_claim_read(other).is_ok());
        assert!(matches!(as_admin.require_business(), Err(ApiError::Forbidden(_))));

        let anon = RequestContext::anonymous();
        assert!(matches!(
            anon.authorize_claim_read(owner),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn claim_access_follows_permission_table() {
        let owner = BusinessId::new();
        let as_owner = RequestContext::with_identity(Identity::BusinessOwner(owner));
        assert!(as_owner.can(Permission::ReadOwnClaims));
        assert!(!as_owner.can(Permission::ReadAllClaims));
        assert_eq!(as_owner.require_business().ok(), Some(owner));

        let as_admin = RequestContext::with_identity(Identity::Admin(AdminId::new()));
        assert!(!as_admin.can(Permission::ReadOwnClaims));
        assert!(as_admin.can(Permission::ReadAllClaims));

        let anon = RequestContext::anonymous();
        assert!(matches!(anon.require_business(), Err(ApiError::Unauthorized)));
    }
}
