//! Claim, message and caller-profile DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Admin, BusinessOwner, Claim, ClaimStatus, Message};
use crate::service::Profile;

/// Query parameters for the business claim inbox.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClaimsParams {
    /// Optional status filter, e.g. `pending`.
    #[param(value_type = Option<String>)]
    pub status: Option<ClaimStatus>,
}

/// `GET /api/business/claims` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClaimsResponse {
    /// Claims on the caller's deals, newest first.
    pub claims: Vec<Claim>,
}

/// `GET /api/claims/{id}/messages` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagesResponse {
    /// Messages on the claim, oldest first.
    pub messages: Vec<Message>,
}

/// `GET /api/me` response, tagged by `role`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum MeResponse {
    /// No resolved identity.
    Anonymous,
    /// Signed in as a business owner.
    BusinessOwner {
        /// The business account.
        profile: BusinessOwner,
    },
    /// Signed in as an admin.
    Admin {
        /// The admin account.
        profile: Admin,
    },
}

impl From<Profile> for MeResponse {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Anonymous => Self::Anonymous,
            Profile::BusinessOwner(profile) => Self::BusinessOwner { profile },
            Profile::Admin(profile) => Self::Admin { profile },
        }
    }
}
