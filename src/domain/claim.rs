//! Claims on deals and the messages exchanged about them.
//!
//! Status transitions are owned by the backend; these types only carry
//! the current value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ClaimId, DealId, MessageId};

/// Where a claim stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Submitted by the consumer, not yet handled.
    Pending,
    /// The business reached out to the consumer.
    Contacted,
    /// An appointment was booked.
    Booked,
    /// The service was delivered.
    Completed,
    /// Withdrawn by either party.
    Cancelled,
    /// Lapsed without being booked.
    Expired,
}

impl ClaimStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Contacted,
        Self::Booked,
        Self::Completed,
        Self::Cancelled,
        Self::Expired,
    ];

    /// Parses the stored status string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value.trim())
    }

    /// Returns the stored status string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Booked => "booked",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// `true` for statuses no claim leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Expired)
    }
}

/// A consumer's request to redeem a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Claim identifier.
    pub id: ClaimId,
    /// Claimed deal.
    pub deal_id: DealId,
    /// Consumer's name.
    pub consumer_name: String,
    /// Consumer's email.
    pub consumer_email: String,
    /// Consumer's phone number.
    pub consumer_phone: Option<String>,
    /// Current status.
    pub status: ClaimStatus,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Author of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    /// The consumer who filed the claim.
    Consumer,
    /// The business owning the deal.
    Business,
    /// Marketplace staff.
    Admin,
}

impl MessageSender {
    /// Parses the stored sender string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "consumer" => Some(Self::Consumer),
            "business" => Some(Self::Business),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A note attached to a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: MessageId,
    /// Claim the message belongs to.
    pub claim_id: ClaimId,
    /// Author.
    pub sender: MessageSender,
    /// Message text.
    pub body: String,
    /// Send timestamp.
    pub created_at: DateTime<Utc>,
}
