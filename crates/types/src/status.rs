use crate::offer::OfferId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade status vocabulary shared with the record service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Pending,
    Sent,
    Accepted,
    Declined,
    Cancelled,
    Error,
}

impl TradeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TradeStatus::Pending => "pending",
            TradeStatus::Sent => "sent",
            TradeStatus::Accepted => "accepted",
            TradeStatus::Declined => "declined",
            TradeStatus::Cancelled => "cancelled",
            TradeStatus::Error => "error",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a status update is keyed at the record service.
///
/// Before an offer exists (intake and pre-send failures) the only handle
/// is the verification code. Once the network has assigned an offer id,
/// updates are keyed by that instead. Exactly one of the two goes on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKey {
    OfferId(OfferId),
    VerificationCode(String),
}

/// A single status update destined for the record service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub key: StatusKey,
    pub status: TradeStatus,
    /// Human-readable failure detail, carried on error pushes.
    pub message: Option<String>,
}

impl StatusRecord {
    pub fn for_offer(offer_id: OfferId, status: TradeStatus) -> Self {
        Self {
            key: StatusKey::OfferId(offer_id),
            status,
            message: None,
        }
    }

    pub fn for_verification(code: impl Into<String>, status: TradeStatus) -> Self {
        Self {
            key: StatusKey::VerificationCode(code.into()),
            status,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
