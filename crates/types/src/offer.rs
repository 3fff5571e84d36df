use crate::job::SteamId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the trading network assigns to a sent offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub String);

impl OfferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Local view of where a sent offer is in its life.
///
/// `Created` covers offers submitted to the network but still awaiting
/// mobile confirmation on our side. `Accepted`, `Declined` and
/// `Cancelled` are terminal and never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferState {
    Created,
    Sent,
    Accepted,
    Declined,
    Cancelled,
    Unknown,
}

impl OfferState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OfferState::Accepted | OfferState::Declined | OfferState::Cancelled
        )
    }
}

impl fmt::Display for OfferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfferState::Created => "created",
            OfferState::Sent => "sent",
            OfferState::Accepted => "accepted",
            OfferState::Declined => "declined",
            OfferState::Cancelled => "cancelled",
            OfferState::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Everything we remember about an offer we sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub offer_id: OfferId,
    pub partner: SteamId,
    pub verification_code: String,
    pub state: OfferState,
    pub created_at: u64,
    pub updated_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_exactly_accepted_declined_cancelled() {
        assert!(OfferState::Accepted.is_terminal());
        assert!(OfferState::Declined.is_terminal());
        assert!(OfferState::Cancelled.is_terminal());
        assert!(!OfferState::Created.is_terminal());
        assert!(!OfferState::Sent.is_terminal());
        assert!(!OfferState::Unknown.is_terminal());
    }
}
