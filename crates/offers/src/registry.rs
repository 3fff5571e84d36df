use chrono::Utc;
use offerbot_types::{OfferId, OfferRecord, OfferState};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// What happened when a state transition was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    /// The offer already reached a terminal state. Terminal states are
    /// never left, so the request is dropped.
    AlreadyTerminal,
    NotFound,
}

/// In-memory ledger of offers this process has sent.
///
/// The registry survives only as long as the process. Offers from
/// before a restart show up as unknown, which the lifecycle router
/// handles by cancelling them.
#[derive(Debug, Default)]
pub struct OfferRegistry {
    offers: RwLock<HashMap<OfferId, OfferRecord>>,
}

impl OfferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: OfferRecord) {
        let mut offers = self.offers.write().await;
        offers.insert(record.offer_id.clone(), record);
    }

    pub async fn get(&self, offer_id: &OfferId) -> Option<OfferRecord> {
        self.offers.read().await.get(offer_id).cloned()
    }

    /// Whether the offer is known and already terminal. Unknown offers
    /// read as non-terminal.
    pub async fn is_terminal(&self, offer_id: &OfferId) -> bool {
        self.offers
            .read()
            .await
            .get(offer_id)
            .map(|record| record.state.is_terminal())
            .unwrap_or(false)
    }

    /// Move an offer to a new state. Terminal records are left alone.
    pub async fn transition(&self, offer_id: &OfferId, to: OfferState) -> TransitionOutcome {
        let mut offers = self.offers.write().await;
        match offers.get_mut(offer_id) {
            None => TransitionOutcome::NotFound,
            Some(record) if record.state.is_terminal() => TransitionOutcome::AlreadyTerminal,
            Some(record) => {
                info!(
                    offer_id = %offer_id,
                    from = %record.state,
                    to = %to,
                    "Offer state transition"
                );
                record.state = to;
                record.updated_at = Utc::now().timestamp() as u64;
                TransitionOutcome::Applied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerbot_types::SteamId;

    fn record(offer_id: &str, state: OfferState) -> OfferRecord {
        OfferRecord {
            offer_id: OfferId::new(offer_id),
            partner: SteamId::new("76561198000000001"),
            verification_code: "VX91KQ".to_string(),
            state,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let registry = OfferRegistry::new();
        registry.insert(record("offer-1", OfferState::Sent)).await;

        let stored = registry.get(&OfferId::new("offer-1")).await.unwrap();
        assert_eq!(stored.state, OfferState::Sent);
        assert!(registry.get(&OfferId::new("offer-2")).await.is_none());
    }

    #[tokio::test]
    async fn transitions_walk_forward_and_stop_at_terminal() {
        let registry = OfferRegistry::new();
        registry.insert(record("offer-1", OfferState::Created)).await;

        assert_eq!(
            registry
                .transition(&OfferId::new("offer-1"), OfferState::Sent)
                .await,
            TransitionOutcome::Applied
        );
        assert_eq!(
            registry
                .transition(&OfferId::new("offer-1"), OfferState::Accepted)
                .await,
            TransitionOutcome::Applied
        );
        assert_eq!(
            registry
                .transition(&OfferId::new("offer-1"), OfferState::Cancelled)
                .await,
            TransitionOutcome::AlreadyTerminal
        );

        let stored = registry.get(&OfferId::new("offer-1")).await.unwrap();
        assert_eq!(stored.state, OfferState::Accepted);
    }

    #[tokio::test]
    async fn unknown_offers_read_as_non_terminal() {
        let registry = OfferRegistry::new();
        assert!(!registry.is_terminal(&OfferId::new("offer-9")).await);
        assert_eq!(
            registry
                .transition(&OfferId::new("offer-9"), OfferState::Cancelled)
                .await,
            TransitionOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn terminal_flag_follows_the_record() {
        let registry = OfferRegistry::new();
        registry.insert(record("offer-1", OfferState::Sent)).await;
        assert!(!registry.is_terminal(&OfferId::new("offer-1")).await);

        registry
            .transition(&OfferId::new("offer-1"), OfferState::Declined)
            .await;
        assert!(registry.is_terminal(&OfferId::new("offer-1")).await);
    }
}
