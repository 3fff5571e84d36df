use crate::client::TradeOfferState;
use offerbot_types::{OfferId, SteamId};

/// Offer lifecycle notifications as surfaced by the network session.
///
/// Delivery is at-least-once. Consumers must tolerate the same change
/// arriving twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferEvent {
    /// An offer we sent moved between states.
    SentOfferChanged {
        offer_id: OfferId,
        old_state: TradeOfferState,
        new_state: TradeOfferState,
    },
    /// The session noticed an outgoing offer it has no record of,
    /// typically after a restart.
    UnknownOfferSent { offer_id: OfferId },
    /// A sent offer stuck in pending confirmation was cancelled by the
    /// network.
    SentPendingCancelled { offer_id: OfferId },
    /// Someone sent an offer to us.
    NewOffer { offer_id: OfferId, partner: SteamId },
}
