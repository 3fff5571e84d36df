use crate::draft::TradeOfferDraft;
use async_trait::async_trait;
use offerbot_types::{EscrowDurations, InventorySnapshot, ItemSpec, OfferId, SteamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offer states as the trading network reports them in change
/// notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOfferState {
    Active,
    Accepted,
    Declined,
    Countered,
    Expired,
    Canceled,
    InvalidItems,
    CreatedNeedsConfirmation,
    CanceledBySecondFactor,
    InEscrow,
}

/// What the network said when it took a freshly created offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferSendState {
    /// Offer is live and visible to the counterparty.
    Sent,
    /// Offer was accepted by the network but needs mobile confirmation
    /// before it goes live.
    PendingConfirmation,
}

/// Result of a successful offer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentOffer {
    pub id: OfferId,
    pub state: OfferSendState,
}

#[derive(Debug, Error)]
pub enum SteamError {
    #[error("network request failed: {0}")]
    RequestFailed(String),

    #[error("not logged on to the trading network")]
    NotLoggedOn,

    #[error("offer {0} not found")]
    OfferNotFound(OfferId),
}

/// Read access to inventories on the trading network.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Snapshot our own inventory for an app/context pair.
    async fn bot_inventory(
        &self,
        app_id: u32,
        context_id: u64,
        tradable_only: bool,
    ) -> Result<InventorySnapshot, SteamError>;

    /// Snapshot a counterparty's inventory for an app/context pair.
    async fn partner_inventory(
        &self,
        partner: &SteamId,
        app_id: u32,
        context_id: u64,
        tradable_only: bool,
    ) -> Result<InventorySnapshot, SteamError>;
}

/// Escrow duration lookups.
#[async_trait]
pub trait EscrowClient: Send + Sync {
    /// How long each party's items would be held if an offer were
    /// accepted right now. The token lets us query counterparties we
    /// are not friends with.
    async fn escrow_durations(
        &self,
        partner: &SteamId,
        token: Option<&str>,
    ) -> Result<EscrowDurations, SteamError>;
}

/// Offer creation and management on the trading network.
#[async_trait]
pub trait TradeOfferClient: Send + Sync {
    async fn send_offer(
        &self,
        draft: &TradeOfferDraft,
        message: &str,
        token: Option<&str>,
    ) -> Result<SentOffer, SteamError>;

    async fn cancel_offer(&self, offer_id: &OfferId) -> Result<(), SteamError>;

    async fn decline_offer(&self, offer_id: &OfferId) -> Result<(), SteamError>;

    /// Items we received from an offer that reached acceptance.
    async fn received_items(&self, offer_id: &OfferId) -> Result<Vec<ItemSpec>, SteamError>;
}
