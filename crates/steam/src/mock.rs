use crate::client::{
    EscrowClient, InventoryClient, OfferSendState, SentOffer, SteamError, TradeOfferClient,
};
use crate::draft::TradeOfferDraft;
use async_trait::async_trait;
use offerbot_types::{EscrowDurations, InventorySnapshot, ItemSpec, OfferId, SteamId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the mock remembers about one offer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOffer {
    pub offer_id: OfferId,
    pub partner: SteamId,
    pub items_to_give: Vec<ItemSpec>,
    pub items_to_receive: Vec<ItemSpec>,
    pub message: String,
    pub token: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    partner_inventories: HashMap<String, InventorySnapshot>,
    bot_inventory: InventorySnapshot,
    escrows: HashMap<String, EscrowDurations>,
    sent: Vec<RecordedOffer>,
    cancelled: Vec<OfferId>,
    declined: Vec<OfferId>,
    received: HashMap<String, Vec<ItemSpec>>,
    next_offer_id: u64,
    send_state: Option<OfferSendState>,
    fail_inventory: bool,
    fail_escrow: bool,
    fail_send: bool,
    fail_cancel: bool,
    fail_received: bool,
    partner_fetches: u64,
    bot_fetches: u64,
    escrow_lookups: u64,
}

/// In-memory stand-in for the trading network, implementing all three
/// client seams. Unset escrow entries read as zero days on both sides.
#[derive(Debug, Clone)]
pub struct MockSteamClient {
    state: Arc<Mutex<MockState>>,
}

impl MockSteamClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    pub async fn set_partner_inventory(&self, partner: &SteamId, items: InventorySnapshot) {
        let mut state = self.state.lock().await;
        state.partner_inventories.insert(partner.0.clone(), items);
    }

    pub async fn set_bot_inventory(&self, items: InventorySnapshot) {
        self.state.lock().await.bot_inventory = items;
    }

    pub async fn set_escrow(&self, partner: &SteamId, durations: EscrowDurations) {
        let mut state = self.state.lock().await;
        state.escrows.insert(partner.0.clone(), durations);
    }

    pub async fn set_send_state(&self, send_state: OfferSendState) {
        self.state.lock().await.send_state = Some(send_state);
    }

    pub async fn set_received_items(&self, offer_id: &OfferId, items: Vec<ItemSpec>) {
        let mut state = self.state.lock().await;
        state.received.insert(offer_id.0.clone(), items);
    }

    pub async fn fail_inventory(&self, fail: bool) {
        self.state.lock().await.fail_inventory = fail;
    }

    pub async fn fail_escrow(&self, fail: bool) {
        self.state.lock().await.fail_escrow = fail;
    }

    pub async fn fail_send(&self, fail: bool) {
        self.state.lock().await.fail_send = fail;
    }

    pub async fn fail_cancel(&self, fail: bool) {
        self.state.lock().await.fail_cancel = fail;
    }

    pub async fn fail_received(&self, fail: bool) {
        self.state.lock().await.fail_received = fail;
    }

    pub async fn sent_offers(&self) -> Vec<RecordedOffer> {
        self.state.lock().await.sent.clone()
    }

    pub async fn cancelled_offers(&self) -> Vec<OfferId> {
        self.state.lock().await.cancelled.clone()
    }

    pub async fn declined_offers(&self) -> Vec<OfferId> {
        self.state.lock().await.declined.clone()
    }

    pub async fn partner_fetch_count(&self) -> u64 {
        self.state.lock().await.partner_fetches
    }

    pub async fn bot_fetch_count(&self) -> u64 {
        self.state.lock().await.bot_fetches
    }

    pub async fn escrow_lookup_count(&self) -> u64 {
        self.state.lock().await.escrow_lookups
    }
}

impl Default for MockSteamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryClient for MockSteamClient {
    async fn bot_inventory(
        &self,
        _app_id: u32,
        _context_id: u64,
        _tradable_only: bool,
    ) -> Result<InventorySnapshot, SteamError> {
        let mut state = self.state.lock().await;
        state.bot_fetches += 1;
        if state.fail_inventory {
            return Err(SteamError::RequestFailed("inventory unavailable".into()));
        }
        Ok(state.bot_inventory.clone())
    }

    async fn partner_inventory(
        &self,
        partner: &SteamId,
        _app_id: u32,
        _context_id: u64,
        _tradable_only: bool,
    ) -> Result<InventorySnapshot, SteamError> {
        let mut state = self.state.lock().await;
        state.partner_fetches += 1;
        if state.fail_inventory {
            return Err(SteamError::RequestFailed("inventory unavailable".into()));
        }
        Ok(state
            .partner_inventories
            .get(partner.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl EscrowClient for MockSteamClient {
    async fn escrow_durations(
        &self,
        partner: &SteamId,
        _token: Option<&str>,
    ) -> Result<EscrowDurations, SteamError> {
        let mut state = self.state.lock().await;
        state.escrow_lookups += 1;
        if state.fail_escrow {
            return Err(SteamError::RequestFailed("escrow lookup failed".into()));
        }
        Ok(state
            .escrows
            .get(partner.as_str())
            .copied()
            .unwrap_or_else(EscrowDurations::none))
    }
}

#[async_trait]
impl TradeOfferClient for MockSteamClient {
    async fn send_offer(
        &self,
        draft: &TradeOfferDraft,
        message: &str,
        token: Option<&str>,
    ) -> Result<SentOffer, SteamError> {
        let mut state = self.state.lock().await;
        if state.fail_send {
            return Err(SteamError::RequestFailed("offer rejected".into()));
        }
        state.next_offer_id += 1;
        let offer_id = OfferId::new(format!("offer-{}", state.next_offer_id));
        state.sent.push(RecordedOffer {
            offer_id: offer_id.clone(),
            partner: draft.partner().clone(),
            items_to_give: draft.items_to_give().to_vec(),
            items_to_receive: draft.items_to_receive().to_vec(),
            message: message.to_string(),
            token: token.map(str::to_string),
        });
        Ok(SentOffer {
            id: offer_id,
            state: state.send_state.unwrap_or(OfferSendState::Sent),
        })
    }

    async fn cancel_offer(&self, offer_id: &OfferId) -> Result<(), SteamError> {
        let mut state = self.state.lock().await;
        if state.fail_cancel {
            return Err(SteamError::OfferNotFound(offer_id.clone()));
        }
        state.cancelled.push(offer_id.clone());
        Ok(())
    }

    async fn decline_offer(&self, offer_id: &OfferId) -> Result<(), SteamError> {
        let mut state = self.state.lock().await;
        state.declined.push(offer_id.clone());
        Ok(())
    }

    async fn received_items(&self, offer_id: &OfferId) -> Result<Vec<ItemSpec>, SteamError> {
        let state = self.state.lock().await;
        if state.fail_received {
            return Err(SteamError::RequestFailed("receipt unavailable".into()));
        }
        Ok(state.received.get(offer_id.as_str()).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_assigns_sequential_offer_ids() {
        let mock = MockSteamClient::new();
        let draft = TradeOfferDraft::new(SteamId::new("76561198000000001"));

        let first = mock.send_offer(&draft, "hi", None).await.unwrap();
        let second = mock.send_offer(&draft, "hi", None).await.unwrap();

        assert_eq!(first.id.as_str(), "offer-1");
        assert_eq!(second.id.as_str(), "offer-2");
        assert_eq!(mock.sent_offers().await.len(), 2);
    }

    #[tokio::test]
    async fn unset_escrow_reads_as_zero() {
        let mock = MockSteamClient::new();
        let durations = mock
            .escrow_durations(&SteamId::new("76561198000000001"), None)
            .await
            .unwrap();
        assert_eq!(durations, EscrowDurations::none());
    }

    #[tokio::test]
    async fn failed_fetch_still_counts_the_call() {
        let mock = MockSteamClient::new();
        mock.fail_inventory(true).await;
        let result = mock
            .partner_inventory(&SteamId::new("76561198000000001"), 730, 2, true)
            .await;
        assert!(result.is_err());
        assert_eq!(mock.partner_fetch_count().await, 1);
    }
}
