use crate::error::OfferError;
use chrono::Utc;
use offerbot_steam::{OfferSendState, TradeOfferClient, TradeOfferDraft};
use offerbot_types::{ItemSpec, OfferRecord, OfferState, Side, SteamId, TradeStatus};
use std::sync::Arc;
use tracing::{debug, info};

/// The message placed on every outgoing offer so the counterparty can
/// match it to their trade.
pub fn verification_message(code: &str) -> String {
    format!("Hello, thank you for trading with us : The verification number is {code}")
}

/// A submitted offer together with how the network took it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatedOffer {
    pub record: OfferRecord,
    pub send_state: OfferSendState,
}

impl InitiatedOffer {
    /// The first status the record service should see for this offer.
    pub fn initial_status(&self) -> TradeStatus {
        match self.send_state {
            OfferSendState::Sent => TradeStatus::Sent,
            OfferSendState::PendingConfirmation => TradeStatus::Pending,
        }
    }
}

/// Builds offer drafts from verified item lists and submits them.
pub struct OfferInitiator {
    client: Arc<dyn TradeOfferClient>,
}

impl OfferInitiator {
    pub fn new(client: Arc<dyn TradeOfferClient>) -> Self {
        Self { client }
    }

    /// Assemble and send an offer.
    ///
    /// Our items are attached before the counterparty's, and both
    /// attachment counts must equal the requested counts or the offer
    /// is abandoned before submission. Once the network has taken the
    /// offer there is no undo here.
    pub async fn initiate(
        &self,
        partner: &SteamId,
        bot_items: &[ItemSpec],
        user_items: &[ItemSpec],
        verification_code: &str,
        token: Option<&str>,
    ) -> Result<InitiatedOffer, OfferError> {
        let mut draft = TradeOfferDraft::new(partner.clone());
        let gave = draft.add_items_to_give(bot_items);
        let got = draft.add_items_to_receive(user_items);

        debug!(
            partner = %partner,
            to_give = gave,
            to_receive = got,
            "Offer draft assembled"
        );

        if got != user_items.len() {
            return Err(OfferError::ItemAttachmentMismatch {
                side: Side::User,
                attached: got,
                requested: user_items.len(),
            });
        }
        if gave != bot_items.len() {
            return Err(OfferError::ItemAttachmentMismatch {
                side: Side::Bot,
                attached: gave,
                requested: bot_items.len(),
            });
        }

        let message = verification_message(verification_code);
        let sent = self.client.send_offer(&draft, &message, token).await?;

        let now = Utc::now().timestamp() as u64;
        let state = match sent.state {
            OfferSendState::Sent => OfferState::Sent,
            OfferSendState::PendingConfirmation => OfferState::Created,
        };
        let record = OfferRecord {
            offer_id: sent.id,
            partner: partner.clone(),
            verification_code: verification_code.to_string(),
            state,
            created_at: now,
            updated_at: now,
        };

        info!(
            offer_id = %record.offer_id,
            partner = %partner,
            state = %record.state,
            "Trade offer submitted"
        );

        Ok(InitiatedOffer {
            record,
            send_state: sent.state,
        })
    }
}
