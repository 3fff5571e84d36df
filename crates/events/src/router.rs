use offerbot_offers::OfferRegistry;
use offerbot_reporting::{RecordApi, ReportingError};
use offerbot_steam::{OfferEvent, TradeOfferClient, TradeOfferState};
use offerbot_types::{OfferId, OfferState, StatusRecord, TradeStatus};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("status push failed: {0}")]
    Reporting(#[from] ReportingError),
}

/// Turns offer lifecycle notifications into record service updates and
/// network cleanup.
///
/// The record service is told before the offer is touched locally or on
/// the network, so a failed push leaves the offer non-terminal and a
/// redelivered notification gets another try. Duplicate notifications
/// for an offer that already went terminal are dropped.
pub struct LifecycleRouter {
    offers: Arc<dyn TradeOfferClient>,
    reporter: Arc<dyn RecordApi>,
    registry: Arc<OfferRegistry>,
}

impl LifecycleRouter {
    pub fn new(
        offers: Arc<dyn TradeOfferClient>,
        reporter: Arc<dyn RecordApi>,
        registry: Arc<OfferRegistry>,
    ) -> Self {
        Self {
            offers,
            reporter,
            registry,
        }
    }

    /// Run until the event channel closes. Handler failures are logged
    /// and the loop keeps going.
    pub async fn run(self, mut events: mpsc::Receiver<OfferEvent>) {
        info!("Lifecycle router started");
        while let Some(event) = events.recv().await {
            if let Err(err) = self.handle_event(&event).await {
                error!(error = %err, "Lifecycle event handling failed");
            }
        }
        info!("Lifecycle router stopped");
    }

    pub async fn handle_event(&self, event: &OfferEvent) -> Result<(), RouterError> {
        match event {
            OfferEvent::SentOfferChanged {
                offer_id,
                old_state,
                new_state,
            } => {
                debug!(
                    offer_id = %offer_id,
                    old_state = ?old_state,
                    new_state = ?new_state,
                    "Sent offer changed"
                );
                match new_state {
                    TradeOfferState::Accepted => self.handle_accepted(offer_id).await,
                    TradeOfferState::Declined => self.handle_declined(offer_id).await,
                    _ => self.handle_cancellation(offer_id).await,
                }
            }
            OfferEvent::UnknownOfferSent { offer_id } => {
                info!(offer_id = %offer_id, "Unrecognized outgoing offer");
                self.handle_cancellation(offer_id).await
            }
            OfferEvent::SentPendingCancelled { offer_id } => {
                info!(offer_id = %offer_id, "Pending offer cancelled by the network");
                self.handle_cancellation(offer_id).await
            }
            OfferEvent::NewOffer { offer_id, partner } => {
                info!(offer_id = %offer_id, partner = %partner, "Incoming offer declined");
                if let Err(err) = self.offers.decline_offer(offer_id).await {
                    warn!(offer_id = %offer_id, error = %err, "Decline failed");
                }
                Ok(())
            }
        }
    }

    async fn handle_accepted(&self, offer_id: &OfferId) -> Result<(), RouterError> {
        if self.registry.is_terminal(offer_id).await {
            debug!(offer_id = %offer_id, "Offer already terminal, notification dropped");
            return Ok(());
        }

        self.reporter
            .push_status(&StatusRecord::for_offer(
                offer_id.clone(),
                TradeStatus::Accepted,
            ))
            .await?;
        self.registry.transition(offer_id, OfferState::Accepted).await;

        match self.offers.received_items(offer_id).await {
            Ok(items) => info!(
                offer_id = %offer_id,
                count = items.len(),
                "Items received from accepted offer"
            ),
            Err(err) => warn!(
                offer_id = %offer_id,
                error = %err,
                "Received items lookup failed"
            ),
        }
        Ok(())
    }

    async fn handle_declined(&self, offer_id: &OfferId) -> Result<(), RouterError> {
        if self.registry.is_terminal(offer_id).await {
            debug!(offer_id = %offer_id, "Offer already terminal, notification dropped");
            return Ok(());
        }

        self.reporter
            .push_status(&StatusRecord::for_offer(
                offer_id.clone(),
                TradeStatus::Declined,
            ))
            .await?;
        self.registry.transition(offer_id, OfferState::Declined).await;
        Ok(())
    }

    /// Report the offer as cancelled, then take it off the network. The
    /// network call runs only after the push succeeded, and a failure
    /// there means the offer was already gone.
    async fn handle_cancellation(&self, offer_id: &OfferId) -> Result<(), RouterError> {
        if self.registry.is_terminal(offer_id).await {
            debug!(offer_id = %offer_id, "Offer already terminal, notification dropped");
            return Ok(());
        }

        self.reporter
            .push_status(&StatusRecord::for_offer(
                offer_id.clone(),
                TradeStatus::Cancelled,
            ))
            .await?;
        self.registry
            .transition(offer_id, OfferState::Cancelled)
            .await;

        if let Err(err) = self.offers.cancel_offer(offer_id).await {
            debug!(offer_id = %offer_id, error = %err, "Cancel was a no-op");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use offerbot_reporting::MockRecordApi;
    use offerbot_steam::MockSteamClient;
    use offerbot_types::{ItemSpec, OfferRecord, StatusKey, SteamId};

    fn sent_record(offer_id: &str) -> OfferRecord {
        let now = Utc::now().timestamp() as u64;
        OfferRecord {
            offer_id: OfferId::new(offer_id),
            partner: SteamId::new("76561198000000001"),
            verification_code: "VX91KQ".to_string(),
            state: OfferState::Sent,
            created_at: now,
            updated_at: now,
        }
    }

    struct Fixture {
        steam: MockSteamClient,
        reporter: MockRecordApi,
        registry: Arc<OfferRegistry>,
        router: LifecycleRouter,
    }

    fn fixture() -> Fixture {
        let steam = MockSteamClient::new();
        let reporter = MockRecordApi::new();
        let registry = Arc::new(OfferRegistry::new());
        let router = LifecycleRouter::new(
            Arc::new(steam.clone()),
            Arc::new(reporter.clone()),
            registry.clone(),
        );
        Fixture {
            steam,
            reporter,
            registry,
            router,
        }
    }

    fn changed(offer_id: &str, new_state: TradeOfferState) -> OfferEvent {
        OfferEvent::SentOfferChanged {
            offer_id: OfferId::new(offer_id),
            old_state: TradeOfferState::Active,
            new_state,
        }
    }

    #[tokio::test]
    async fn accepted_offer_is_reported_and_receipt_logged() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;
        f.steam
            .set_received_items(&OfferId::new("offer-1"), vec![ItemSpec::new(
                "101", "0", "u1", 1,
            )])
            .await;

        f.router
            .handle_event(&changed("offer-1", TradeOfferState::Accepted))
            .await
            .unwrap();

        let statuses = f.reporter.pushed_statuses().await;
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].status, TradeStatus::Accepted);
        assert_eq!(
            statuses[0].key,
            StatusKey::OfferId(OfferId::new("offer-1"))
        );
        assert_eq!(
            f.registry.get(&OfferId::new("offer-1")).await.unwrap().state,
            OfferState::Accepted
        );
    }

    #[tokio::test]
    async fn receipt_lookup_failure_does_not_fail_the_event() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;
        f.steam.fail_received(true).await;

        f.router
            .handle_event(&changed("offer-1", TradeOfferState::Accepted))
            .await
            .unwrap();

        assert_eq!(f.reporter.pushed_statuses().await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_notification_is_dropped() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;

        f.router
            .handle_event(&changed("offer-1", TradeOfferState::Accepted))
            .await
            .unwrap();
        f.router
            .handle_event(&changed("offer-1", TradeOfferState::Accepted))
            .await
            .unwrap();

        assert_eq!(f.reporter.pushed_statuses().await.len(), 1);
    }

    #[tokio::test]
    async fn declined_offer_is_reported() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;

        f.router
            .handle_event(&changed("offer-1", TradeOfferState::Declined))
            .await
            .unwrap();

        let statuses = f.reporter.pushed_statuses().await;
        assert_eq!(statuses[0].status, TradeStatus::Declined);
        assert_eq!(
            f.registry.get(&OfferId::new("offer-1")).await.unwrap().state,
            OfferState::Declined
        );
    }

    #[tokio::test]
    async fn dead_states_cancel_after_the_push() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;

        f.router
            .handle_event(&changed("offer-1", TradeOfferState::Countered))
            .await
            .unwrap();

        let statuses = f.reporter.pushed_statuses().await;
        assert_eq!(statuses[0].status, TradeStatus::Cancelled);
        assert_eq!(f.steam.cancelled_offers().await, vec![OfferId::new("offer-1")]);
        assert_eq!(
            f.registry.get(&OfferId::new("offer-1")).await.unwrap().state,
            OfferState::Cancelled
        );
    }

    #[tokio::test]
    async fn push_failure_leaves_the_offer_alone() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;
        f.reporter.fail_status(true).await;

        let err = f
            .router
            .handle_event(&changed("offer-1", TradeOfferState::Expired))
            .await
            .unwrap_err();

        assert!(matches!(err, RouterError::Reporting(_)));
        assert!(f.steam.cancelled_offers().await.is_empty());
        assert_eq!(
            f.registry.get(&OfferId::new("offer-1")).await.unwrap().state,
            OfferState::Sent
        );
    }

    #[tokio::test]
    async fn unknown_offers_are_reported_and_cancelled() {
        let f = fixture();

        f.router
            .handle_event(&OfferEvent::UnknownOfferSent {
                offer_id: OfferId::new("offer-77"),
            })
            .await
            .unwrap();

        let statuses = f.reporter.pushed_statuses().await;
        assert_eq!(statuses[0].status, TradeStatus::Cancelled);
        assert_eq!(
            f.steam.cancelled_offers().await,
            vec![OfferId::new("offer-77")]
        );
    }

    #[tokio::test]
    async fn already_cancelled_pending_offer_is_tolerated() {
        let f = fixture();
        f.registry.insert(sent_record("offer-1")).await;
        f.steam.fail_cancel(true).await;

        f.router
            .handle_event(&OfferEvent::SentPendingCancelled {
                offer_id: OfferId::new("offer-1"),
            })
            .await
            .unwrap();

        assert_eq!(f.reporter.pushed_statuses().await.len(), 1);
        assert_eq!(
            f.registry.get(&OfferId::new("offer-1")).await.unwrap().state,
            OfferState::Cancelled
        );
    }

    #[tokio::test]
    async fn incoming_offers_are_declined_without_reporting() {
        let f = fixture();

        f.router
            .handle_event(&OfferEvent::NewOffer {
                offer_id: OfferId::new("offer-55"),
                partner: SteamId::new("76561198000000002"),
            })
            .await
            .unwrap();

        assert_eq!(
            f.steam.declined_offers().await,
            vec![OfferId::new("offer-55")]
        );
        assert!(f.reporter.pushed_statuses().await.is_empty());
    }
}
