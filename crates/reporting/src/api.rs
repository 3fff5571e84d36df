use async_trait::async_trait;
use offerbot_types::{OfferId, StatusRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportingError {
    /// The record service answered with anything other than HTTP 200.
    #[error("record service rejected the push with http {status}")]
    UnexpectedStatus { status: u16 },

    #[error("record service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound reporting to the record service.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Push a trade status update.
    async fn push_status(&self, record: &StatusRecord) -> Result<(), ReportingError>;

    /// Associate the network's offer id with the record service's own
    /// key for the trade.
    async fn push_trade_id(&self, trade_uid: &str, offer_id: &OfferId)
        -> Result<(), ReportingError>;
}
