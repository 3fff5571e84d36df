use offerbot_escrow::EscrowError;
use offerbot_inventory::InventoryError;
use offerbot_offers::OfferError;
use offerbot_reporting::ReportingError;
use offerbot_steam::SessionState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("session is not ready for trading: {state}")]
    SessionNotReady { state: SessionState },

    #[error("duplicate trade job: {verification_code}")]
    DuplicateJob { verification_code: String },

    #[error("invalid job payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Escrow(#[from] EscrowError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Offer(#[from] OfferError),

    #[error(transparent)]
    Reporting(#[from] ReportingError),
}
