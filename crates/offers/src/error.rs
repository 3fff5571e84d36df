use offerbot_steam::SteamError;
use offerbot_types::Side;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfferError {
    #[error("{side} side attached {attached} of {requested} requested items")]
    ItemAttachmentMismatch {
        side: Side,
        attached: usize,
        requested: usize,
    },

    #[error("offer submission failed: {0}")]
    Send(#[from] SteamError),
}
