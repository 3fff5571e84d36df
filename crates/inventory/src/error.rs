use offerbot_steam::SteamError;
use offerbot_types::Side;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("user item request is empty")]
    EmptyUserRequest,

    #[error("{side} inventory does not contain the requested items")]
    Mismatch { side: Side },

    #[error("inventory fetch failed: {0}")]
    Transport(#[from] SteamError),
}
