use crate::error::InventoryError;
use crate::matcher::reconcile;
use offerbot_steam::InventoryClient;
use offerbot_types::{ItemSpec, ReconciliationResult, Side, SteamId};
use std::sync::Arc;
use tracing::debug;

/// Which inventory to read and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub app_id: u32,
    pub context_id: u64,
    pub tradable_only: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            app_id: 730,
            context_id: 2,
            tradable_only: true,
        }
    }
}

/// Both sides of a trade, verified against live snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedInventories {
    pub user_items: Vec<ItemSpec>,
    pub bot_items: Vec<ItemSpec>,
}

/// Loads both parties' inventories and reconciles the requested item
/// lists against them.
pub struct InventoryLoader {
    client: Arc<dyn InventoryClient>,
    config: LoaderConfig,
}

impl InventoryLoader {
    pub fn new(client: Arc<dyn InventoryClient>, config: LoaderConfig) -> Self {
        Self { client, config }
    }

    /// Verify that both requested item lists are fully present in the
    /// corresponding live inventories.
    ///
    /// An empty user request is rejected before any network traffic. An
    /// empty bot request matches trivially and skips the bot fetch
    /// entirely. Both remaining fetches run concurrently and the first
    /// failure cancels the other.
    pub async fn load_both(
        &self,
        partner: &SteamId,
        requested_user: &[ItemSpec],
        requested_bot: &[ItemSpec],
    ) -> Result<MatchedInventories, InventoryError> {
        if requested_user.is_empty() {
            return Err(InventoryError::EmptyUserRequest);
        }

        debug!(
            partner = %partner,
            user_requested = requested_user.len(),
            bot_requested = requested_bot.len(),
            "Loading inventories"
        );

        let user_fut = async {
            let snapshot = self
                .client
                .partner_inventory(
                    partner,
                    self.config.app_id,
                    self.config.context_id,
                    self.config.tradable_only,
                )
                .await?;
            match reconcile(requested_user, &snapshot) {
                ReconciliationResult::Matched(items) => Ok(items),
                ReconciliationResult::Unmatched => {
                    Err(InventoryError::Mismatch { side: Side::User })
                }
            }
        };

        let bot_fut = async {
            if requested_bot.is_empty() {
                return Ok(Vec::new());
            }
            let snapshot = self
                .client
                .bot_inventory(
                    self.config.app_id,
                    self.config.context_id,
                    self.config.tradable_only,
                )
                .await?;
            match reconcile(requested_bot, &snapshot) {
                ReconciliationResult::Matched(items) => Ok(items),
                ReconciliationResult::Unmatched => Err(InventoryError::Mismatch { side: Side::Bot }),
            }
        };

        let (user_items, bot_items) = futures::try_join!(user_fut, bot_fut)?;

        debug!(
            partner = %partner,
            user_matched = user_items.len(),
            bot_matched = bot_items.len(),
            "Inventories reconciled"
        );

        Ok(MatchedInventories {
            user_items,
            bot_items,
        })
    }
}
