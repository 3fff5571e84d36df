use crate::policy::{EscrowPolicy, EscrowViolation};
use offerbot_steam::{EscrowClient, SteamError};
use offerbot_types::{EscrowDurations, SteamId};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EscrowError {
    #[error(transparent)]
    Violation(#[from] EscrowViolation),

    #[error("escrow lookup failed: {0}")]
    Transport(#[from] SteamError),
}

/// Looks up escrow durations for a counterparty and applies the policy.
pub struct EscrowGate {
    client: Arc<dyn EscrowClient>,
    policy: EscrowPolicy,
}

impl EscrowGate {
    pub fn new(client: Arc<dyn EscrowClient>, policy: EscrowPolicy) -> Self {
        Self { client, policy }
    }

    /// Confirm the counterparty is clear to trade. Returns the observed
    /// durations so callers can log them.
    pub async fn clear(
        &self,
        partner: &SteamId,
        token: Option<&str>,
    ) -> Result<EscrowDurations, EscrowError> {
        let durations = self.client.escrow_durations(partner, token).await?;
        debug!(
            partner = %partner,
            user_days = durations.user_days,
            bot_days = durations.bot_days,
            "Escrow durations fetched"
        );
        self.policy.check(&durations)?;
        Ok(durations)
    }
}
