use offerbot_types::EscrowDurations;
use thiserror::Error;

/// Longest escrow hold we will tolerate on either side of a trade.
///
/// The default of zero days means both accounts must be fully protected
/// so items change hands immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscrowPolicy {
    pub max_accepted_days: u32,
}

impl EscrowPolicy {
    pub fn new(max_accepted_days: u32) -> Self {
        Self { max_accepted_days }
    }

    /// Check both hold durations against the policy. The user side is
    /// checked first, so when both sides exceed the limit the violation
    /// names the user.
    pub fn check(&self, durations: &EscrowDurations) -> Result<(), EscrowViolation> {
        if durations.user_days > self.max_accepted_days {
            return Err(EscrowViolation::User {
                days: durations.user_days,
                max_days: self.max_accepted_days,
            });
        }
        if durations.bot_days > self.max_accepted_days {
            return Err(EscrowViolation::Bot {
                days: durations.bot_days,
                max_days: self.max_accepted_days,
            });
        }
        Ok(())
    }
}

impl Default for EscrowPolicy {
    fn default() -> Self {
        Self {
            max_accepted_days: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EscrowViolation {
    #[error("user items would be held for {days} days (limit {max_days})")]
    User { days: u32, max_days: u32 },

    #[error("bot items would be held for {days} days (limit {max_days})")]
    Bot { days: u32, max_days: u32 },
}
