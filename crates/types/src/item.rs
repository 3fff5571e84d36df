use serde::{Deserialize, Serialize};
use std::fmt;

/// A single inventory item position as exchanged with the record service
/// and the trading network.
///
/// Two items are interchangeable only when all four fields agree. In
/// particular `assetid` pins a concrete asset instance, so two copies of
/// the same skin with different asset ids are distinct positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Item class identifier (what kind of item this is).
    pub classid: String,
    /// Instance identifier (per-copy attributes such as stickers).
    pub instanceid: String,
    /// Concrete asset identifier within the owning inventory.
    pub assetid: String,
    /// Stack size. Non-stackable items carry 1.
    pub amount: u32,
}

impl ItemSpec {
    pub fn new(
        classid: impl Into<String>,
        instanceid: impl Into<String>,
        assetid: impl Into<String>,
        amount: u32,
    ) -> Self {
        Self {
            classid: classid.into(),
            instanceid: instanceid.into(),
            assetid: assetid.into(),
            amount,
        }
    }
}

/// A point-in-time listing of an inventory, in the order the network
/// returned it.
pub type InventorySnapshot = Vec<ItemSpec>;

/// Outcome of reconciling a requested item list against an inventory
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationResult {
    /// Every requested item was found. Carries the matched snapshot
    /// entries in snapshot order.
    Matched(Vec<ItemSpec>),
    /// At least one requested item has no counterpart in the snapshot.
    Unmatched,
}

impl ReconciliationResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, ReconciliationResult::Matched(_))
    }
}

/// Escrow hold durations for both parties to a prospective trade, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowDurations {
    /// Days the counterparty's outgoing items would be held.
    pub user_days: u32,
    /// Days our own outgoing items would be held.
    pub bot_days: u32,
}

impl EscrowDurations {
    pub fn new(user_days: u32, bot_days: u32) -> Self {
        Self {
            user_days,
            bot_days,
        }
    }

    /// Durations for a pair of fully protected accounts.
    pub fn none() -> Self {
        Self::new(0, 0)
    }
}

/// Which party to a trade an item list or failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    User,
    Bot,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::User => write!(f, "user"),
            Side::Bot => write!(f, "bot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_equality_requires_all_four_fields() {
        let a = ItemSpec::new("310776", "188530139", "14160331096", 1);
        let same = ItemSpec::new("310776", "188530139", "14160331096", 1);
        let other_asset = ItemSpec::new("310776", "188530139", "14160331097", 1);
        let other_amount = ItemSpec::new("310776", "188530139", "14160331096", 2);

        assert_eq!(a, same);
        assert_ne!(a, other_asset);
        assert_ne!(a, other_amount);
    }

    #[test]
    fn item_spec_round_trips_through_json() {
        let item = ItemSpec::new("101", "0", "9000001", 3);
        let json = serde_json::to_string(&item).unwrap();
        let back: ItemSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }

    #[test]
    fn side_displays_lowercase() {
        assert_eq!(Side::User.to_string(), "user");
        assert_eq!(Side::Bot.to_string(), "bot");
    }
}
