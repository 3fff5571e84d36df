use crate::item::ItemSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-bit account identifier on the trading network, carried as a
/// string to survive JSON transports that mangle large integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SteamId(pub String);

impl SteamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trade job as delivered by the record service.
///
/// Item lists are written from the counterparty's point of view:
/// `user_items` are what the counterparty gives up (we receive them) and
/// `bot_items` are what we give up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeJob {
    /// Short code the counterparty uses to verify the offer is ours.
    /// Also the job's identity for deduplication and error reporting.
    pub verification_code: String,
    /// The record service's own key for this trade row.
    pub trade_uid: String,
    /// Account the offer will be sent to.
    #[serde(rename = "steam_id")]
    pub partner: SteamId,
    /// Items we expect to receive from the counterparty.
    #[serde(rename = "user_items")]
    pub items_to_receive: Vec<ItemSpec>,
    /// Items we hand over.
    #[serde(rename = "bot_items")]
    pub items_to_give: Vec<ItemSpec>,
    /// Trade token for counterparties we are not friends with.
    #[serde(rename = "userToken", default, skip_serializing_if = "Option::is_none")]
    pub partner_token: Option<String>,
}

impl TradeJob {
    pub fn token(&self) -> Option<&str> {
        self.partner_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_decodes_wire_field_names() {
        let raw = r#"{
            "verification_code": "VX91KQ",
            "trade_uid": "5512",
            "steam_id": "76561198084531029",
            "user_items": [
                {"classid": "310776", "instanceid": "302028390", "assetid": "14160331096", "amount": 1}
            ],
            "bot_items": [],
            "userToken": "h7LqxA2m"
        }"#;

        let job: TradeJob = serde_json::from_str(raw).unwrap();
        assert_eq!(job.verification_code, "VX91KQ");
        assert_eq!(job.trade_uid, "5512");
        assert_eq!(job.partner.as_str(), "76561198084531029");
        assert_eq!(job.items_to_receive.len(), 1);
        assert!(job.items_to_give.is_empty());
        assert_eq!(job.token(), Some("h7LqxA2m"));
    }

    #[test]
    fn job_token_is_optional() {
        let raw = r#"{
            "verification_code": "AB12CD",
            "trade_uid": "7",
            "steam_id": "76561198000000001",
            "user_items": [],
            "bot_items": []
        }"#;

        let job: TradeJob = serde_json::from_str(raw).unwrap();
        assert_eq!(job.token(), None);
    }
}
