use offerbot_types::{StatusKey, StatusRecord, TradeStatus};
use serde::Serialize;

/// Body of a status push. Exactly one of `steam_trade_id` and
/// `verification_code` is present, depending on how the update is
/// keyed.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateBody {
    pub trade_status: TradeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_trade_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&StatusRecord> for StatusUpdateBody {
    fn from(record: &StatusRecord) -> Self {
        let (steam_trade_id, verification_code) = match &record.key {
            StatusKey::OfferId(offer_id) => (Some(offer_id.to_string()), None),
            StatusKey::VerificationCode(code) => (None, Some(code.clone())),
        };
        Self {
            trade_status: record.status,
            steam_trade_id,
            verification_code,
            message: record.message.clone(),
        }
    }
}

/// Body of a trade-id push.
#[derive(Debug, Clone, Serialize)]
pub struct TradeIdBody {
    pub trade_db_uid: String,
    pub steam_trade_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerbot_types::OfferId;

    #[test]
    fn offer_keyed_body_omits_the_verification_code() {
        let record = StatusRecord::for_offer(OfferId::new("4402718"), TradeStatus::Accepted);
        let value = serde_json::to_value(StatusUpdateBody::from(&record)).unwrap();

        assert_eq!(value["trade_status"], "accepted");
        assert_eq!(value["steam_trade_id"], "4402718");
        assert!(value.get("verification_code").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn code_keyed_body_omits_the_trade_id() {
        let record = StatusRecord::for_verification("VX91KQ", TradeStatus::Error)
            .with_message("user inventory does not contain the requested items");
        let value = serde_json::to_value(StatusUpdateBody::from(&record)).unwrap();

        assert_eq!(value["trade_status"], "error");
        assert_eq!(value["verification_code"], "VX91KQ");
        assert!(value.get("steam_trade_id").is_none());
        assert_eq!(
            value["message"],
            "user inventory does not contain the requested items"
        );
    }

    #[test]
    fn trade_id_body_names_both_keys() {
        let body = TradeIdBody {
            trade_db_uid: "5512".to_string(),
            steam_trade_id: "4402718".to_string(),
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["trade_db_uid"], "5512");
        assert_eq!(value["steam_trade_id"], "4402718");
    }
}
