use crate::api::{RecordApi, ReportingError};
use crate::wire::{StatusUpdateBody, TradeIdBody};
use async_trait::async_trait;
use offerbot_types::{OfferId, StatusRecord};
use tracing::{debug, warn};

/// Record service client speaking JSON over HTTP.
///
/// Only an HTTP 200 counts as acceptance. Anything else, redirects and
/// other 2xx included, is treated as a rejected push.
pub struct HttpRecordApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecordApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client, for timeouts and proxies.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn push_status(&self, record: &StatusRecord) -> Result<(), ReportingError> {
        let url = format!("{}/api/trade/status", self.base_url);
        let body = StatusUpdateBody::from(record);

        let response = self.client.post(&url).json(&body).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            warn!(
                status = %response.status(),
                trade_status = %record.status,
                "Status push rejected"
            );
            return Err(ReportingError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        debug!(trade_status = %record.status, "Status pushed");
        Ok(())
    }

    async fn push_trade_id(
        &self,
        trade_uid: &str,
        offer_id: &OfferId,
    ) -> Result<(), ReportingError> {
        let url = format!("{}/api/trade/tradeid", self.base_url);
        let body = TradeIdBody {
            trade_db_uid: trade_uid.to_string(),
            steam_trade_id: offer_id.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            warn!(
                status = %response.status(),
                trade_uid = %trade_uid,
                offer_id = %offer_id,
                "Trade id push rejected"
            );
            return Err(ReportingError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        debug!(trade_uid = %trade_uid, offer_id = %offer_id, "Trade id pushed");
        Ok(())
    }
}
