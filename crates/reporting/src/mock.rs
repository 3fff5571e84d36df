use crate::api::{RecordApi, ReportingError};
use async_trait::async_trait;
use offerbot_types::{OfferId, StatusRecord};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MockReportState {
    statuses: Vec<StatusRecord>,
    trade_ids: Vec<(String, OfferId)>,
    fail_status: bool,
    fail_trade_id: bool,
}

/// In-memory record service for tests. Failures are reported as a
/// rejected push with HTTP 500.
#[derive(Debug, Clone)]
pub struct MockRecordApi {
    state: Arc<Mutex<MockReportState>>,
}

impl MockRecordApi {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockReportState::default())),
        }
    }

    pub async fn fail_status(&self, fail: bool) {
        self.state.lock().await.fail_status = fail;
    }

    pub async fn fail_trade_id(&self, fail: bool) {
        self.state.lock().await.fail_trade_id = fail;
    }

    pub async fn pushed_statuses(&self) -> Vec<StatusRecord> {
        self.state.lock().await.statuses.clone()
    }

    pub async fn pushed_trade_ids(&self) -> Vec<(String, OfferId)> {
        self.state.lock().await.trade_ids.clone()
    }
}

impl Default for MockRecordApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordApi for MockRecordApi {
    async fn push_status(&self, record: &StatusRecord) -> Result<(), ReportingError> {
        let mut state = self.state.lock().await;
        if state.fail_status {
            return Err(ReportingError::UnexpectedStatus { status: 500 });
        }
        state.statuses.push(record.clone());
        Ok(())
    }

    async fn push_trade_id(
        &self,
        trade_uid: &str,
        offer_id: &OfferId,
    ) -> Result<(), ReportingError> {
        let mut state = self.state.lock().await;
        if state.fail_trade_id {
            return Err(ReportingError::UnexpectedStatus { status: 500 });
        }
        state
            .trade_ids
            .push((trade_uid.to_string(), offer_id.clone()));
        Ok(())
    }
}
