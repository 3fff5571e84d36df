use crate::error::PipelineError;
use crate::pipeline::TradePipeline;
use offerbot_types::TradeJob;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// Decode a raw job payload from the record service's push channel.
pub fn decode_job(payload: &str) -> Result<TradeJob, PipelineError> {
    Ok(serde_json::from_str(payload)?)
}

/// One-shot acknowledgement back to the delivery channel. Consuming
/// methods make double signalling impossible.
#[derive(Debug)]
pub struct JobCompletion {
    tx: oneshot::Sender<Result<(), String>>,
}

impl JobCompletion {
    pub fn new() -> (Self, oneshot::Receiver<Result<(), String>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Signal that the offer went out and the record service was told.
    pub fn succeed(self) {
        let _ = self.tx.send(Ok(()));
    }

    /// Signal failure with a reason for the delivery side's logs.
    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(reason.into()));
    }
}

/// A raw payload waiting to be processed, with its acknowledgement.
#[derive(Debug)]
pub struct JobDelivery {
    pub payload: String,
    pub completion: JobCompletion,
}

/// Pulls deliveries off the channel and runs each as its own task, so
/// one slow counterparty never stalls the queue.
pub struct JobIntake {
    pipeline: Arc<TradePipeline>,
}

impl JobIntake {
    pub fn new(pipeline: Arc<TradePipeline>) -> Self {
        Self { pipeline }
    }

    /// Run until the delivery channel closes.
    pub async fn run(self, mut deliveries: mpsc::Receiver<JobDelivery>) {
        info!("Job intake started");
        while let Some(delivery) = deliveries.recv().await {
            let pipeline = Arc::clone(&self.pipeline);
            tokio::spawn(async move {
                let JobDelivery {
                    payload,
                    completion,
                } = delivery;

                let job = match decode_job(&payload) {
                    Ok(job) => job,
                    Err(err) => {
                        warn!(error = %err, "Undecodable job payload dropped");
                        completion.fail(err.to_string());
                        return;
                    }
                };

                match pipeline.process_job(job).await {
                    Ok(_) => completion.succeed(),
                    Err(err) => completion.fail(err.to_string()),
                }
            });
        }
        info!("Job intake stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_wire_payload() {
        let payload = r#"{
            "verification_code": "VX91KQ",
            "trade_uid": "5512",
            "steam_id": "76561198084531029",
            "user_items": [],
            "bot_items": []
        }"#;
        let job = decode_job(payload).unwrap();
        assert_eq!(job.verification_code, "VX91KQ");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_job("not json"),
            Err(PipelineError::Payload(_))
        ));
    }

    #[tokio::test]
    async fn completion_signals_exactly_once() {
        let (completion, rx) = JobCompletion::new();
        completion.succeed();
        assert_eq!(rx.await.unwrap(), Ok(()));

        let (completion, rx) = JobCompletion::new();
        completion.fail("escrow lookup failed");
        assert_eq!(rx.await.unwrap(), Err("escrow lookup failed".to_string()));
    }
}
