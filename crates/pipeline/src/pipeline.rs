use crate::claims::JobClaims;
use crate::error::PipelineError;
use offerbot_escrow::EscrowGate;
use offerbot_inventory::InventoryLoader;
use offerbot_offers::{OfferInitiator, OfferRegistry};
use offerbot_reporting::RecordApi;
use offerbot_steam::{SessionState, SessionTracker};
use offerbot_types::{OfferId, StatusRecord, TradeJob, TradeStatus};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// How far a job has progressed through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStage {
    Intake,
    EscrowChecked,
    InventoryLoaded,
    OfferSent,
    Reported,
    Errored { error: String },
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStage::Intake => write!(f, "intake"),
            JobStage::EscrowChecked => write!(f, "escrow-checked"),
            JobStage::InventoryLoaded => write!(f, "inventory-loaded"),
            JobStage::OfferSent => write!(f, "offer-sent"),
            JobStage::Reported => write!(f, "reported"),
            JobStage::Errored { error } => write!(f, "errored: {error}"),
        }
    }
}

/// What a successfully processed job produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub offer_id: OfferId,
    pub initial_status: TradeStatus,
}

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// Runs trade jobs through escrow, inventory, offer submission and
/// reporting, in that order.
///
/// Every stage boundary is recorded per verification code, and a job
/// that fails anywhere gets exactly one error push to the record
/// service. An offer that reached the network is never rolled back
/// here, whatever happens to the follow-up pushes.
pub struct TradePipeline {
    escrow: EscrowGate,
    loader: InventoryLoader,
    initiator: OfferInitiator,
    reporter: Arc<dyn RecordApi>,
    registry: Arc<OfferRegistry>,
    session: Arc<SessionTracker>,
    claims: JobClaims,
    stages: RwLock<HashMap<String, JobStage>>,
}

impl fmt::Debug for TradePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradePipeline").finish_non_exhaustive()
    }
}

impl TradePipeline {
    pub fn builder() -> TradePipelineBuilder {
        TradePipelineBuilder::default()
    }

    /// Process one trade job end to end.
    ///
    /// Jobs arriving before the session is ready fail without burning
    /// their claim, so a later redelivery can still go through.
    /// Redelivery of a claimed job is dropped at the boundary with no
    /// status push, since the first run already reported.
    pub async fn process_job(&self, job: TradeJob) -> Result<JobReport, PipelineError> {
        let code = job.verification_code.clone();

        let session = self.session.state().await;
        if session != SessionState::Ready {
            let err = PipelineError::SessionNotReady { state: session };
            self.fail_job(&code, &err).await;
            return Err(err);
        }

        if !self.claims.claim(&code).await {
            warn!(verification_code = %code, "Duplicate job dropped");
            return Err(PipelineError::DuplicateJob {
                verification_code: code,
            });
        }

        self.set_stage(&code, JobStage::Intake).await;
        info!(
            verification_code = %code,
            trade_uid = %job.trade_uid,
            partner = %job.partner,
            "Trade job accepted"
        );

        match self.run_stages(&job).await {
            Ok(report) => {
                self.set_stage(&code, JobStage::Reported).await;
                info!(
                    verification_code = %code,
                    offer_id = %report.offer_id,
                    status = %report.initial_status,
                    "Trade job completed"
                );
                Ok(report)
            }
            Err(err) => {
                self.fail_job(&code, &err).await;
                Err(err)
            }
        }
    }

    async fn run_stages(&self, job: &TradeJob) -> Result<JobReport, PipelineError> {
        let code = &job.verification_code;

        let durations = self.escrow.clear(&job.partner, job.token()).await?;
        self.set_stage(code, JobStage::EscrowChecked).await;
        debug!(
            verification_code = %code,
            user_days = durations.user_days,
            bot_days = durations.bot_days,
            "Escrow clear"
        );

        let matched = self
            .loader
            .load_both(&job.partner, &job.items_to_receive, &job.items_to_give)
            .await?;
        self.set_stage(code, JobStage::InventoryLoaded).await;

        let initiated = self
            .initiator
            .initiate(
                &job.partner,
                &matched.bot_items,
                &matched.user_items,
                code,
                job.token(),
            )
            .await?;
        let offer_id = initiated.record.offer_id.clone();
        let initial_status = initiated.initial_status();
        self.registry.insert(initiated.record).await;
        self.set_stage(code, JobStage::OfferSent).await;

        self.reporter.push_trade_id(&job.trade_uid, &offer_id).await?;
        self.reporter
            .push_status(&StatusRecord::for_offer(offer_id.clone(), initial_status))
            .await?;

        Ok(JobReport {
            offer_id,
            initial_status,
        })
    }

    /// Record the failure and push one error status. A failed push is
    /// logged and dropped; the job already counts as failed.
    async fn fail_job(&self, code: &str, err: &PipelineError) {
        error!(verification_code = %code, error = %err, "Trade job failed");
        self.set_stage(
            code,
            JobStage::Errored {
                error: err.to_string(),
            },
        )
        .await;

        let record = StatusRecord::for_verification(code, TradeStatus::Error)
            .with_message(err.to_string());
        if let Err(push_err) = self.reporter.push_status(&record).await {
            warn!(
                verification_code = %code,
                error = %push_err,
                "Error status push failed"
            );
        }
    }

    pub async fn stage(&self, verification_code: &str) -> Option<JobStage> {
        self.stages.read().await.get(verification_code).cloned()
    }

    async fn set_stage(&self, code: &str, stage: JobStage) {
        debug!(verification_code = %code, stage = %stage, "Job stage");
        self.stages.write().await.insert(code.to_string(), stage);
    }
}

/// Builder for [`TradePipeline`]. All components are required.
#[derive(Default)]
pub struct TradePipelineBuilder {
    escrow: Option<EscrowGate>,
    loader: Option<InventoryLoader>,
    initiator: Option<OfferInitiator>,
    reporter: Option<Arc<dyn RecordApi>>,
    registry: Option<Arc<OfferRegistry>>,
    session: Option<Arc<SessionTracker>>,
}

impl TradePipelineBuilder {
    pub fn with_escrow_gate(mut self, escrow: EscrowGate) -> Self {
        self.escrow = Some(escrow);
        self
    }

    pub fn with_inventory_loader(mut self, loader: InventoryLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_offer_initiator(mut self, initiator: OfferInitiator) -> Self {
        self.initiator = Some(initiator);
        self
    }

    pub fn with_record_api(mut self, reporter: Arc<dyn RecordApi>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_offer_registry(mut self, registry: Arc<OfferRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_session_tracker(mut self, session: Arc<SessionTracker>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<TradePipeline, BuilderError> {
        Ok(TradePipeline {
            escrow: self
                .escrow
                .ok_or(BuilderError::MissingField { field: "escrow" })?,
            loader: self
                .loader
                .ok_or(BuilderError::MissingField { field: "loader" })?,
            initiator: self
                .initiator
                .ok_or(BuilderError::MissingField { field: "initiator" })?,
            reporter: self
                .reporter
                .ok_or(BuilderError::MissingField { field: "reporter" })?,
            registry: self
                .registry
                .ok_or(BuilderError::MissingField { field: "registry" })?,
            session: self
                .session
                .ok_or(BuilderError::MissingField { field: "session" })?,
            claims: JobClaims::new(),
            stages: RwLock::new(HashMap::new()),
        })
    }
}
