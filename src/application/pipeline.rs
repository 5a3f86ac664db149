//! AnalysisPipeline - detached diagnostic and study-trail stages.
//!
//! Triggers enqueue a job on a bounded queue and return immediately. A
//! single `StageWorker` drains the queue, running up to
//! `max_concurrent_jobs` stages at a time.
//!
//! ```text
//! trigger(reference, owner) ──► [queue] ──► StageWorker ──► stage 1: extract → store diagnostic
//!                                                 │                 └─(auto)─► stage 2
//! request_trail(owner) ──────► [queue] ───────────┘           stage 2: latest diagnostic → agent → store trail
//! ```
//!
//! Delivery is at most once. A job dropped because the queue is full, or a
//! stage that fails, is logged and forgotten; the trigger never observes
//! the outcome. Tests and the CLI can subscribe to `StageReport`s to see
//! what happened.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info, warn};

use super::error::PipelineError;
use super::extractor::ProfileDiagnosticExtractor;
use super::orchestrator::StudyTrailOrchestrator;
use crate::config::PipelineConfig;
use crate::domain::diagnostic::ProfileReference;
use crate::domain::foundation::UserId;
use crate::ports::UserStore;

/// Work item for the stage worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageJob {
    Diagnose {
        profile_reference: ProfileReference,
        owner_id: UserId,
    },
    RequestTrail {
        owner_id: UserId,
    },
}

impl StageJob {
    pub fn owner_id(&self) -> UserId {
        match self {
            StageJob::Diagnose { owner_id, .. } | StageJob::RequestTrail { owner_id } => *owner_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Diagnostic,
    StudyTrail,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Diagnostic => write!(f, "diagnostic"),
            Stage::StudyTrail => write!(f, "study_trail"),
        }
    }
}

/// Outcome of one stage, for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageReport {
    DiagnosticStored { owner_id: UserId, record_id: i64 },
    TrailStored { owner_id: UserId, trail_id: i64 },
    Failed {
        owner_id: UserId,
        stage: Stage,
        error: PipelineError,
    },
}

/// Everything a stage needs. Shared by all running jobs.
pub struct PipelineStages {
    extractor: ProfileDiagnosticExtractor,
    orchestrator: StudyTrailOrchestrator,
    store: Arc<dyn UserStore>,
    auto_request_trail: bool,
}

impl PipelineStages {
    pub fn new(
        extractor: ProfileDiagnosticExtractor,
        orchestrator: StudyTrailOrchestrator,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            extractor,
            orchestrator,
            store,
            auto_request_trail: false,
        }
    }

    /// Run stage 2 right after a diagnostic is stored.
    pub fn with_auto_request_trail(mut self, enabled: bool) -> Self {
        self.auto_request_trail = enabled;
        self
    }

    /// Stage 1: extract and store a diagnostic, then optionally stage 2.
    pub async fn diagnose(
        &self,
        reference: &ProfileReference,
        owner_id: UserId,
        reports: &Reporter,
    ) -> Result<(), PipelineError> {
        info!(%owner_id, %reference, "diagnostic stage started");

        let raw = self.extractor.extract(reference).await?;
        let record = self
            .store
            .create_diagnostic(&raw, reference.as_str(), owner_id)
            .await?;

        info!(%owner_id, record_id = record.id, "diagnostic stored");
        reports.send(StageReport::DiagnosticStored {
            owner_id,
            record_id: record.id,
        });

        if self.auto_request_trail {
            self.run_trail(&record.raw_text, owner_id, reports).await;
        }
        Ok(())
    }

    /// Stage 2 on demand: trail from the latest stored diagnostic.
    pub async fn request_trail_for(
        &self,
        owner_id: UserId,
        reports: &Reporter,
    ) -> Result<(), PipelineError> {
        let record = self
            .store
            .latest_diagnostic(owner_id)
            .await?
            .ok_or(PipelineError::MissingDiagnostic(owner_id))?;

        let trail = self.orchestrator.request_trail(&record.raw_text, owner_id).await?;
        reports.send(StageReport::TrailStored {
            owner_id,
            trail_id: trail.id,
        });
        Ok(())
    }

    async fn run_trail(&self, diagnostic_text: &str, owner_id: UserId, reports: &Reporter) {
        info!(%owner_id, "study trail stage started");
        match self.orchestrator.request_trail(diagnostic_text, owner_id).await {
            Ok(trail) => reports.send(StageReport::TrailStored {
                owner_id,
                trail_id: trail.id,
            }),
            Err(e) => reports.failed(owner_id, Stage::StudyTrail, e),
        }
    }

    async fn run(&self, job: StageJob, reports: &Reporter) {
        let owner_id = job.owner_id();
        let (stage, result) = match job {
            StageJob::Diagnose {
                profile_reference,
                owner_id,
            } => (
                Stage::Diagnostic,
                self.diagnose(&profile_reference, owner_id, reports).await,
            ),
            StageJob::RequestTrail { owner_id } => {
                info!(%owner_id, "study trail stage started");
                (
                    Stage::StudyTrail,
                    self.request_trail_for(owner_id, reports).await,
                )
            }
        };

        if let Err(e) = result {
            reports.failed(owner_id, stage, e);
        }
    }
}

/// Optional sink for stage outcomes. Failures are logged either way.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    sink: Option<mpsc::UnboundedSender<StageReport>>,
}

impl Reporter {
    pub fn silent() -> Self {
        Self::default()
    }

    fn send(&self, report: StageReport) {
        if let Some(sink) = &self.sink {
            // Nobody listening any more is fine.
            let _ = sink.send(report);
        }
    }

    fn failed(&self, owner_id: UserId, stage: Stage, error: PipelineError) {
        error!(%owner_id, %stage, error = %error, "pipeline stage failed");
        self.send(StageReport::Failed {
            owner_id,
            stage,
            error,
        });
    }
}

/// Trigger side of the pipeline. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    queue: mpsc::Sender<StageJob>,
}

impl AnalysisPipeline {
    /// Creates the trigger handle and the worker that serves it.
    pub fn new(stages: PipelineStages, config: &PipelineConfig) -> (Self, StageWorker) {
        let (queue, jobs) = mpsc::channel(config.queue_capacity.max(1));
        let worker = StageWorker {
            jobs,
            stages: Arc::new(stages.with_auto_request_trail(config.auto_request_trail)),
            permits: Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1))),
            reports: Reporter::silent(),
        };
        (Self { queue }, worker)
    }

    /// "User registered with `profile_reference`". Never blocks, never fails.
    pub fn trigger(&self, profile_reference: &str, owner_id: UserId) {
        let profile_reference = match ProfileReference::new(profile_reference) {
            Ok(reference) => reference,
            Err(e) => {
                warn!(%owner_id, error = %e, "ignoring trigger with invalid profile reference");
                return;
            }
        };
        self.enqueue(StageJob::Diagnose {
            profile_reference,
            owner_id,
        });
    }

    /// On-demand stage 2 against the latest diagnostic of `owner_id`.
    pub fn request_trail(&self, owner_id: UserId) {
        self.enqueue(StageJob::RequestTrail { owner_id });
    }

    /// Enqueues `job`, reporting why it was dropped if it was.
    pub fn try_enqueue(&self, job: StageJob) -> Result<(), PipelineError> {
        self.queue.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => PipelineError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => PipelineError::QueueClosed,
        })
    }

    fn enqueue(&self, job: StageJob) {
        let owner_id = job.owner_id();
        if let Err(e) = self.try_enqueue(job) {
            warn!(%owner_id, error = %e, "pipeline job dropped");
        }
    }
}

/// Drains the queue. Stops once every `AnalysisPipeline` handle is gone
/// and the jobs already started have finished.
pub struct StageWorker {
    jobs: mpsc::Receiver<StageJob>,
    stages: Arc<PipelineStages>,
    permits: Arc<Semaphore>,
    reports: Reporter,
}

impl StageWorker {
    /// Subscribes to stage outcomes.
    pub fn with_reports(mut self) -> (Self, mpsc::UnboundedReceiver<StageReport>) {
        let (sink, reports) = mpsc::unbounded_channel();
        self.reports = Reporter { sink: Some(sink) };
        (self, reports)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        let mut running = JoinSet::new();

        loop {
            tokio::select! {
                job = self.jobs.recv() => {
                    let Some(job) = job else { break };
                    let permit = match Arc::clone(&self.permits).acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => break,
                    };
                    let stages = Arc::clone(&self.stages);
                    let reports = self.reports.clone();
                    running.spawn(async move {
                        stages.run(job, &reports).await;
                        drop(permit);
                    });
                }
                Some(finished) = running.join_next(), if !running.is_empty() => {
                    if let Err(e) = finished {
                        error!(error = %e, "pipeline stage panicked");
                    }
                }
            }
        }

        while let Some(finished) = running.join_next().await {
            if let Err(e) = finished {
                error!(error = %e, "pipeline stage panicked");
            }
        }
        info!("pipeline worker stopped");
    }
}
