//! Application layer - pipeline stages and agent behavior.
//!
//! Coordinates domain logic with the ports:
//! - `ProfileDiagnosticExtractor` - profile reference to raw diagnostic
//! - `StudyTrailOrchestrator` - diagnostic to stored study trail
//! - `AnalysisPipeline` / `StageWorker` - detached two-stage coordinator
//! - `SkillDispatcher` - the career agent
//! - `ScoreAgent` - the score-calculator agent

mod dispatcher;
mod error;
mod extractor;
mod orchestrator;
mod pipeline;
mod score_agent;

pub use dispatcher::{ScoreDelegate, SkillDispatcher, DECISION_TEMPERATURE};
pub use error::PipelineError;
pub use extractor::ProfileDiagnosticExtractor;
pub use orchestrator::StudyTrailOrchestrator;
pub use pipeline::{
    AnalysisPipeline, PipelineStages, Reporter, Stage, StageJob, StageReport, StageWorker,
};
pub use score_agent::ScoreAgent;
