//! Integration tests for the analysis pipeline.
//!
//! Wires the real pipeline, orchestrator and career agent together over
//! the in-process exchange, with a scripted completion endpoint:
//! 1. A registered user gets one diagnostic, then one trail on request
//! 2. An unavailable completion endpoint leaves no records behind
//! 3. Stage 2 runs right after stage 1 when configured to

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use career_path::adapters::completion::MockCompletion;
use career_path::adapters::store::InMemoryUserStore;
use career_path::adapters::transport::{AgentTransport, LocalAgentExchange};
use career_path::application::{
    AnalysisPipeline, PipelineError, PipelineStages, ProfileDiagnosticExtractor, SkillDispatcher,
    Stage, StageReport, StudyTrailOrchestrator,
};
use career_path::config::PipelineConfig;
use career_path::ports::{CompletionError, CompletionOptions, UserStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ALICE_DIAGNOSTIC: &str =
    r#"{"name":"Alice","industry":"Tech","top_skills":[{"skill":"Go","endorsements":5}]}"#;

const CAREER_AGENT: &str = "career-agent";

struct Harness {
    store: InMemoryUserStore,
    diagnostics: MockCompletion,
    skills: MockCompletion,
}

impl Harness {
    fn new(diagnostics: MockCompletion) -> Self {
        Self {
            store: InMemoryUserStore::new(),
            diagnostics,
            skills: MockCompletion::always(r#"{"trilha":["Go avançado","Kubernetes"]}"#),
        }
    }

    fn stages(&self) -> PipelineStages {
        let dispatcher =
            SkillDispatcher::new(Arc::new(self.skills.clone()), CompletionOptions::default());
        let exchange = LocalAgentExchange::new().with_agent(CAREER_AGENT, Arc::new(dispatcher));
        let store: Arc<dyn UserStore> = Arc::new(self.store.clone());

        PipelineStages::new(
            ProfileDiagnosticExtractor::new(
                Arc::new(self.diagnostics.clone()),
                CompletionOptions::default(),
            ),
            StudyTrailOrchestrator::new(
                AgentTransport::new(Arc::new(exchange)).with_timeout(Duration::from_secs(5)),
                Arc::clone(&store),
                CAREER_AGENT,
            ),
            store,
        )
    }
}

async fn next_report(reports: &mut UnboundedReceiver<StageReport>) -> StageReport {
    tokio::time::timeout(Duration::from_secs(5), reports.recv())
        .await
        .expect("no stage report in time")
        .expect("report channel closed")
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn registered_user_gets_diagnostic_then_trail_on_request() {
    let harness = Harness::new(MockCompletion::always(ALICE_DIAGNOSTIC));
    let alice = harness.store.insert_user("alice", "linkedin.com/in/alice");
    let (pipeline, worker) = AnalysisPipeline::new(harness.stages(), &PipelineConfig::default());
    let (worker, mut reports) = worker.with_reports();
    let handle = worker.spawn();

    pipeline.trigger("linkedin.com/in/alice", alice.id);
    assert!(matches!(
        next_report(&mut reports).await,
        StageReport::DiagnosticStored { owner_id, .. } if owner_id == alice.id
    ));

    let records = harness.store.diagnostics_for(alice.id);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_reference, "linkedin.com/in/alice");
    assert_eq!(records[0].raw_text, ALICE_DIAGNOSTIC);
    assert_eq!(harness.store.trail_count(), 0);

    pipeline.request_trail(alice.id);
    assert!(matches!(
        next_report(&mut reports).await,
        StageReport::TrailStored { owner_id, .. } if owner_id == alice.id
    ));

    drop(pipeline);
    handle.await.unwrap();

    let trails = harness.store.list_study_trails(alice.id).await.unwrap();
    assert_eq!(trails.len(), 1);
    assert_eq!(trails[0].owner_id, alice.id);
    assert!(trails[0].content.starts_with("🛤️ **Trilha de Estudos:**"));
    assert!(trails[0].content.contains("Kubernetes"));

    // The agent built its trail prompt from the normalized diagnostic.
    let prompt = &harness.skills.prompts()[0];
    assert!(prompt.contains("Alice"));
    assert!(prompt.contains("Go"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unavailable_completion_leaves_no_records() {
    let harness = Harness::new(MockCompletion::always_failing(CompletionError::unavailable(
        "connection refused",
    )));
    let alice = harness.store.insert_user("alice", "linkedin.com/in/alice");
    let config = PipelineConfig {
        auto_request_trail: true,
        ..Default::default()
    };
    let (pipeline, worker) = AnalysisPipeline::new(harness.stages(), &config);
    let (worker, mut reports) = worker.with_reports();
    let handle = worker.spawn();

    pipeline.trigger("linkedin.com/in/alice", alice.id);
    drop(pipeline);
    handle.await.unwrap();

    assert_eq!(harness.store.diagnostic_count(), 0);
    assert_eq!(harness.store.trail_count(), 0);
    assert_eq!(harness.skills.call_count(), 0);
    assert_eq!(
        reports.recv().await,
        Some(StageReport::Failed {
            owner_id: alice.id,
            stage: Stage::Diagnostic,
            error: PipelineError::Completion(CompletionError::unavailable("connection refused")),
        })
    );
    assert_eq!(reports.recv().await, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn automatic_trail_follows_diagnostic() {
    let harness = Harness::new(MockCompletion::always(ALICE_DIAGNOSTIC));
    let alice = harness.store.insert_user("alice", "linkedin.com/in/alice");
    let bob = harness.store.insert_user("bob", "linkedin.com/in/bob");
    let config = PipelineConfig {
        auto_request_trail: true,
        ..Default::default()
    };
    let (pipeline, worker) = AnalysisPipeline::new(harness.stages(), &config);
    let handle = worker.spawn();

    pipeline.trigger("linkedin.com/in/alice", alice.id);
    pipeline.trigger("linkedin.com/in/bob", bob.id);
    drop(pipeline);
    handle.await.unwrap();

    for user in [&alice, &bob] {
        assert_eq!(harness.store.diagnostics_for(user.id).len(), 1);
        assert_eq!(
            harness.store.list_study_trails(user.id).await.unwrap().len(),
            1
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_diagnostic_still_yields_a_trail() {
    let harness = Harness::new(MockCompletion::always("Desculpe, não consegui acessar a página."));
    let alice = harness.store.insert_user("alice", "linkedin.com/in/alice");
    let config = PipelineConfig {
        auto_request_trail: true,
        ..Default::default()
    };
    let (pipeline, worker) = AnalysisPipeline::new(harness.stages(), &config);
    let handle = worker.spawn();

    pipeline.trigger("linkedin.com/in/alice", alice.id);
    drop(pipeline);
    handle.await.unwrap();

    assert_eq!(harness.store.diagnostic_count(), 1);
    assert_eq!(harness.store.trail_count(), 1);
}
