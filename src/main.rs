use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use career_path::adapters::completion::{BlockingCompletion, HttpCompletionClient, PersonaCompletion};
use career_path::adapters::http::{agent_routes, AgentHandlers};
use career_path::adapters::store::PostgresUserStore;
use career_path::adapters::transport::{AgentTransport, HttpAgentExchange};
use career_path::application::{
    AnalysisPipeline, PipelineError, PipelineStages, ProfileDiagnosticExtractor, ScoreAgent,
    ScoreDelegate, SkillDispatcher, StageJob, StageReport, StudyTrailOrchestrator,
};
use career_path::config::{AppConfig, ConfigError, ValidationError};
use career_path::domain::agent::prompts::quick_advice_prompt;
use career_path::domain::agent::AgentMessage;
use career_path::domain::diagnostic::ProfileReference;
use career_path::domain::foundation::{DomainError, ErrorCode};
use career_path::ports::{
    CompletionError, MessageHandler, PersistenceError, TextCompletion, TransportError, User,
    UserStore,
};

#[derive(Parser)]
#[command(name = "career-path", version, about = "Profile diagnostics, study trails and the career agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the career agent HTTP server
    ServeAgent {
        /// Overrides CAREER_PATH__SERVER__PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the score-calculator agent HTTP server
    ServeScoreAgent {
        /// Overrides CAREER_PATH__SERVER__PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Diagnose a user's profile and store the result
    Analyze {
        #[arg(long)]
        username: String,
        /// Profile URL; defaults to the one given at registration
        #[arg(long)]
        reference: Option<String>,
    },
    /// Generate a study trail from the user's latest diagnostic
    RequestTrail {
        #[arg(long)]
        username: String,
    },
    /// List a user's stored study trails
    Trails {
        #[arg(long)]
        username: String,
    },
    /// Send a message to the career agent and print its reply
    Chat {
        text: String,
    },
    /// Quick career advice straight from the model
    Ask {
        question: String,
        /// Extra context for the mentor
        #[arg(long)]
        context: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("agent replied without text")]
    NonTextReply,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "career_path=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate()?;

    // `chat` and `ask` stay blocking; the transport and the blocking
    // completion facade bring their own runtimes.
    match cli.command {
        Commands::Chat { text } => chat(&config, &text),
        Commands::Ask { question, context } => ask(&config, &question, context.as_deref()),
        Commands::ServeAgent { port } => block_on(async {
            let dispatcher = career_dispatcher(&config)?;
            serve(&config, port, Arc::new(dispatcher)).await
        }),
        Commands::ServeScoreAgent { port } => {
            block_on(serve(&config, port, Arc::new(ScoreAgent::new())))
        }
        Commands::Analyze {
            username,
            reference,
        } => block_on(analyze(&config, &username, reference)),
        Commands::RequestTrail { username } => block_on(async {
            let store = user_store(&config).await?;
            let user = active_user(store.as_ref(), &username).await?;
            run_job(&config, store, StageJob::RequestTrail { owner_id: user.id }).await
        }),
        Commands::Trails { username } => block_on(async {
            let store = user_store(&config).await?;
            let user = active_user(store.as_ref(), &username).await?;
            let trails = store.list_study_trails(user.id).await?;
            println!("{}", serde_json::to_string_pretty(&trails)?);
            Ok(())
        }),
    }
}

fn block_on<F>(future: F) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
{
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(future)
}

async fn analyze(
    config: &AppConfig,
    username: &str,
    reference: Option<String>,
) -> Result<(), CliError> {
    let store = user_store(config).await?;
    let user = active_user(store.as_ref(), username).await?;
    let reference = reference.unwrap_or_else(|| user.profile_reference.clone());
    let profile_reference =
        ProfileReference::new(reference).map_err(DomainError::from)?;

    run_job(
        config,
        store,
        StageJob::Diagnose {
            profile_reference,
            owner_id: user.id,
        },
    )
    .await
}

fn completion_client(config: &AppConfig) -> Result<Arc<dyn TextCompletion>, CliError> {
    Ok(Arc::new(HttpCompletionClient::new(
        config.completion.client_config(),
    )?))
}

fn agent_transport(config: &AppConfig) -> Result<AgentTransport, CliError> {
    Ok(AgentTransport::new(Arc::new(HttpAgentExchange::new()?))
        .with_timeout(config.agent.request_timeout()))
}

fn career_dispatcher(config: &AppConfig) -> Result<SkillDispatcher, CliError> {
    let raw = completion_client(config)?;
    let skills: Arc<dyn TextCompletion> = if config.agent.use_persona {
        Arc::new(PersonaCompletion::new(Arc::clone(&raw)))
    } else {
        Arc::clone(&raw)
    };

    let mut dispatcher = SkillDispatcher::new(skills, config.completion.options());
    if let Some(score_url) = &config.agent.score_agent_url {
        info!(%score_url, "score delegation enabled");
        dispatcher = dispatcher.with_delegate(ScoreDelegate::new(
            raw,
            agent_transport(config)?,
            score_url.clone(),
        ));
    }
    Ok(dispatcher)
}

async fn serve(
    config: &AppConfig,
    port: Option<u16>,
    agent: Arc<dyn MessageHandler>,
) -> Result<(), CliError> {
    let mut addr: SocketAddr = config.server.socket_addr()?;
    if let Some(port) = port {
        addr.set_port(port);
    }

    let card = agent.card();
    let app = agent_routes(AgentHandlers::new(agent), config.server.request_timeout());
    let listener = TcpListener::bind(addr).await?;
    info!(agent = %card.name, %addr, "agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("agent stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

async fn user_store(config: &AppConfig) -> Result<Arc<dyn UserStore>, CliError> {
    config.validate_with_database()?;
    Ok(Arc::new(PostgresUserStore::connect(&config.database).await?))
}

async fn active_user(store: &dyn UserStore, username: &str) -> Result<User, CliError> {
    let user = store
        .find_user(username)
        .await?
        .ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("unknown user: {}", username))
        })?;
    if user.disabled {
        return Err(DomainError::new(
            ErrorCode::UserDisabled,
            format!("user {} is disabled", username),
        )
        .into());
    }
    Ok(user)
}

/// Runs one job through the pipeline and waits for the queue to drain.
async fn run_job(
    config: &AppConfig,
    store: Arc<dyn UserStore>,
    job: StageJob,
) -> Result<(), CliError> {
    let stages = PipelineStages::new(
        ProfileDiagnosticExtractor::new(completion_client(config)?, config.completion.options()),
        StudyTrailOrchestrator::new(
            agent_transport(config)?,
            Arc::clone(&store),
            config.agent.career_agent_url.clone(),
        ),
        Arc::clone(&store),
    );
    let (pipeline, worker) = AnalysisPipeline::new(stages, &config.pipeline);
    let (worker, mut reports) = worker.with_reports();
    let handle = worker.spawn();

    pipeline.try_enqueue(job)?;
    drop(pipeline);
    if let Err(e) = handle.await {
        tracing::error!(error = %e, "pipeline worker failed");
    }

    let mut failure = None;
    while let Some(report) = reports.recv().await {
        match report {
            StageReport::DiagnosticStored {
                owner_id,
                record_id,
            } => println!("diagnostic {} stored for user {}", record_id, owner_id),
            StageReport::TrailStored { owner_id, trail_id } => {
                println!("study trail {} stored for user {}", trail_id, owner_id)
            }
            StageReport::Failed { stage, error, .. } => {
                eprintln!("{} stage failed: {}", stage, error);
                failure = Some(error);
            }
        }
    }

    match failure {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn chat(config: &AppConfig, text: &str) -> Result<(), CliError> {
    let transport = agent_transport(config)?;
    let reply = transport.send(AgentMessage::user_text(text), &config.agent.career_agent_url)?;
    let text = reply.text().ok_or(CliError::NonTextReply)?;
    println!("{}", text);
    Ok(())
}

fn ask(config: &AppConfig, question: &str, context: Option<&str>) -> Result<(), CliError> {
    let completion = BlockingCompletion::new(completion_client(config)?);
    let advice = completion.complete(
        &quick_advice_prompt(question, context),
        &config.completion.options(),
    )?;
    println!("{}", advice);
    Ok(())
}
