use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use lending_ai::config::AppConfig;
use lending_ai::error::AppError;
use lending_ai::telemetry;
use lending_ai::workflows::lending::{
    loan_router, EmploymentType, InMemoryApplicantStore, InMemoryAuditLog, LendingTerms,
    LoanApplicationRequest, LoanApplicationService, UnderwritingConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Agentic Lending Orchestrator",
    about = "Run the loan evaluation service or drive a single evaluation from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate one applicant offline and print the outcome with its audit trail
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Applicant full name
    #[arg(long)]
    name: String,
    /// Gross monthly income
    #[arg(long)]
    income: f64,
    /// Requested loan amount
    #[arg(long)]
    requested_amount: f64,
    /// Bureau credit score
    #[arg(long, default_value_t = 650)]
    credit_score: u16,
    /// Employment type (salaried, self_employed, other)
    #[arg(long, default_value = "salaried")]
    employment_type: String,
    /// Contact phone number
    #[arg(long, default_value = "")]
    phone: String,
    /// Contact e-mail address
    #[arg(long, default_value = "")]
    email: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Evaluate(args) => run_evaluate(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let repository = Arc::new(InMemoryApplicantStore::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let terms = LendingTerms {
        annual_interest_rate_bps: config.lending.interest_rate_bps,
        sanction_validity_days: config.lending.sanction_validity_days,
        ..LendingTerms::default()
    };
    let service = Arc::new(LoanApplicationService::new(
        repository,
        audit,
        UnderwritingConfig::default(),
        terms,
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(loan_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan evaluation orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryApplicantStore::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let service = LoanApplicationService::new(
        repository,
        audit.clone(),
        UnderwritingConfig::default(),
        LendingTerms::default(),
    );

    let request = LoanApplicationRequest {
        name: args.name,
        income: args.income,
        requested_amount: args.requested_amount,
        credit_score: args.credit_score,
        employment_type: EmploymentType::from_label(&args.employment_type),
        phone: args.phone,
        email: args.email,
    };

    let applicant = service.submit(request)?;
    let result = service.evaluate(&applicant.id)?;

    println!("Loan evaluation demo");
    println!("Applicant: {} ({})", applicant.name, applicant.id);
    println!(
        "Outcome: {} at stage {}",
        result.status.label(),
        result.stage.label()
    );
    if let Some(score) = result.eligibility_score {
        println!("Eligibility score: {score:.1}");
    }
    println!("Reason: {}", result.reason);
    if let Some(artifact) = &result.artifact {
        println!("Artifact: {} -> {}", artifact.kind.label(), artifact.url);
    }

    println!("\nAudit trail");
    for entry in audit.entries() {
        println!(
            "- {} {} ({:.3}s)",
            entry.agent, entry.action, entry.execution_time
        );
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
