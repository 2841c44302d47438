use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use admission_sim::admission::{
    admission_router, default_targets, AdmissionService, ConfigRegistry, EvaluationResult,
    GapOutcome, RawScores, SimulationOutcome,
};
use admission_sim::config::AppConfig;
use admission_sim::error::AppError;
use admission_sim::telemetry;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Admission Score Simulator",
    about = "Project standardized-test scores onto university point scales and size the secondary-exam gap",
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
    /// Evaluate one set of self-reported scores and print the projection
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
    /// University name as registered in the scoring table
    #[arg(long)]
    university: String,
    /// Faculty/track name as registered in the scoring table
    #[arg(long)]
    faculty: String,
    /// Japanese raw score (0-200)
    #[arg(long)]
    japanese: u32,
    /// Math part 1 raw score (0-100)
    #[arg(long)]
    math1: u32,
    /// Math part 2 raw score (0-100)
    #[arg(long)]
    math2: u32,
    /// English reading raw score (0-100)
    #[arg(long)]
    reading: u32,
    /// English listening raw score (0-100)
    #[arg(long)]
    listening: u32,
    /// First social-studies answer subject (0-100)
    #[arg(long)]
    social1: u32,
    /// Second social-studies answer subject (0-100)
    #[arg(long, default_value_t = 0)]
    social2: u32,
    /// Combined science input (ceiling depends on the faculty)
    #[arg(long)]
    science: u32,
    /// Information raw score, if the faculty weights it (0-100)
    #[arg(long, default_value_t = 0)]
    information: u32,
    /// Target score override (defaults to the faculty's pass mean)
    #[arg(long)]
    target: Option<f64>,
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

    telemetry::init(&config.log_level)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = Arc::new(AdmissionService::new(ConfigRegistry::standard()));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(admission_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission score service ready");

    axum::serve(listener, app).await?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    // The prometheus recorder is process-global, so every test shares one
    // handle.
    fn test_state(ready: bool) -> AppState {
        static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
        let metrics = HANDLE
            .get_or_init(|| PrometheusMetricLayer::pair().1)
            .clone();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics,
        }
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_startup_flag() {
        let state = test_state(false);
        let response = readiness_endpoint(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let response = metrics_endpoint(State(test_state(true))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        university,
        faculty,
        japanese,
        math1,
        math2,
        reading,
        listening,
        social1,
        social2,
        science,
        information,
        target,
    } = args;

    let raw = RawScores {
        japanese,
        math_1: math1,
        math_2: math2,
        english_reading: reading,
        english_listening: listening,
        social_first: social1,
        social_second: social2,
        science,
        information,
    };

    let service = AdmissionService::new(ConfigRegistry::standard());
    let result = service.evaluate(&university, &faculty, &raw, target, None)?;

    render_projection(&service, &university, &faculty, &result)?;
    Ok(())
}

fn render_projection(
    service: &AdmissionService,
    university: &str,
    faculty: &str,
    result: &EvaluationResult,
) -> Result<(), AppError> {
    println!("Admission projection: {university} {faculty}");
    println!("Target score: {:.2}", result.target_score);

    println!("\nConverted standardized-test scores");
    for category in &result.breakdown.categories {
        println!(
            "- {}: {:.0} x {} = {:.2}",
            category.category.label(),
            category.raw,
            category.weight,
            category.converted
        );
    }
    println!(
        "English composite: {:.0} / 200",
        result.breakdown.english_base
    );
    println!("Total: {:.2}", result.breakdown.total_center_score);

    println!("\nOutcome: {}", result.outcome.summary());

    // For a reachable gap, show the default 50% allocation the form starts from.
    if let GapOutcome::Reachable { required, progress } = result.outcome {
        println!("Secondary-exam budget used: {:.1}%", progress * 100.0);

        let config = service.faculty_config(university, faculty)?;
        let targets = default_targets(config);
        let simulated = service.simulate(university, faculty, &targets, required, None)?;

        println!("\nDefault allocation (half of each subject ceiling)");
        for subject in &config.secondary_subjects {
            if let Some(points) = targets.get(&subject.name) {
                println!("- {}: {} / {}", subject.name, points, subject.max_points);
            }
        }
        println!("Simulated total: {}", simulated.sim_total);
        match simulated.outcome {
            SimulationOutcome::Clears { surplus } => {
                println!("Clears the line with +{surplus:.2}");
            }
            SimulationOutcome::Short { deficit } => {
                println!("Falls short by {deficit:.2}");
            }
        }
    }

    Ok(())
}
