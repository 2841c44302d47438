use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    EvaluationError, GapOutcome, RawScores, ScoreBreakdown, SimulationOutcome,
};
use super::history::EvaluationSnapshot;
use super::service::AdmissionService;

/// Router builder exposing the evaluation, simulation, and history endpoints.
pub fn admission_router(service: Arc<AdmissionService>) -> Router {
    Router::new()
        .route("/api/v1/admission/universities", get(catalog_handler))
        .route("/api/v1/admission/evaluate", post(evaluate_handler))
        .route("/api/v1/admission/simulate", post(simulate_handler))
        .route("/api/v1/admission/history/:session", get(history_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub university: String,
    pub faculty: String,
    pub raw_scores: RawScores,
    #[serde(default)]
    pub target_score: Option<f64>,
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub university: String,
    pub faculty: String,
    pub breakdown: ScoreBreakdown,
    pub target_score: f64,
    pub required_secondary: f64,
    pub outcome: GapOutcome,
    pub outcome_summary: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SimulateRequest {
    pub university: String,
    pub faculty: String,
    pub targets: BTreeMap<String, u32>,
    pub required: f64,
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SimulateResponse {
    pub sim_total: u32,
    pub gap: f64,
    pub outcome: SimulationOutcome,
    pub outcome_summary: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryResponse {
    pub session: String,
    pub records: Vec<EvaluationSnapshot>,
}

fn error_response(error: EvaluationError) -> Response {
    let status = match &error {
        EvaluationError::ConfigurationNotFound { .. } => StatusCode::NOT_FOUND,
        EvaluationError::InputOutOfRange { .. }
        | EvaluationError::UnknownSubject { .. }
        | EvaluationError::MissingSubjectTarget { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationError::ConfigurationIncomplete { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn catalog_handler(State(service): State<Arc<AdmissionService>>) -> Response {
    (StatusCode::OK, axum::Json(service.catalog())).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<AdmissionService>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response {
    let EvaluateRequest {
        university,
        faculty,
        raw_scores,
        target_score,
        session,
    } = request;

    match service.evaluate(
        &university,
        &faculty,
        &raw_scores,
        target_score,
        session.as_deref(),
    ) {
        Ok(result) => {
            let body = EvaluateResponse {
                university,
                faculty,
                outcome_summary: result.outcome.summary(),
                breakdown: result.breakdown,
                target_score: result.target_score,
                required_secondary: result.required_secondary,
                outcome: result.outcome,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn simulate_handler(
    State(service): State<Arc<AdmissionService>>,
    axum::Json(request): axum::Json<SimulateRequest>,
) -> Response {
    let SimulateRequest {
        university,
        faculty,
        targets,
        required,
        session,
    } = request;

    match service.simulate(&university, &faculty, &targets, required, session.as_deref()) {
        Ok(result) => {
            let body = SimulateResponse {
                sim_total: result.sim_total,
                gap: result.gap,
                outcome_summary: result.outcome.summary(),
                outcome: result.outcome,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler(
    State(service): State<Arc<AdmissionService>>,
    Path(session): Path<String>,
) -> Response {
    let records = service.history().recent_first(&session);
    let body = HistoryResponse { session, records };
    (StatusCode::OK, axum::Json(body)).into_response()
}
