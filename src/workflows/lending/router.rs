use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::audit::AuditSink;
use super::domain::{ApplicantId, LoanApplicationRequest};
use super::orchestrator::OrchestrationError;
use super::repository::{ApplicantRepository, RepositoryError};
use super::service::{LoanApplicationService, ServiceError};

/// Router builder exposing HTTP endpoints for intake and evaluation.
pub fn loan_router<R, S>(service: Arc<LoanApplicationService<R, S>>) -> Router
where
    R: ApplicantRepository + 'static,
    S: AuditSink + 'static,
{
    Router::new()
        .route("/api/v1/loans/applications", post(submit_handler::<R, S>))
        .route(
            "/api/v1/loans/applications/:applicant_id",
            get(status_handler::<R, S>),
        )
        .route(
            "/api/v1/loans/applications/:applicant_id/evaluate",
            post(evaluate_handler::<R, S>),
        )
        .route(
            "/api/v1/loans/eligibility",
            post(eligibility_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<LoanApplicationService<R, S>>>,
    Json(request): Json<LoanApplicationRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: AuditSink + 'static,
{
    match service.submit(request) {
        Ok(applicant) => (StatusCode::CREATED, Json(applicant.status_view())).into_response(),
        Err(ServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "applicant already exists",
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R, S>(
    State(service): State<Arc<LoanApplicationService<R, S>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: AuditSink + 'static,
{
    let id = ApplicantId(applicant_id);
    match service.get(&id) {
        Ok(applicant) => (StatusCode::OK, Json(applicant.status_view())).into_response(),
        Err(error) if is_not_found(&error) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn evaluate_handler<R, S>(
    State(service): State<Arc<LoanApplicationService<R, S>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: AuditSink + 'static,
{
    let id = ApplicantId(applicant_id);
    match service.evaluate(&id) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) if is_not_found(&error) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn eligibility_handler<R, S>(
    State(service): State<Arc<LoanApplicationService<R, S>>>,
    Json(request): Json<LoanApplicationRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
    S: AuditSink + 'static,
{
    match service.check_eligibility(request) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(other) => internal_error(other),
    }
}

fn is_not_found(error: &ServiceError) -> bool {
    matches!(
        error,
        ServiceError::Repository(RepositoryError::NotFound)
            | ServiceError::Orchestration(OrchestrationError::NotFound(_))
    )
}

fn not_found(id: &ApplicantId) -> Response {
    let payload = json!({
        "error": format!("applicant {} not found", id.0),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn internal_error(error: ServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
