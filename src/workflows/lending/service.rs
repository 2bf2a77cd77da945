use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::audit::{AuditError, AuditSink};
use super::domain::{Applicant, ApplicantId, LoanApplicationRequest};
use super::orchestrator::{
    EvaluationPipeline, EvaluationResult, ExecutionContext, OrchestrationError,
};
use super::repository::{ApplicantRepository, RepositoryError};
use super::underwriting::{LendingTerms, UnderwritingConfig};

/// Service composing the evaluation pipeline with its storage and audit
/// collaborators.
pub struct LoanApplicationService<R, S> {
    context: ExecutionContext<R, S>,
    pipeline: EvaluationPipeline,
}

static APPLICANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_applicant_id() -> ApplicantId {
    let id = APPLICANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicantId(format!("apl-{id:06}"))
}

impl<R, S> LoanApplicationService<R, S>
where
    R: ApplicantRepository + 'static,
    S: AuditSink + 'static,
{
    pub fn new(
        repository: Arc<R>,
        audit: Arc<S>,
        config: UnderwritingConfig,
        terms: LendingTerms,
    ) -> Self {
        Self {
            context: ExecutionContext { repository, audit },
            pipeline: EvaluationPipeline::new(config, terms),
        }
    }

    /// Register a new applicant, returning the stored record.
    pub fn submit(&self, request: LoanApplicationRequest) -> Result<Applicant, ServiceError> {
        let applicant = Applicant::from_request(next_applicant_id(), request, Utc::now());
        let stored = self.context.repository.insert(applicant)?;
        Ok(stored)
    }

    /// Run the full evaluation pipeline for a stored applicant.
    pub fn evaluate(&self, id: &ApplicantId) -> Result<EvaluationResult, ServiceError> {
        let result = self.pipeline.run(&self.context, id)?;
        Ok(result)
    }

    /// Register and evaluate in one call: the instant eligibility check.
    pub fn check_eligibility(
        &self,
        request: LoanApplicationRequest,
    ) -> Result<EvaluationResult, ServiceError> {
        let stored = self.submit(request)?;
        self.evaluate(&stored.id)
    }

    /// Fetch the stored applicant for API responses.
    pub fn get(&self, id: &ApplicantId) -> Result<Applicant, ServiceError> {
        let applicant = self
            .context
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(applicant)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),
}
