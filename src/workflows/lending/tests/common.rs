use std::sync::Arc;

use chrono::Utc;

use crate::workflows::lending::audit::{AuditError, AuditLogEntry, AuditSink};
use crate::workflows::lending::domain::{
    Applicant, ApplicantId, EmploymentType, LoanApplicationRequest,
};
use crate::workflows::lending::memory::{InMemoryApplicantStore, InMemoryAuditLog};
use crate::workflows::lending::orchestrator::{EvaluationPipeline, ExecutionContext};
use crate::workflows::lending::repository::{ApplicantRepository, RepositoryError};
use crate::workflows::lending::underwriting::{
    LendingTerms, UnderwritingConfig, UnderwritingEngine,
};
use crate::workflows::lending::LoanApplicationService;

/// Scores 25 + 35 + 25 + 15 = 100: approved outright.
pub(super) fn strong_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        name: "Asha Verma".to_string(),
        income: 100_000.0,
        requested_amount: 200_000.0,
        credit_score: 800,
        employment_type: EmploymentType::Salaried,
        phone: "9876543210".to_string(),
        email: "asha.verma@example.com".to_string(),
    }
}

/// Scores 15 + 15 + 25 + 15 = 70 with credit 680: rejected in the
/// conditional band.
pub(super) fn borderline_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        name: "Rohan Mehta".to_string(),
        income: 55_000.0,
        requested_amount: 800_000.0,
        credit_score: 680,
        employment_type: EmploymentType::Salaried,
        phone: "9123456780".to_string(),
        email: "rohan.mehta@example.com".to_string(),
    }
}

/// Scores 15 + 25 + 10 + 15 = 65 with credit 700 and income 55k: approved on
/// supporting credit and income.
pub(super) fn conditional_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        name: "Meera Iyer".to_string(),
        income: 55_000.0,
        requested_amount: 3_960_000.0,
        credit_score: 700,
        employment_type: EmploymentType::Salaried,
        phone: "9988776655".to_string(),
        email: "meera.iyer@example.com".to_string(),
    }
}

/// Zero income fails KYC while every other field is fine.
pub(super) fn zero_income_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        income: 0.0,
        ..strong_request()
    }
}

pub(super) fn applicant_from(request: LoanApplicationRequest, suffix: &str) -> Applicant {
    Applicant::from_request(
        ApplicantId(format!("apl-test-{suffix}")),
        request,
        Utc::now(),
    )
}

pub(super) fn applicant_with(
    income: f64,
    credit_score: u16,
    requested_amount: f64,
    employment_type: EmploymentType,
) -> Applicant {
    let request = LoanApplicationRequest {
        income,
        credit_score,
        requested_amount,
        employment_type,
        ..strong_request()
    };
    applicant_from(request, "profile")
}

pub(super) fn engine() -> UnderwritingEngine {
    UnderwritingEngine::new(UnderwritingConfig::default())
}

pub(super) fn pipeline() -> EvaluationPipeline {
    EvaluationPipeline::new(UnderwritingConfig::default(), LendingTerms::default())
}

pub(super) fn memory_context() -> ExecutionContext<InMemoryApplicantStore, InMemoryAuditLog> {
    ExecutionContext {
        repository: Arc::new(InMemoryApplicantStore::default()),
        audit: Arc::new(InMemoryAuditLog::default()),
    }
}

pub(super) fn build_service() -> (
    LoanApplicationService<InMemoryApplicantStore, InMemoryAuditLog>,
    Arc<InMemoryApplicantStore>,
    Arc<InMemoryAuditLog>,
) {
    let repository = Arc::new(InMemoryApplicantStore::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let service = LoanApplicationService::new(
        repository.clone(),
        audit.clone(),
        UnderwritingConfig::default(),
        LendingTerms::default(),
    );
    (service, repository, audit)
}

pub(super) struct UnavailableStore;

impl ApplicantRepository for UnavailableStore {
    fn insert(&self, _applicant: Applicant) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn commit(&self, _applicant: &Applicant) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Reads work but every commit is refused, for fault-path coverage.
#[derive(Default)]
pub(super) struct CommitFailStore {
    inner: InMemoryApplicantStore,
}

impl ApplicantRepository for CommitFailStore {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        self.inner.insert(applicant)
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn commit(&self, _applicant: &Applicant) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("commit rejected".to_string()))
    }
}

pub(super) struct ConflictStore;

impl ApplicantRepository for ConflictStore {
    fn insert(&self, _applicant: Applicant) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        Ok(None)
    }

    fn commit(&self, _applicant: &Applicant) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) struct FailingAuditSink;

impl AuditSink for FailingAuditSink {
    fn append(&self, _entry: AuditLogEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("sink offline".to_string()))
    }
}
