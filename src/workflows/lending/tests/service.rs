use std::sync::Arc;

use super::common::*;
use crate::workflows::lending::domain::{ApplicantId, ApplicantStatus};
use crate::workflows::lending::memory::InMemoryAuditLog;
use crate::workflows::lending::orchestrator::{EvaluationStage, OrchestrationError};
use crate::workflows::lending::repository::{ApplicantRepository, RepositoryError};
use crate::workflows::lending::underwriting::{LendingTerms, UnderwritingConfig};
use crate::workflows::lending::{LoanApplicationService, ServiceError};

#[test]
fn submit_assigns_sequential_ids() {
    let (service, _, _) = build_service();

    let first = service.submit(strong_request()).expect("first submit");
    let second = service.submit(borderline_request()).expect("second submit");

    assert!(first.id.0.starts_with("apl-"));
    assert!(second.id.0.starts_with("apl-"));
    assert_ne!(first.id, second.id);
    assert_eq!(first.status, ApplicantStatus::Evaluating);
    assert_eq!(first.eligibility_score, 0.0);
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&ApplicantId("apl-missing".to_string())) {
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn evaluate_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.evaluate(&ApplicantId("apl-missing".to_string())) {
        Err(ServiceError::Orchestration(OrchestrationError::NotFound(_))) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn submit_propagates_conflicts() {
    let service = LoanApplicationService::new(
        Arc::new(ConflictStore),
        Arc::new(InMemoryAuditLog::default()),
        UnderwritingConfig::default(),
        LendingTerms::default(),
    );

    match service.submit(strong_request()) {
        Err(ServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn evaluate_writes_the_outcome_back() {
    let (service, repository, _) = build_service();
    let applicant = service.submit(conditional_request()).expect("submit");

    let result = service.evaluate(&applicant.id).expect("evaluate");

    assert_eq!(result.status, ApplicantStatus::Approved);
    assert_eq!(result.stage, EvaluationStage::Completed);

    let stored = repository
        .fetch(&applicant.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, ApplicantStatus::Approved);
    assert_eq!(stored.eligibility_score, 65.0);
    assert!(stored
        .reason_summary
        .as_deref()
        .expect("reason recorded")
        .contains("good credit and income"));
}

#[test]
fn check_eligibility_registers_and_evaluates() {
    let (service, _, audit) = build_service();

    let result = service
        .check_eligibility(strong_request())
        .expect("one-shot evaluation");

    assert_eq!(result.status, ApplicantStatus::Approved);
    assert_eq!(result.eligibility_score, Some(100.0));
    assert_eq!(audit.entries_for(&result.applicant_id).len(), 5);

    let stored = service.get(&result.applicant_id).expect("record persisted");
    assert_eq!(stored.status, ApplicantStatus::Approved);
}
