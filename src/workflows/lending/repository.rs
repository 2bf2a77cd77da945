use serde::Serialize;

use super::domain::{Applicant, ApplicantId};

/// Storage abstraction so the orchestrator and service can be exercised in
/// isolation. `commit` persists the mutated fields of an existing record
/// atomically.
pub trait ApplicantRepository: Send + Sync {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError>;
    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError>;
    fn commit(&self, applicant: &Applicant) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an applicant's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantStatusView {
    pub applicant_id: ApplicantId,
    pub status: &'static str,
    pub eligibility_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_summary: Option<String>,
}

impl Applicant {
    pub fn status_view(&self) -> ApplicantStatusView {
        ApplicantStatusView {
            applicant_id: self.id.clone(),
            status: self.status.label(),
            eligibility_score: self.eligibility_score,
            reason_summary: self.reason_summary.clone(),
        }
    }
}
