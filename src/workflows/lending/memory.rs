use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::audit::{AuditError, AuditLogEntry, AuditSink};
use super::domain::{Applicant, ApplicantId};
use super::repository::{ApplicantRepository, RepositoryError};

/// In-memory collaborators backing the CLI demo, the default server wiring,
/// and tests. Durable storage lives behind the same traits at integration
/// time.
#[derive(Default, Clone)]
pub struct InMemoryApplicantStore {
    records: Arc<Mutex<HashMap<ApplicantId, Applicant>>>,
}

impl ApplicantRepository for InMemoryApplicantStore {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("applicant store poisoned".to_string()))?;
        if guard.contains_key(&applicant.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(applicant.id.clone(), applicant.clone());
        Ok(applicant)
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("applicant store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn commit(&self, applicant: &Applicant) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("applicant store poisoned".to_string()))?;
        if !guard.contains_key(&applicant.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(applicant.id.clone(), applicant.clone());
        Ok(())
    }
}

/// Audit sink collecting entries behind a mutex, so concurrent evaluations
/// append whole entries without interleaving.
#[derive(Default, Clone)]
pub struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<AuditLogEntry>>>,
}

impl InMemoryAuditLog {
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn entries_for(&self, id: &ApplicantId) -> Vec<AuditLogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| &entry.applicant_id == id)
            .collect()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn append(&self, entry: AuditLogEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .map_err(|_| AuditError::Unavailable("audit log poisoned".to_string()))?
            .push(entry);
        Ok(())
    }
}
