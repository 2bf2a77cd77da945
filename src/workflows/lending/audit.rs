use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::ApplicantId;

/// Immutable record of one agent action. Entries are append-only: they are
/// never rewritten or deleted while the applicant exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub applicant_id: ApplicantId,
    pub agent: String,
    pub action: String,
    /// Serialized stage result, key-value and losslessly round-trippable.
    pub payload: Value,
    /// Stage execution time in seconds.
    pub execution_time: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only sink for agent activity. Implementations must not drop entries
/// silently and must not interleave the fields of concurrent appends.
pub trait AuditSink: Send + Sync {
    fn append(&self, entry: AuditLogEntry) -> Result<(), AuditError>;
}

/// Error raised when an audit entry cannot be persisted.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
