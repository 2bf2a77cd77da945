use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::artifact::{self, ArtifactKind};
use super::audit::{AuditError, AuditLogEntry, AuditSink};
use super::domain::{Applicant, ApplicantId, ApplicantStatus};
use super::repository::{ApplicantRepository, RepositoryError};
use super::underwriting::{LendingTerms, UnderwritingConfig, UnderwritingEngine};
use super::verification;

pub(crate) const VERIFICATION_AGENT: &str = "verification_agent";
pub(crate) const UNDERWRITING_AGENT: &str = "underwriting_agent";
pub(crate) const DOCUMENT_AGENT: &str = "document_agent";
pub(crate) const MASTER_AGENT: &str = "master_agent";

/// Collaborator handles threaded through one evaluation run.
pub struct ExecutionContext<R, S> {
    pub repository: Arc<R>,
    pub audit: Arc<S>,
}

impl<R, S> Clone for ExecutionContext<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            audit: Arc::clone(&self.audit),
        }
    }
}

/// Pipeline stage a run had reached when it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStage {
    Verification,
    Scoring,
    Decision,
    ArtifactGeneration,
    Completed,
}

impl EvaluationStage {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStage::Verification => "verification",
            EvaluationStage::Scoring => "scoring",
            EvaluationStage::Decision => "decision",
            EvaluationStage::ArtifactGeneration => "artifact_generation",
            EvaluationStage::Completed => "completed",
        }
    }
}

/// Reference to the generated outcome document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub kind: ArtifactKind,
    pub url: String,
}

/// Output of one full pipeline run. Constructed per call and folded into the
/// applicant record and the audit log rather than persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub applicant_id: ApplicantId,
    pub status: ApplicantStatus,
    pub stage: EvaluationStage,
    pub eligibility_score: Option<f64>,
    pub reason: String,
    pub artifact: Option<ArtifactRef>,
}

/// Faults that abort an evaluation run. A failed verification is not one of
/// these; it resolves to a normal rejected result.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("applicant {0} not found")]
    NotFound(ApplicantId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Drives the agents in sequence: verification gates the run, underwriting
/// scores and decides, and a sanction letter or rejection report closes out
/// every decided applicant. Each stage invocation appends exactly one audit
/// entry carrying its own duration; the orchestration entry carries the total
/// elapsed time.
pub struct EvaluationPipeline {
    engine: UnderwritingEngine,
    terms: LendingTerms,
}

impl EvaluationPipeline {
    pub fn new(config: UnderwritingConfig, terms: LendingTerms) -> Self {
        Self {
            engine: UnderwritingEngine::new(config),
            terms,
        }
    }

    /// Run the full evaluation for a stored applicant.
    ///
    /// An unknown id fails before any stage runs and leaves no orchestration
    /// entry. Any fault after that point is recorded with the elapsed time
    /// and then propagated; partial commits are not rolled back.
    pub fn run<R, S>(
        &self,
        ctx: &ExecutionContext<R, S>,
        id: &ApplicantId,
    ) -> Result<EvaluationResult, OrchestrationError>
    where
        R: ApplicantRepository,
        S: AuditSink,
    {
        let started = Instant::now();
        let mut applicant = ctx
            .repository
            .fetch(id)?
            .ok_or_else(|| OrchestrationError::NotFound(id.clone()))?;

        match self.drive(ctx, &mut applicant) {
            Ok(result) => {
                record(
                    ctx,
                    id,
                    MASTER_AGENT,
                    "orchestrate_evaluation",
                    payload_of(&result),
                    started.elapsed(),
                )?;
                Ok(result)
            }
            Err(fault) => {
                let payload = json!({
                    "status": "error",
                    "reason": fault.to_string(),
                    "stage": "processing",
                });
                if let Err(log_error) = record(
                    ctx,
                    id,
                    MASTER_AGENT,
                    "orchestrate_evaluation",
                    payload,
                    started.elapsed(),
                ) {
                    tracing::error!(
                        applicant = %id,
                        error = %log_error,
                        "failed to record pipeline fault"
                    );
                }
                Err(fault)
            }
        }
    }

    fn drive<R, S>(
        &self,
        ctx: &ExecutionContext<R, S>,
        applicant: &mut Applicant,
    ) -> Result<EvaluationResult, OrchestrationError>
    where
        R: ApplicantRepository,
        S: AuditSink,
    {
        let stage_started = Instant::now();
        let report = verification::verify(applicant);
        record(
            ctx,
            &applicant.id,
            VERIFICATION_AGENT,
            "verify_kyc",
            payload_of(&report),
            stage_started.elapsed(),
        )?;

        if !report.success {
            applicant.status = ApplicantStatus::Rejected;
            applicant.reason_summary = Some(report.reason.clone());
            applicant.updated_at = Utc::now();
            ctx.repository.commit(applicant)?;

            return Ok(EvaluationResult {
                applicant_id: applicant.id.clone(),
                status: ApplicantStatus::Rejected,
                stage: EvaluationStage::Verification,
                eligibility_score: None,
                reason: report.reason,
                artifact: None,
            });
        }

        let stage_started = Instant::now();
        let breakdown = self.engine.score(applicant);
        record(
            ctx,
            &applicant.id,
            UNDERWRITING_AGENT,
            "score_eligibility",
            payload_of(&breakdown),
            stage_started.elapsed(),
        )?;

        let stage_started = Instant::now();
        let decision = self.engine.decide(applicant, breakdown.eligibility_score);
        applicant.eligibility_score = breakdown.eligibility_score;
        applicant.status = if decision.approved() {
            ApplicantStatus::Approved
        } else {
            ApplicantStatus::Rejected
        };
        applicant.reason_summary = Some(decision.reason().to_string());
        applicant.updated_at = Utc::now();
        // Decision mutations must be visible before the artifact stage runs.
        ctx.repository.commit(applicant)?;
        record(
            ctx,
            &applicant.id,
            UNDERWRITING_AGENT,
            "decide_outcome",
            payload_of(&decision),
            stage_started.elapsed(),
        )?;

        let stage_started = Instant::now();
        let artifact = artifact::generate(applicant, &decision, &self.terms, Utc::now());
        let action = match artifact.kind {
            ArtifactKind::SanctionLetter => "generate_sanction_letter",
            ArtifactKind::RejectionReport => "generate_rejection_report",
        };
        record(
            ctx,
            &applicant.id,
            DOCUMENT_AGENT,
            action,
            payload_of(&artifact),
            stage_started.elapsed(),
        )?;

        Ok(EvaluationResult {
            applicant_id: applicant.id.clone(),
            status: applicant.status,
            stage: EvaluationStage::Completed,
            eligibility_score: Some(breakdown.eligibility_score),
            reason: decision.reason().to_string(),
            artifact: Some(ArtifactRef {
                kind: artifact.kind,
                url: artifact.url,
            }),
        })
    }
}

fn record<R, S>(
    ctx: &ExecutionContext<R, S>,
    applicant_id: &ApplicantId,
    agent: &str,
    action: &str,
    payload: Value,
    elapsed: Duration,
) -> Result<(), AuditError>
where
    S: AuditSink,
{
    ctx.audit.append(AuditLogEntry {
        applicant_id: applicant_id.clone(),
        agent: agent.to_string(),
        action: action.to_string(),
        payload,
        execution_time: elapsed.as_secs_f64(),
        recorded_at: Utc::now(),
    })
}

// Serialization of the pipeline payload types cannot fail; Null stands in if
// it ever does so an audit entry is still written.
fn payload_of<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
