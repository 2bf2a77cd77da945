use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for loan applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employment categories recognized by the underwriting rubric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    Salaried,
    SelfEmployed,
    #[serde(other)]
    Other,
}

impl EmploymentType {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "salaried" => Self::Salaried,
            "self_employed" | "self-employed" => Self::SelfEmployed,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::Salaried => "salaried",
            EmploymentType::SelfEmployed => "self_employed",
            EmploymentType::Other => "other",
        }
    }
}

/// High level status tracked throughout the loan evaluation workflow.
///
/// `Approved` and `Rejected` are terminal for a run; a re-evaluation starts a
/// fresh run that overwrites them but leaves the audit history intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    Evaluating,
    Approved,
    Rejected,
    PendingDocuments,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Evaluating => "evaluating",
            ApplicantStatus::Approved => "approved",
            ApplicantStatus::Rejected => "rejected",
            ApplicantStatus::PendingDocuments => "pending_documents",
        }
    }
}

/// Loan applicant record: identity and financial profile plus the mutable
/// outputs the evaluation pipeline writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Gross monthly income.
    pub income: f64,
    pub requested_amount: f64,
    pub credit_score: u16,
    pub employment_type: EmploymentType,
    pub eligibility_score: f64,
    pub status: ApplicantStatus,
    pub reason_summary: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentDescriptor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Applicant {
    pub fn from_request(
        id: ApplicantId,
        request: LoanApplicationRequest,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            income: request.income,
            requested_amount: request.requested_amount,
            credit_score: request.credit_score,
            employment_type: request.employment_type,
            eligibility_score: 0.0,
            status: ApplicantStatus::Evaluating,
            reason_summary: None,
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Intake payload accepted by the service and HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplicationRequest {
    pub name: String,
    /// Gross monthly income.
    pub income: f64,
    pub requested_amount: f64,
    #[serde(default = "default_credit_score")]
    pub credit_score: u16,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

fn default_credit_score() -> u16 {
    650
}

/// Proof document kinds tracked for an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pan,
    Aadhar,
    SalarySlip,
    BankStatement,
    Itr,
}

/// Metadata for an uploaded proof document. Upload and OCR are collaborator
/// concerns; the pipeline only references these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub kind: DocumentKind,
    pub storage_key: String,
    pub confidence: f64,
}
