use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Applicant;
use super::underwriting::{LendingTerms, LoanDecision};

/// Kind of document produced at the end of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    SanctionLetter,
    RejectionReport,
}

impl ArtifactKind {
    pub const fn label(self) -> &'static str {
        match self {
            ArtifactKind::SanctionLetter => "sanction_letter",
            ArtifactKind::RejectionReport => "rejection_report",
        }
    }
}

/// Rendered outcome document. The physical PDF is a collaborator concern; the
/// core produces the text content and the deterministic storage path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanArtifact {
    pub kind: ArtifactKind,
    pub url: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

/// Render the sanction letter or rejection report for a decided applicant.
pub fn generate(
    applicant: &Applicant,
    decision: &LoanDecision,
    terms: &LendingTerms,
    generated_at: DateTime<Utc>,
) -> LoanArtifact {
    match decision {
        LoanDecision::Approved { .. } => LoanArtifact {
            kind: ArtifactKind::SanctionLetter,
            url: format!("/sanction_letters/{}.pdf", applicant.id),
            content: sanction_letter(applicant, terms, generated_at),
            generated_at,
        },
        LoanDecision::Rejected { reason } => LoanArtifact {
            kind: ArtifactKind::RejectionReport,
            url: format!("/rejection_reports/{}.pdf", applicant.id),
            content: rejection_report(applicant, reason, terms, generated_at),
            generated_at,
        },
    }
}

fn sanction_letter(
    applicant: &Applicant,
    terms: &LendingTerms,
    generated_at: DateTime<Utc>,
) -> String {
    format!(
        "LOAN SANCTION LETTER\n\
         \n\
         Date: {date}\n\
         Reference: {reference}\n\
         \n\
         Dear {name},\n\
         \n\
         We are pleased to inform you that your loan application has been APPROVED.\n\
         \n\
         Loan Details:\n\
         - Sanctioned Amount: \u{20b9}{amount}\n\
         - Interest Rate: {rate}% per annum\n\
         - Tenure: Up to {tenure} months\n\
         - Processing Fee: \u{20b9}{fee}\n\
         \n\
         This sanction is valid for {validity} days from the date of issue.\n",
        date = generated_at.format("%Y-%m-%d"),
        reference = applicant.id,
        name = applicant.name,
        amount = format_amount(applicant.requested_amount),
        rate = terms.annual_interest_rate_percent(),
        tenure = terms.max_tenure_months,
        fee = format_amount(terms.processing_fee_for(applicant.requested_amount)),
        validity = terms.sanction_validity_days,
    )
}

fn rejection_report(
    applicant: &Applicant,
    reason: &str,
    terms: &LendingTerms,
    generated_at: DateTime<Utc>,
) -> String {
    format!(
        "LOAN APPLICATION STATUS REPORT\n\
         \n\
         Date: {date}\n\
         Reference: {reference}\n\
         \n\
         Dear {name},\n\
         \n\
         We regret to inform you that your loan application could not be approved at this time.\n\
         \n\
         Application Details:\n\
         - Requested Amount: \u{20b9}{amount}\n\
         - Eligibility Score: {score:.1}%\n\
         - Reason: {reason}\n\
         \n\
         Recommendations for Future Applications:\n\
         1. Improve your credit score through timely payments\n\
         2. Consider applying for a lower loan amount\n\
         3. Increase your monthly income documentation\n\
         \n\
         You may reapply after {reapply} months.\n",
        date = generated_at.format("%Y-%m-%d"),
        reference = applicant.id,
        name = applicant.name,
        amount = format_amount(applicant.requested_amount),
        score = applicant.eligibility_score,
        reason = reason,
        reapply = terms.reapply_after_months,
    )
}

/// Two decimal places with thousands separators, e.g. 1,250,000.00.
fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction:02}")
}
