use serde::{Deserialize, Serialize};

use super::super::domain::Applicant;
use super::config::UnderwritingConfig;

/// Adjudication outcome for a scored applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum LoanDecision {
    Approved { reason: String },
    Rejected { reason: String },
}

impl LoanDecision {
    pub fn approved(&self) -> bool {
        matches!(self, LoanDecision::Approved { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            LoanDecision::Approved { reason } | LoanDecision::Rejected { reason } => reason,
        }
    }
}

/// Decision ladder over the composite score and applicant attributes. Rules
/// are evaluated in order and the first match wins.
pub(crate) fn decide_outcome(
    applicant: &Applicant,
    eligibility_score: f64,
    config: &UnderwritingConfig,
) -> LoanDecision {
    if eligibility_score >= config.approval_score {
        return LoanDecision::Approved {
            reason: format!(
                "Strong financial profile with {eligibility_score:.1}% eligibility score"
            ),
        };
    }

    if eligibility_score >= config.conditional_band_floor {
        if applicant.credit_score >= config.supporting_credit_score
            && applicant.income >= config.supporting_monthly_income
        {
            return LoanDecision::Approved {
                reason: format!(
                    "Approved with {eligibility_score:.1}% score based on good credit and income"
                ),
            };
        }
        return LoanDecision::Rejected {
            reason: format!(
                "Eligibility score {eligibility_score:.1}% requires higher credit score or income"
            ),
        };
    }

    LoanDecision::Rejected {
        reason: format!("Eligibility score {eligibility_score:.1}% below minimum threshold"),
    }
}
