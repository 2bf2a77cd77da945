mod config;
mod policy;
mod rules;

pub use config::{LendingTerms, UnderwritingConfig};
pub use policy::LoanDecision;
pub use rules::ScoreFactors;

use serde::{Deserialize, Serialize};

use super::domain::Applicant;

/// Stateless underwriter applying the scoring rubric and decision ladder.
pub struct UnderwritingEngine {
    config: UnderwritingConfig,
}

impl UnderwritingEngine {
    pub fn new(config: UnderwritingConfig) -> Self {
        Self { config }
    }

    /// Compute the factor table and the clamped composite eligibility score.
    pub fn score(&self, applicant: &Applicant) -> ScoreBreakdown {
        let factors = rules::score_factors(applicant);
        let eligibility_score = factors.sum().clamp(0.0, rules::MAX_ELIGIBILITY_SCORE);

        ScoreBreakdown {
            eligibility_score,
            factors,
        }
    }

    /// Map a composite score and applicant attributes to an approval outcome.
    pub fn decide(&self, applicant: &Applicant, eligibility_score: f64) -> LoanDecision {
        policy::decide_outcome(applicant, eligibility_score, &self.config)
    }
}

/// Composite score with the per-factor contributions, for transparent audits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub eligibility_score: f64,
    pub factors: ScoreFactors,
}
