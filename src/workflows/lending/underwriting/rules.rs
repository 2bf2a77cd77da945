use serde::{Deserialize, Serialize};

use super::super::domain::{Applicant, EmploymentType};

pub(crate) const MAX_ELIGIBILITY_SCORE: f64 = 100.0;

/// Named partial scores behind the composite eligibility score. Every factor
/// is a step function over its input, so each field only ever holds one of
/// its documented levels and the struct doubles as the audit payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactors {
    pub income: f64,
    pub credit_score: f64,
    pub lti_ratio: f64,
    pub employment: f64,
}

impl ScoreFactors {
    /// Raw factor sum before clamping.
    pub fn sum(&self) -> f64 {
        self.income + self.credit_score + self.lti_ratio + self.employment
    }
}

/// Compute the factor table for an applicant. Brackets are evaluated
/// top-down and the first match wins; lower bounds are inclusive.
pub(crate) fn score_factors(applicant: &Applicant) -> ScoreFactors {
    // Income factor (max 25)
    let income = if applicant.income >= 100_000.0 {
        25.0
    } else if applicant.income >= 75_000.0 {
        20.0
    } else if applicant.income >= 50_000.0 {
        15.0
    } else if applicant.income >= 30_000.0 {
        10.0
    } else {
        5.0
    };

    // Credit score factor (max 35)
    let credit_score = if applicant.credit_score >= 800 {
        35.0
    } else if applicant.credit_score >= 750 {
        30.0
    } else if applicant.credit_score >= 700 {
        25.0
    } else if applicant.credit_score >= 650 {
        15.0
    } else {
        5.0
    };

    // Loan-to-income ratio, requested amount over annualized income (max 25).
    // A lower ratio scores higher.
    let ratio = applicant.requested_amount / (applicant.income * 12.0);
    let lti_ratio = if ratio <= 2.0 {
        25.0
    } else if ratio <= 3.0 {
        20.0
    } else if ratio <= 5.0 {
        15.0
    } else if ratio <= 8.0 {
        10.0
    } else {
        0.0
    };

    // Employment type factor (max 15)
    let employment = match applicant.employment_type {
        EmploymentType::Salaried => 15.0,
        EmploymentType::SelfEmployed => 10.0,
        EmploymentType::Other => 5.0,
    };

    ScoreFactors {
        income,
        credit_score,
        lti_ratio,
        employment,
    }
}
