use serde::{Deserialize, Serialize};

/// Decision thresholds applied after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingConfig {
    /// Composite score at or above which an application is approved outright.
    pub approval_score: f64,
    /// Floor of the band where supporting credit and income can still carry
    /// an approval.
    pub conditional_band_floor: f64,
    pub supporting_credit_score: u16,
    /// Monthly income required alongside the supporting credit score.
    pub supporting_monthly_income: f64,
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            approval_score: 75.0,
            conditional_band_floor: 60.0,
            supporting_credit_score: 700,
            supporting_monthly_income: 50_000.0,
        }
    }
}

/// Commercial terms quoted in sanction letters and rejection guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingTerms {
    pub annual_interest_rate_bps: u32,
    pub max_tenure_months: u32,
    pub processing_fee_bps: u32,
    pub sanction_validity_days: u32,
    pub reapply_after_months: u32,
}

impl Default for LendingTerms {
    fn default() -> Self {
        Self {
            annual_interest_rate_bps: 1050,
            max_tenure_months: 60,
            processing_fee_bps: 100,
            sanction_validity_days: 30,
            reapply_after_months: 3,
        }
    }
}

impl LendingTerms {
    pub fn annual_interest_rate_percent(&self) -> f64 {
        f64::from(self.annual_interest_rate_bps) / 100.0
    }

    pub fn processing_fee_for(&self, amount: f64) -> f64 {
        amount * f64::from(self.processing_fee_bps) / 10_000.0
    }
}
