use serde::{Deserialize, Serialize};

use super::domain::Applicant;

const PASS_REASON: &str = "KYC verification passed";

/// Outcome of a single KYC field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCheck {
    pub name: String,
    pub passed: bool,
}

/// Aggregated KYC outcome. A failed verification is a normal result variant,
/// not an error; the orchestrator decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub success: bool,
    pub reason: String,
    pub checks: Vec<VerificationCheck>,
}

/// Run the KYC field checks against an applicant. Check order is fixed, and a
/// failure reason lists the failing check names in that order.
pub fn verify(applicant: &Applicant) -> VerificationReport {
    let checks = vec![
        check("name_valid", applicant.name.trim().len() > 2),
        check("income_valid", applicant.income > 0.0),
        check("phone_valid", applicant.phone.len() >= 10),
        check("email_valid", applicant.email.contains('@')),
    ];

    let failing: Vec<&str> = checks
        .iter()
        .filter(|check| !check.passed)
        .map(|check| check.name.as_str())
        .collect();

    let success = failing.is_empty();
    let reason = if success {
        PASS_REASON.to_string()
    } else {
        format!("Failed checks: {}", failing.join(", "))
    };

    VerificationReport {
        success,
        reason,
        checks,
    }
}

fn check(name: &str, passed: bool) -> VerificationCheck {
    VerificationCheck {
        name: name.to_string(),
        passed,
    }
}
