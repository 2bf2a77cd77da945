use super::common::*;
use crate::workflows::lending::domain::EmploymentType;
use crate::workflows::lending::underwriting::LoanDecision;

#[test]
fn high_score_approves_outright() {
    let applicant = applicant_with(100_000.0, 800, 200_000.0, EmploymentType::Salaried);

    let decision = engine().decide(&applicant, 100.0);

    assert!(decision.approved());
    assert_eq!(
        decision.reason(),
        "Strong financial profile with 100.0% eligibility score"
    );
}

#[test]
fn conditional_band_approves_on_supporting_credit_and_income() {
    let applicant = applicant_with(55_000.0, 700, 3_960_000.0, EmploymentType::Salaried);

    let decision = engine().decide(&applicant, 65.0);

    assert!(decision.approved());
    assert_eq!(
        decision.reason(),
        "Approved with 65.0% score based on good credit and income"
    );
}

#[test]
fn conditional_band_rejects_without_supporting_credit() {
    // Scenario: credit 680 and income 55k land a 70 score in the band but
    // fall short of the supporting credit threshold.
    let applicant = applicant_with(55_000.0, 680, 800_000.0, EmploymentType::Salaried);

    let decision = engine().decide(&applicant, 70.0);

    assert!(!decision.approved());
    assert_eq!(
        decision.reason(),
        "Eligibility score 70.0% requires higher credit score or income"
    );
}

#[test]
fn conditional_band_rejects_without_supporting_income() {
    let applicant = applicant_with(45_000.0, 720, 800_000.0, EmploymentType::Salaried);

    let decision = engine().decide(&applicant, 65.0);

    assert!(!decision.approved());
    assert!(decision
        .reason()
        .contains("requires higher credit score or income"));
}

#[test]
fn low_score_rejects_below_minimum() {
    let applicant = applicant_with(20_000.0, 600, 900_000.0, EmploymentType::Other);

    let decision = engine().decide(&applicant, 35.0);

    assert!(!decision.approved());
    assert_eq!(
        decision.reason(),
        "Eligibility score 35.0% below minimum threshold"
    );
}

#[test]
fn first_matching_rule_wins_over_later_ones() {
    // A huge requested amount zeroes the LTI factor, yet 25 + 35 + 0 + 15
    // still reaches the outright approval threshold. The outcome must come
    // from the first rule, not the supporting-credit rule.
    let applicant = applicant_with(100_000.0, 800, 40_000_000.0, EmploymentType::Salaried);

    let breakdown = engine().score(&applicant);
    assert_eq!(breakdown.eligibility_score, 75.0);

    let decision = engine().decide(&applicant, breakdown.eligibility_score);
    assert!(decision.approved());
    assert!(decision.reason().starts_with("Strong financial profile"));
}

#[test]
fn decision_is_deterministic_for_the_same_inputs() {
    let applicant = applicant_with(55_000.0, 700, 3_960_000.0, EmploymentType::Salaried);

    let first = engine().decide(&applicant, 65.0);
    let second = engine().decide(&applicant, 65.0);

    assert_eq!(first, second);
    assert!(matches!(first, LoanDecision::Approved { .. }));
}
