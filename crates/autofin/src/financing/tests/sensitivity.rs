use crate::financing::sensitivity::{
    credit_score_impact, down_payment_sensitivity, CREDIT_SCORE_SCENARIOS,
};
use crate::financing::FinancingError;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 0.011
}

#[test]
fn credit_sweep_uses_chart_schedule() {
    let scenarios = credit_score_impact(25_000.0, 5_000.0, 5.0, 60).expect("sweep");

    assert_eq!(scenarios.len(), CREDIT_SCORE_SCENARIOS.len());
    let scores: Vec<u16> = scenarios.iter().map(|s| s.credit_score).collect();
    assert_eq!(scores, vec![600, 650, 700, 750, 800]);

    let rates: Vec<f64> = scenarios.iter().map(|s| s.interest_rate).collect();
    assert_eq!(rates, vec![6.5, 5.0, 4.5, 4.0, 4.0]);

    assert_eq!(scenarios[0].monthly_payment, 391.32);
    assert!(close(scenarios[0].total_interest, 3_479.2));
    assert_eq!(scenarios[1].monthly_payment, 377.42);
    assert_eq!(scenarios[3].monthly_payment, 368.33);
    assert_eq!(scenarios[3], scenarios[4]);
}

#[test]
fn better_credit_never_costs_more() {
    let scenarios = credit_score_impact(32_000.0, 3_000.0, 6.0, 72).expect("sweep");

    assert!(scenarios
        .windows(2)
        .all(|pair| pair[1].monthly_payment <= pair[0].monthly_payment));
}

#[test]
fn credit_sweep_rejects_zero_term() {
    assert_eq!(
        credit_score_impact(25_000.0, 5_000.0, 5.0, 0).expect_err("zero term"),
        FinancingError::InvalidTerm { term_months: 0 }
    );
}

#[test]
fn down_payment_sweep_defaults_to_half_the_price() {
    let scenarios = down_payment_sensitivity(25_000.0, 6.0, 60, 0.0, None).expect("sweep");

    let downs: Vec<f64> = scenarios.iter().map(|s| s.down_payment).collect();
    assert_eq!(downs, vec![0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0, 12_500.0]);

    assert_eq!(scenarios[0].monthly_payment, 483.32);
    assert_eq!(scenarios[0].monthly_reduction, 0.0);
    assert_eq!(scenarios[1].monthly_payment, 434.99);
    assert!(close(scenarios[1].monthly_reduction, 48.33));
    assert_eq!(scenarios[5].monthly_payment, 241.66);
    assert!(close(scenarios[5].total_interest, 1_999.6));
}

#[test]
fn zero_max_down_behaves_like_unset() {
    let unset = down_payment_sensitivity(25_000.0, 6.0, 60, 0.0, None).expect("sweep");
    let zero = down_payment_sensitivity(25_000.0, 6.0, 60, 0.0, Some(0.0)).expect("sweep");

    assert_eq!(unset, zero);
}

#[test]
fn explicit_range_is_split_into_five_steps() {
    let scenarios =
        down_payment_sensitivity(30_000.0, 0.0, 60, 1_000.0, Some(6_000.0)).expect("sweep");

    let downs: Vec<f64> = scenarios.iter().map(|s| s.down_payment).collect();
    assert_eq!(downs, vec![1_000.0, 2_000.0, 3_000.0, 4_000.0, 5_000.0, 6_000.0]);
    assert_eq!(scenarios[0].monthly_payment, 483.33);
    assert!(scenarios.iter().all(|s| s.total_interest.abs() < 0.5));
}

#[test]
fn down_payment_sweep_rejects_zero_term() {
    assert!(down_payment_sensitivity(25_000.0, 6.0, 0, 0.0, None).is_err());
}
