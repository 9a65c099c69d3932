use super::common::*;
use crate::financing::domain::{FinancialProfile, FinancingKind, FinancingOption, RiskLevel};
use crate::financing::FinancingError;
use crate::financing::recommendation::{
    affordable_vehicle_ids, cheapest_vehicle_ids, score_vehicles, top3_recommended_vehicle_ids,
};

#[test]
fn affordable_filter_keeps_catalog_order() {
    let ids_found =
        affordable_vehicle_ids(&catalog(), &profile(), &finance_option()).expect("filter runs");

    assert_eq!(ids_found, ids(&["corolla", "camry", "rav4", "4runner"]));
}

#[test]
fn affordable_filter_falls_back_to_three_cheapest() {
    let mut broke = profile();
    broke.monthly_income = 1.0;
    let shuffled = vec![
        vehicle("sequoia", "Sequoia", 60_875.0),
        vehicle("rav4", "RAV4", 27_575.0),
        vehicle("corolla", "Corolla", 21_550.0),
        vehicle("4runner", "4Runner", 40_155.0),
        vehicle("camry", "Camry", 26_220.0),
    ];

    let ids_found =
        affordable_vehicle_ids(&shuffled, &broke, &finance_option()).expect("filter runs");

    assert_eq!(ids_found, ids(&["corolla", "camry", "rav4"]));
}

#[test]
fn top_three_prefers_low_risk_payments_near_target() {
    let top = top3_recommended_vehicle_ids(&catalog(), &profile(), &finance_option())
        .expect("ranking runs");

    assert_eq!(top, ids(&["rav4", "camry", "corolla"]));
}

#[test]
fn ranking_is_deterministic() {
    let first = top3_recommended_vehicle_ids(&catalog(), &profile(), &finance_option())
        .expect("ranking runs");
    let second = top3_recommended_vehicle_ids(&catalog(), &profile(), &finance_option())
        .expect("ranking runs");

    assert_eq!(first, second);
}

#[test]
fn score_breakdown_sums_components() {
    let scores = score_vehicles(&catalog(), &profile(), &finance_option()).expect("scores");

    assert_eq!(scores.len(), 4);
    for score in &scores {
        let sum = score.budget_impact_score + score.payment_score + score.risk_score;
        assert!((score.total_score - sum).abs() < 1e-9);
    }
    assert!(scores
        .windows(2)
        .all(|pair| pair[0].total_score >= pair[1].total_score));

    let four_runner = scores
        .iter()
        .find(|score| score.vehicle_id.as_str() == "4runner")
        .expect("4runner scored");
    assert_eq!(four_runner.risk_level, RiskLevel::Medium);
    assert_eq!(four_runner.risk_score, 10.0);
    assert_eq!(four_runner.monthly_payment, 648.72);
}

#[test]
fn ranking_scores_first_vehicle_when_nothing_is_affordable() {
    let mut broke = profile();
    broke.monthly_income = 1.0;
    let shuffled = vec![
        vehicle("sequoia", "Sequoia", 60_875.0),
        vehicle("corolla", "Corolla", 21_550.0),
    ];

    let top =
        top3_recommended_vehicle_ids(&shuffled, &broke, &finance_option()).expect("ranking runs");

    assert_eq!(top, ids(&["sequoia"]));
}

#[test]
fn equal_scores_keep_catalog_order() {
    let twins = vec![
        vehicle("twin-b", "Twin", 25_000.0),
        vehicle("twin-a", "Twin", 25_000.0),
        vehicle("twin-c", "Twin", 25_000.0),
        vehicle("twin-d", "Twin", 25_000.0),
    ];

    let top =
        top3_recommended_vehicle_ids(&twins, &profile(), &finance_option()).expect("ranking runs");

    assert_eq!(top, ids(&["twin-b", "twin-a", "twin-c"]));
}

#[test]
fn empty_catalog_yields_empty_results() {
    assert!(affordable_vehicle_ids(&[], &profile(), &finance_option())
        .expect("filter runs")
        .is_empty());
    assert!(top3_recommended_vehicle_ids(&[], &profile(), &finance_option())
        .expect("ranking runs")
        .is_empty());
}

#[test]
fn malformed_vehicle_is_rejected() {
    let mut broken = catalog();
    broken[2].base_price = 0.0;

    let err = top3_recommended_vehicle_ids(&broken, &profile(), &finance_option())
        .expect_err("zero price rejected");

    match err {
        FinancingError::InvalidVehicle { id, .. } => assert_eq!(id, "rav4"),
        other => panic!("expected invalid vehicle, got {other:?}"),
    }
}

#[test]
fn zero_income_is_a_profile_error() {
    let mut broke = profile();
    broke.monthly_income = 0.0;

    let err = affordable_vehicle_ids(&catalog(), &broke, &finance_option())
        .expect_err("zero income rejected");

    assert!(matches!(
        err,
        FinancingError::InvalidProfile {
            field: "monthly_income",
            ..
        }
    ));
}

#[test]
fn cheapest_ties_keep_catalog_order() {
    let tied = vec![
        vehicle("b", "B", 20_000.0),
        vehicle("a", "A", 20_000.0),
        vehicle("c", "C", 19_000.0),
    ];

    assert_eq!(cheapest_vehicle_ids(&tied, 2), ids(&["c", "b"]));
}

#[test]
fn boundary_payments_are_judged_after_rounding_to_cents() {
    let buyer = FinancialProfile {
        monthly_income: 1_000.0,
        credit_score: 780,
        max_down_payment: 0.0,
        preferred_monthly_payment: 200.0,
        has_trade_in: false,
        trade_in_value: 0.0,
        financing_preference: FinancingKind::Finance,
        loan_term_months: 60,
        base_interest_rate_percent: 0.0,
    };
    let option = FinancingOption::new(FinancingKind::Finance, 60, 0.0, 0.0);
    // 200.004/month rounds to exactly 20% of income; 200.015 rounds past it.
    let catalog = vec![
        vehicle("on-the-line", "Edge", 12_000.24),
        vehicle("over-the-line", "Over", 12_000.90),
    ];

    let affordable = affordable_vehicle_ids(&catalog, &buyer, &option).expect("filter runs");
    assert_eq!(affordable, ids(&["on-the-line"]));

    let scores = score_vehicles(&catalog, &buyer, &option).expect("scores build");
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].monthly_payment, 200.0);
    assert_eq!(scores[0].risk_level, RiskLevel::Medium);
}
