use super::common::*;
use crate::financing::domain::FinancialProfile;
use crate::financing::preapproval::{
    predict_approval, CreditStatus, DownPaymentStatus, IncomeStatus, LikelihoodStatus,
    TradeInStatus,
};

fn strong_buyer() -> FinancialProfile {
    FinancialProfile {
        monthly_income: 8_000.0,
        credit_score: 760,
        max_down_payment: 6_000.0,
        preferred_monthly_payment: 500.0,
        has_trade_in: true,
        trade_in_value: 4_000.0,
        ..profile()
    }
}

#[test]
fn strong_buyer_is_very_likely() {
    let car = vehicle("camry", "Camry", 30_000.0);

    let result = predict_approval(&strong_buyer(), Some(&car)).expect("prediction");

    assert_eq!(result.factors.credit_score.percentage, 100);
    assert_eq!(result.factors.credit_score.status, CreditStatus::Excellent);
    assert_eq!(result.factors.income_ratio.percentage, 100);
    assert_eq!(result.factors.income_ratio.ratio, 16.0);
    assert_eq!(result.factors.income_ratio.status, IncomeStatus::Excellent);
    assert_eq!(result.factors.down_payment.percentage, 100);
    assert_eq!(
        result.factors.down_payment.status,
        DownPaymentStatus::Excellent
    );
    assert_eq!(result.factors.trade_in.percentage, 100);
    assert_eq!(result.factors.trade_in.status, TradeInStatus::Helpful);
    assert_eq!(result.approval_percentage, 100);
    assert_eq!(result.likelihood_status, LikelihoodStatus::VeryLikely);
    assert_eq!(result.estimated_vehicle_price, 30_000.0);
    assert!(result.recommendations.is_empty());
}

#[test]
fn status_serializes_with_spaces() {
    let json = serde_json::to_string(&LikelihoodStatus::VeryLikely).expect("serializes");
    assert_eq!(json, "\"Very Likely\"");
}

#[test]
fn generic_estimate_uses_sixty_preferred_payments() {
    let result = predict_approval(&strong_buyer(), None).expect("prediction");

    assert_eq!(result.estimated_vehicle_price, 30_000.0);
}

#[test]
fn weak_buyer_collects_recommendations_in_factor_order() {
    let buyer = FinancialProfile {
        monthly_income: 1_000.0,
        credit_score: 580,
        max_down_payment: 500.0,
        preferred_monthly_payment: 500.0,
        has_trade_in: false,
        trade_in_value: 0.0,
        ..profile()
    };
    let car = vehicle("corolla", "Corolla", 21_550.0);

    let result = predict_approval(&buyer, Some(&car)).expect("prediction");

    assert_eq!(result.factors.credit_score.status, CreditStatus::Poor);
    assert_eq!(result.factors.income_ratio.status, IncomeStatus::Issue);
    assert_eq!(result.factors.down_payment.status, DownPaymentStatus::Low);
    assert_eq!(result.factors.trade_in.status, TradeInStatus::None);
    // 0*0.4 + 0*0.3 + 33*0.2 + 0*0.1 = 6.6
    assert_eq!(result.approval_percentage, 7);
    assert_eq!(result.likelihood_status, LikelihoodStatus::Unlikely);
    assert_eq!(
        result.recommendations,
        vec![
            "Improve your credit score to at least 610 by paying bills on time and reducing debt"
                .to_string(),
            "Reduce target monthly payment to $400 or increase income".to_string(),
            "Increase down payment to at least $2,155 (10% of vehicle price)".to_string(),
        ]
    );
}

#[test]
fn middling_buyer_lands_between_tiers() {
    let buyer = FinancialProfile {
        monthly_income: 4_000.0,
        credit_score: 680,
        max_down_payment: 3_000.0,
        preferred_monthly_payment: 1_000.0,
        has_trade_in: true,
        trade_in_value: 800.0,
        ..profile()
    };
    let car = vehicle("rav4", "RAV4", 25_000.0);

    let result = predict_approval(&buyer, Some(&car)).expect("prediction");

    assert_eq!(result.factors.credit_score.percentage, 75);
    assert_eq!(result.factors.income_ratio.percentage, 75);
    assert_eq!(result.factors.down_payment.percentage, 83);
    assert_eq!(result.factors.trade_in.percentage, 50);
    // 30 + 22.5 + 16.6 + 5 = 74.1
    assert_eq!(result.approval_percentage, 74);
    assert_eq!(result.likelihood_status, LikelihoodStatus::Likely);
    assert_eq!(result.recommendations.len(), 1);
    assert!(result.recommendations[0].contains("720+"));
}

#[test]
fn fair_credit_and_tight_income_stay_unlikely() {
    let buyer = FinancialProfile {
        monthly_income: 3_000.0,
        credit_score: 630,
        max_down_payment: 2_500.0,
        preferred_monthly_payment: 1_000.0,
        has_trade_in: false,
        trade_in_value: 0.0,
        ..profile()
    };
    let car = vehicle("camry", "Camry", 20_000.0);

    let result = predict_approval(&buyer, Some(&car)).expect("prediction");

    assert_eq!(result.factors.credit_score.status, CreditStatus::Fair);
    assert_eq!(result.factors.income_ratio.status, IncomeStatus::Concern);
    assert_eq!(result.factors.down_payment.status, DownPaymentStatus::Minimal);
    // 20 + 15 + 13.4 + 0 = 48.4
    assert_eq!(result.approval_percentage, 48);
    assert_eq!(result.likelihood_status, LikelihoodStatus::Unlikely);
    assert_eq!(result.recommendations.len(), 3);
    assert!(result.factors.income_ratio.message.contains("3.0x"));
    assert!(result.factors.down_payment.message.contains("12.5% ($2,500)"));
}

#[test]
fn boundary_scores_map_to_statuses() {
    assert_eq!(LikelihoodStatus::from_percentage(85), LikelihoodStatus::VeryLikely);
    assert_eq!(LikelihoodStatus::from_percentage(84), LikelihoodStatus::Likely);
    assert_eq!(LikelihoodStatus::from_percentage(70), LikelihoodStatus::Likely);
    assert_eq!(LikelihoodStatus::from_percentage(69), LikelihoodStatus::Possible);
    assert_eq!(LikelihoodStatus::from_percentage(50), LikelihoodStatus::Possible);
    assert_eq!(LikelihoodStatus::from_percentage(49), LikelihoodStatus::Unlikely);
}

#[test]
fn invalid_vehicle_fails_prediction() {
    let car = vehicle("", "Ghost", 10_000.0);

    assert!(predict_approval(&strong_buyer(), Some(&car)).is_err());
}
