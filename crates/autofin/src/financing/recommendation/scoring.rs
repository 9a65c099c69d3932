use super::super::domain::{AffordabilityAssessment, FinancialProfile, RiskLevel, VehicleId};
use super::VehicleScore;

const BUDGET_IMPACT_MAX: f64 = 50.0;
const BUDGET_IMPACT_SLOPE: f64 = 2.5;
const PAYMENT_MATCH_MAX: f64 = 30.0;
const LOW_RISK_BONUS: f64 = 20.0;
const OTHER_RISK_BONUS: f64 = 10.0;

/// Lower budget impact scores higher, reaching zero at 20% of income.
pub(crate) fn budget_impact_score(budget_impact_percent: f64) -> f64 {
    (BUDGET_IMPACT_MAX - budget_impact_percent * BUDGET_IMPACT_SLOPE).max(0.0)
}

/// Relative distance from the buyer's target payment, full marks on a match.
pub(crate) fn payment_score(monthly_payment: f64, preferred_monthly_payment: f64) -> f64 {
    let target = preferred_monthly_payment.max(1.0);
    let difference = (monthly_payment - target).abs();
    (PAYMENT_MATCH_MAX - difference / target * PAYMENT_MATCH_MAX).max(0.0)
}

pub(crate) fn risk_score(risk_level: RiskLevel) -> f64 {
    match risk_level {
        RiskLevel::Low => LOW_RISK_BONUS,
        RiskLevel::Medium | RiskLevel::High => OTHER_RISK_BONUS,
    }
}

pub(crate) fn score_candidate(
    vehicle_id: &VehicleId,
    monthly_payment: f64,
    assessment: &AffordabilityAssessment,
    profile: &FinancialProfile,
) -> VehicleScore {
    let budget_impact_score = budget_impact_score(assessment.budget_impact_percent);
    let payment_score = payment_score(monthly_payment, profile.preferred_monthly_payment);
    let risk_score = risk_score(assessment.risk_level);

    VehicleScore {
        vehicle_id: vehicle_id.clone(),
        monthly_payment,
        budget_impact_percent: assessment.budget_impact_percent,
        risk_level: assessment.risk_level,
        can_afford: assessment.can_afford,
        budget_impact_score,
        payment_score,
        risk_score,
        total_score: budget_impact_score + payment_score + risk_score,
    }
}
