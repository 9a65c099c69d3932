use serde::{Deserialize, Serialize};

use super::amortization::{apply_financing, round_tenths};
use super::credit::{adjusted_rate, credit_score_range};
use super::domain::{
    AffordabilityAssessment, CreditScoreRange, FinancialProfile, FinancingOption, RiskLevel,
    Vehicle,
};
use super::error::{ensure_finite, FinancingError};

const LOW_RISK_CEILING: f64 = 15.0;
const MEDIUM_RISK_CEILING: f64 = 20.0;
const STRETCH_CEILING: f64 = 25.0;

/// Share of the vehicle price the per-vehicle badge lets the buyer put down.
pub(crate) const BADGE_DOWN_PAYMENT_CAP: f64 = 0.3;

/// Tier thresholds are compared on a value snapped to 1e-9 so a payment that
/// is exactly 15% of income never lands on the wrong side through float noise.
fn tier_percent(budget_impact_percent: f64) -> f64 {
    (budget_impact_percent * 1e9).round() / 1e9
}

/// Classifies a monthly payment against the buyer's income.
///
/// Tiers cut at 15%, 20% and 25% of income, inclusive. The comparison runs
/// on the impact snapped to 1e-9 of a percent, so a share within that
/// tolerance of a cutoff counts as sitting on it; the returned
/// `budget_impact_percent` is left unsnapped.
pub fn analyze_affordability(
    monthly_payment: f64,
    profile: &FinancialProfile,
) -> Result<AffordabilityAssessment, FinancingError> {
    profile.validate_income()?;

    let budget_impact_percent = ensure_finite(
        monthly_payment / profile.monthly_income * 100.0,
        "budget impact",
    )?;
    let tier = tier_percent(budget_impact_percent);

    let (can_afford, risk_level, recommendation_text) = if tier <= LOW_RISK_CEILING {
        (
            true,
            RiskLevel::Low,
            "This fits comfortably within your budget! You'll have plenty of room for other expenses.",
        )
    } else if tier <= MEDIUM_RISK_CEILING {
        (
            true,
            RiskLevel::Medium,
            "This is within recommended limits, but consider keeping a financial cushion for unexpected expenses.",
        )
    } else if tier <= STRETCH_CEILING {
        (
            false,
            RiskLevel::High,
            "This payment is higher than recommended. Consider a longer term, larger down payment, or a more affordable vehicle.",
        )
    } else {
        (
            false,
            RiskLevel::High,
            "This payment may strain your budget significantly. We strongly recommend exploring more affordable options.",
        )
    };

    Ok(AffordabilityAssessment {
        can_afford,
        budget_impact_percent,
        risk_level,
        recommendation_text: recommendation_text.to_string(),
    })
}

/// Badge shown next to a vehicle: the buyer's cash and trade-in (capped at
/// 30% of price) go down, and the option's rate is marked up for credit.
pub fn vehicle_affordability(
    vehicle: &Vehicle,
    profile: &FinancialProfile,
    option: &FinancingOption,
) -> Result<AffordabilityAssessment, FinancingError> {
    vehicle.validate()?;

    let rate = adjusted_rate(profile.credit_score, option.annual_interest_rate_percent);
    let down_payment = profile
        .total_down_payment()
        .min(vehicle.base_price * BADGE_DOWN_PAYMENT_CAP);
    let quoted = apply_financing(
        vehicle.base_price,
        &option.with_rate(rate).with_down_payment(down_payment),
    )?;

    analyze_affordability(quoted.monthly_payment.unwrap_or(0.0), profile)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStatus {
    Excellent,
    Good,
    Caution,
    Overextended,
}

/// Gauge reading of a payment as a share of income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityImpact {
    pub percentage: f64,
    pub status: ImpactStatus,
    pub message: String,
}

pub fn affordability_impact(
    monthly_payment: f64,
    monthly_income: f64,
) -> Result<AffordabilityImpact, FinancingError> {
    if !monthly_income.is_finite() || monthly_income <= 0.0 {
        return Err(FinancingError::invalid_profile("monthly_income", monthly_income));
    }

    let percentage = ensure_finite(monthly_payment / monthly_income * 100.0, "budget impact")?;
    let tier = tier_percent(percentage);

    let (status, message) = if tier < 10.0 {
        (
            ImpactStatus::Excellent,
            "Well within budget - excellent financial position",
        )
    } else if tier < 15.0 {
        (
            ImpactStatus::Good,
            "Comfortable payment - good financial balance",
        )
    } else if tier < 20.0 {
        (
            ImpactStatus::Caution,
            "Stretching budget - consider lower payment",
        )
    } else {
        (
            ImpactStatus::Overextended,
            "Over budget - payment too high for income",
        )
    };

    Ok(AffordabilityImpact {
        percentage: round_tenths(percentage),
        status,
        message: message.to_string(),
    })
}

/// Advice strings tailored to the profile; general guidance always comes last.
pub fn financial_tips(profile: &FinancialProfile) -> Vec<String> {
    let mut tips = Vec::new();

    if matches!(
        credit_score_range(profile.credit_score),
        CreditScoreRange::Poor | CreditScoreRange::Fair
    ) {
        tips.push(
            "Improving your credit score by 50-100 points could save you thousands in interest over the life of your loan."
                .to_string(),
        );
    }

    if profile.max_down_payment < 3000.0 {
        tips.push(
            "A larger down payment reduces your monthly payments and the total interest you'll pay. Aim for at least 10-20% down."
                .to_string(),
        );
    } else if profile.max_down_payment >= 5000.0 {
        tips.push(
            "Great down payment capacity! This will significantly reduce your interest costs and monthly payments."
                .to_string(),
        );
    }

    if profile.preferred_monthly_payment > profile.monthly_income * 0.15 {
        tips.push(
            "Your target payment exceeds 15% of your monthly income. Consider adjusting to avoid financial stress."
                .to_string(),
        );
    }

    if profile.has_trade_in && profile.trade_in_value > 0.0 {
        tips.push(
            "Using your trade-in as a down payment can reduce your financing needs and improve loan terms."
                .to_string(),
        );
    }

    tips.push(
        "Leasing typically offers lower monthly payments but you won't own the vehicle. Financing costs more monthly but builds equity."
            .to_string(),
    );
    tips.push(
        "Consider total cost of ownership including insurance, maintenance, and fuel when budgeting for your vehicle."
            .to_string(),
    );

    tips
}
