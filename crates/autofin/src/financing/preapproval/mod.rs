//! Heuristic estimate of loan approval odds ahead of formal underwriting.
//!
//! Four independent factors are scored 0-100 and blended with fixed weights:
//! credit 40%, income-to-payment 30%, down payment 20%, trade-in 10%.

mod factors;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{FinancialProfile, Vehicle};
use super::error::FinancingError;

/// Months of the preferred payment used to price an unspecified vehicle.
const ESTIMATE_TERM_MONTHS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikelihoodStatus {
    #[serde(rename = "Very Likely")]
    VeryLikely,
    Likely,
    Possible,
    Unlikely,
}

impl LikelihoodStatus {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 85 {
            LikelihoodStatus::VeryLikely
        } else if percentage >= 70 {
            LikelihoodStatus::Likely
        } else if percentage >= 50 {
            LikelihoodStatus::Possible
        } else {
            LikelihoodStatus::Unlikely
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LikelihoodStatus::VeryLikely => "Very Likely",
            LikelihoodStatus::Likely => "Likely",
            LikelihoodStatus::Possible => "Possible",
            LikelihoodStatus::Unlikely => "Unlikely",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatus {
    Excellent,
    Good,
    Concern,
    Issue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentStatus {
    Excellent,
    Good,
    Minimal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeInStatus {
    Helpful,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditFactor {
    pub percentage: u8,
    pub status: CreditStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRatioFactor {
    pub percentage: u8,
    pub ratio: f64,
    pub status: IncomeStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentFactor {
    pub percentage: u8,
    pub percent_down: f64,
    pub status: DownPaymentStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInFactor {
    pub percentage: u8,
    pub status: TradeInStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalFactors {
    pub credit_score: CreditFactor,
    pub income_ratio: IncomeRatioFactor,
    pub down_payment: DownPaymentFactor,
    pub trade_in: TradeInFactor,
}

impl ApprovalFactors {
    /// Weighted blend in whole percent, rounded half up.
    pub fn weighted_percentage(&self) -> u8 {
        let weighted = u32::from(self.credit_score.percentage) * 4
            + u32::from(self.income_ratio.percentage) * 3
            + u32::from(self.down_payment.percentage) * 2
            + u32::from(self.trade_in.percentage);
        ((weighted + 5) / 10) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreApprovalResult {
    pub likelihood_status: LikelihoodStatus,
    pub approval_percentage: u8,
    pub factors: ApprovalFactors,
    pub recommendations: Vec<String>,
    pub estimated_vehicle_price: f64,
}

/// Scores the buyer's approval odds for `vehicle`, or for a vehicle priced at
/// sixty preferred payments when none is selected.
pub fn predict_approval(
    profile: &FinancialProfile,
    vehicle: Option<&Vehicle>,
) -> Result<PreApprovalResult, FinancingError> {
    profile.validate()?;

    let estimated_vehicle_price = match vehicle {
        Some(vehicle) => {
            vehicle.validate()?;
            vehicle.base_price
        }
        None => profile.preferred_monthly_payment * ESTIMATE_TERM_MONTHS,
    };

    let mut recommendations = Vec::new();

    let credit = factors::evaluate_credit(profile.credit_score);
    recommendations.extend(credit.recommendation);

    let income = factors::evaluate_income(profile);
    recommendations.extend(income.recommendation);

    let down_payment = factors::evaluate_down_payment(profile, estimated_vehicle_price);
    recommendations.extend(down_payment.recommendation);

    let factors = ApprovalFactors {
        credit_score: credit.factor,
        income_ratio: income.factor,
        down_payment: down_payment.factor,
        trade_in: factors::evaluate_trade_in(profile),
    };

    let approval_percentage = factors.weighted_percentage();
    let likelihood_status = LikelihoodStatus::from_percentage(approval_percentage);

    debug!(
        status = likelihood_status.label(),
        approval_percentage,
        estimated_vehicle_price,
        vehicle = vehicle.map(|v| v.id.as_str()).unwrap_or("generic"),
        credit = factors.credit_score.percentage,
        income = factors.income_ratio.percentage,
        down_payment = factors.down_payment.percentage,
        trade_in = factors.trade_in.percentage,
        "pre-approval check"
    );

    Ok(PreApprovalResult {
        likelihood_status,
        approval_percentage,
        factors,
        recommendations,
        estimated_vehicle_price,
    })
}
