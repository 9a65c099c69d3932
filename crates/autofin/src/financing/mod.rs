//! Vehicle financing and affordability engine.
//!
//! Every function here is a pure computation over its arguments: the same
//! inputs always yield the same outputs and nothing is retained between calls.
//! Invalid inputs surface as [`FinancingError`] rather than non-finite numbers.

pub mod advisor;
pub mod affordability;
pub mod amortization;
pub mod credit;
pub mod domain;
mod error;
mod format;
pub mod preapproval;
pub mod projection;
pub mod recommendation;
pub mod sensitivity;

#[cfg(test)]
mod tests;

pub use advisor::{
    Advisor, AdvisorContext, AdvisorError, AdvisorVehicle, ChatMessage, ChatRole,
    UnconfiguredAdvisor,
};
pub use affordability::{
    affordability_impact, analyze_affordability, financial_tips, vehicle_affordability,
    AffordabilityImpact, ImpactStatus,
};
pub use amortization::{
    apply_financing, lease_vs_finance, monthly_payment, round_cents, total_cost,
    LeaseFinanceComparison,
};
pub use credit::{adjusted_rate, credit_score_range, rate_by_credit};
pub use domain::{
    AffordabilityAssessment, CreditScoreRange, DefaultFinancing, FinancialProfile,
    FinancingKind, FinancingOption, RiskLevel, Vehicle, VehicleId,
};
pub use error::{FinancingError, MAX_PROJECTION_YEARS, MAX_TERM_MONTHS};
pub use preapproval::{predict_approval, LikelihoodStatus, PreApprovalResult};
pub use projection::{
    depreciation_curve, equity_timeline, DepreciationPoint, EquityPoint,
    DEFAULT_DEPRECIATION_YEARS,
};
pub use recommendation::{
    affordable_vehicle_ids, cheapest_vehicle_ids, score_vehicles, top3_recommended_vehicle_ids,
    VehicleScore,
};
pub use sensitivity::{
    credit_score_impact, down_payment_sensitivity, CreditScenario, DownPaymentScenario,
};
