mod scoring;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::affordability::analyze_affordability;
use super::amortization::monthly_payment;
use super::credit::adjusted_rate;
use super::domain::{FinancialProfile, FinancingOption, RiskLevel, Vehicle, VehicleId};
use super::error::FinancingError;

/// Share of the price the affordability filter lets the buyer put down.
const FILTER_DOWN_PAYMENT_CAP: f64 = 0.2;
/// Share of the price the ranking lets cash plus trade-in cover.
const RANKING_DOWN_PAYMENT_CAP: f64 = 0.3;
const FALLBACK_COUNT: usize = 3;
const TOP_COUNT: usize = 3;

/// Ranking breakdown for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleScore {
    pub vehicle_id: VehicleId,
    pub monthly_payment: f64,
    pub budget_impact_percent: f64,
    pub risk_level: RiskLevel,
    pub can_afford: bool,
    pub budget_impact_score: f64,
    pub payment_score: f64,
    pub risk_score: f64,
    pub total_score: f64,
}

/// Vehicles whose credit-adjusted payment fits the buyer's budget, in catalog
/// order. Falls back to the three cheapest vehicles when none qualify.
pub fn affordable_vehicle_ids(
    catalog: &[Vehicle],
    profile: &FinancialProfile,
    option: &FinancingOption,
) -> Result<Vec<VehicleId>, FinancingError> {
    profile.validate()?;
    let rate = adjusted_rate(profile.credit_score, option.annual_interest_rate_percent);

    let mut affordable = Vec::new();
    for vehicle in catalog {
        vehicle.validate()?;

        let down_payment = profile
            .max_down_payment
            .min(vehicle.base_price * FILTER_DOWN_PAYMENT_CAP);
        let payment = monthly_payment(vehicle.base_price - down_payment, rate, option.term_months)?;
        let assessment = analyze_affordability(payment, profile)?;

        if assessment.can_afford {
            affordable.push(vehicle.id.clone());
        }
    }

    if affordable.is_empty() {
        debug!(
            catalog_size = catalog.len(),
            "no affordable vehicles, falling back to cheapest"
        );
        return Ok(cheapest_vehicle_ids(catalog, FALLBACK_COUNT));
    }

    Ok(affordable)
}

/// Scores candidates for the top-three ranking, best first.
///
/// Affordable vehicles are always scored. The first vehicle in the catalog is
/// scored even when unaffordable so the ranking never comes back empty for a
/// non-empty catalog.
pub fn score_vehicles(
    catalog: &[Vehicle],
    profile: &FinancialProfile,
    option: &FinancingOption,
) -> Result<Vec<VehicleScore>, FinancingError> {
    profile.validate()?;
    let rate = adjusted_rate(profile.credit_score, option.annual_interest_rate_percent);
    let available_down = profile.total_down_payment();

    let mut scores: Vec<VehicleScore> = Vec::new();
    for vehicle in catalog {
        vehicle.validate()?;

        let down_payment = available_down.min(vehicle.base_price * RANKING_DOWN_PAYMENT_CAP);
        let payment = monthly_payment(vehicle.base_price - down_payment, rate, option.term_months)?;
        let assessment = analyze_affordability(payment, profile)?;

        if assessment.can_afford || scores.is_empty() {
            scores.push(scoring::score_candidate(
                &vehicle.id,
                payment,
                &assessment,
                profile,
            ));
        }
    }

    // stable: equal scores keep catalog order
    scores.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    Ok(scores)
}

pub fn top3_recommended_vehicle_ids(
    catalog: &[Vehicle],
    profile: &FinancialProfile,
    option: &FinancingOption,
) -> Result<Vec<VehicleId>, FinancingError> {
    let scores = score_vehicles(catalog, profile, option)?;

    if scores.is_empty() {
        return Ok(cheapest_vehicle_ids(catalog, FALLBACK_COUNT));
    }

    let top: Vec<VehicleId> = scores
        .into_iter()
        .take(TOP_COUNT)
        .map(|score| score.vehicle_id)
        .collect();
    debug!(?top, "ranked vehicle recommendations");
    Ok(top)
}

/// Cheapest `count` vehicles by base price; ties keep catalog order.
pub fn cheapest_vehicle_ids(catalog: &[Vehicle], count: usize) -> Vec<VehicleId> {
    let mut by_price: Vec<&Vehicle> = catalog.iter().collect();
    by_price.sort_by(|a, b| a.base_price.total_cmp(&b.base_price));
    by_price
        .into_iter()
        .take(count)
        .map(|vehicle| vehicle.id.clone())
        .collect()
}
