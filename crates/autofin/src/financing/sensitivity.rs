use serde::{Deserialize, Serialize};

use super::amortization::{monthly_payment, round_cents, round_tenths};
use super::credit::rate_by_credit;
use super::error::{ensure_term, FinancingError};

/// Credit scores swept by [`credit_score_impact`].
pub const CREDIT_SCORE_SCENARIOS: [u16; 5] = [600, 650, 700, 750, 800];

const DOWN_PAYMENT_STEPS: u32 = 5;
const DEFAULT_MAX_DOWN_SHARE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditScenario {
    pub credit_score: u16,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentScenario {
    pub down_payment: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub monthly_reduction: f64,
}

fn total_interest(monthly: f64, term_months: u32, principal: f64) -> f64 {
    monthly * f64::from(term_months) - principal
}

/// Payment and interest at each score in [`CREDIT_SCORE_SCENARIOS`], priced
/// with the chart rate schedule.
pub fn credit_score_impact(
    base_price: f64,
    down_payment: f64,
    base_rate: f64,
    term_months: u32,
) -> Result<Vec<CreditScenario>, FinancingError> {
    ensure_term(term_months)?;
    let principal = base_price - down_payment;

    CREDIT_SCORE_SCENARIOS
        .iter()
        .map(|&credit_score| {
            let rate = rate_by_credit(base_rate, credit_score);
            let monthly = monthly_payment(principal, rate, term_months)?;

            Ok(CreditScenario {
                credit_score,
                interest_rate: round_tenths(rate),
                monthly_payment: round_cents(monthly),
                total_interest: round_cents(total_interest(monthly, term_months, principal)),
            })
        })
        .collect()
}

/// Six evenly spaced down payments from `min_down` to `max_down` (half the
/// price when unset or zero).
pub fn down_payment_sensitivity(
    base_price: f64,
    rate: f64,
    term_months: u32,
    min_down: f64,
    max_down: Option<f64>,
) -> Result<Vec<DownPaymentScenario>, FinancingError> {
    ensure_term(term_months)?;

    let max_down = max_down
        .filter(|value| *value != 0.0)
        .unwrap_or(base_price * DEFAULT_MAX_DOWN_SHARE);
    let step = (max_down - min_down) / f64::from(DOWN_PAYMENT_STEPS);

    let mut scenarios = Vec::with_capacity(DOWN_PAYMENT_STEPS as usize + 1);
    let mut previous_monthly: Option<f64> = None;

    for index in 0..=DOWN_PAYMENT_STEPS {
        let down = min_down + step * f64::from(index);
        let principal = base_price - down;
        let monthly = monthly_payment(principal, rate, term_months)?;
        let reduction = previous_monthly.map_or(0.0, |previous| previous - monthly);

        scenarios.push(DownPaymentScenario {
            down_payment: down.round(),
            monthly_payment: round_cents(monthly),
            total_interest: round_cents(total_interest(monthly, term_months, principal)),
            monthly_reduction: round_cents(reduction),
        });
        previous_monthly = Some(monthly);
    }

    Ok(scenarios)
}
