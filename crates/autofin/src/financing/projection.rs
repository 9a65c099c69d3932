use serde::{Deserialize, Serialize};

use super::amortization::{monthly_rate, round_cents, round_tenths};
use super::error::{ensure_finite, ensure_horizon, ensure_term, FinancingError};

pub const DEFAULT_DEPRECIATION_YEARS: u32 = 5;

/// Annual depreciation by year of ownership; later years repeat the last rate.
const DEPRECIATION_SCHEDULE: [f64; 6] = [0.0, 0.20, 0.15, 0.10, 0.08, 0.08];
const LONG_TAIL_RATE: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub month: u32,
    pub equity: f64,
    pub remaining_principal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepreciationPoint {
    pub year: u32,
    pub value: f64,
    pub depreciation_percent: f64,
}

/// Month-by-month ownership equity for a financed purchase, `term_months + 1`
/// entries starting with the down payment at month 0.
///
/// Remaining principal is clamped at zero in the series; a payment larger
/// than the schedule needs simply saturates equity at the price.
pub fn equity_timeline(
    base_price: f64,
    down_payment: f64,
    monthly_payment: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<Vec<EquityPoint>, FinancingError> {
    ensure_term(term_months)?;

    let rate = monthly_rate(annual_rate_percent);
    let mut remaining = base_price - down_payment;
    let mut timeline = Vec::with_capacity(term_months as usize + 1);

    timeline.push(EquityPoint {
        month: 0,
        equity: round_cents(down_payment),
        remaining_principal: round_cents(remaining).max(0.0),
    });

    for month in 1..=term_months {
        let interest_portion = remaining * rate;
        let principal_portion = monthly_payment - interest_portion;
        remaining -= principal_portion;

        let equity = ensure_finite(base_price - remaining.max(0.0), "equity")?;
        timeline.push(EquityPoint {
            month,
            equity: round_cents(equity),
            remaining_principal: round_cents(remaining).max(0.0),
        });
    }

    Ok(timeline)
}

/// Resale value by year of ownership, `years + 1` entries starting at the
/// purchase price. Horizons past [`MAX_PROJECTION_YEARS`] are rejected.
///
/// [`MAX_PROJECTION_YEARS`]: super::error::MAX_PROJECTION_YEARS
pub fn depreciation_curve(
    base_price: f64,
    years: u32,
) -> Result<Vec<DepreciationPoint>, FinancingError> {
    if !base_price.is_finite() || base_price <= 0.0 {
        return Err(FinancingError::InvalidPrice { value: base_price });
    }
    ensure_horizon(years)?;

    let mut value = base_price;
    let mut curve = Vec::with_capacity(years as usize + 1);
    curve.push(DepreciationPoint {
        year: 0,
        value: value.round(),
        depreciation_percent: 0.0,
    });

    for year in 1..=years {
        let rate = DEPRECIATION_SCHEDULE
            .get(year as usize)
            .copied()
            .unwrap_or(LONG_TAIL_RATE);
        value *= 1.0 - rate;
        let depreciation_percent = (base_price - value) / base_price * 100.0;

        curve.push(DepreciationPoint {
            year,
            value: value.round(),
            depreciation_percent: round_tenths(depreciation_percent),
        });
    }

    Ok(curve)
}
