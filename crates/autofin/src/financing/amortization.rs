use serde::{Deserialize, Serialize};

use super::domain::{FinancingOption, Vehicle, VehicleId};
use super::error::{ensure_finite, ensure_term, FinancingError};

/// Rounds to cent precision, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Fixed-rate installment for `principal` over `term_months`.
///
/// A zero rate degenerates to straight-line division of the principal.
/// Negative principals (down payment above price) are passed through and
/// produce a negative installment.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64, FinancingError> {
    ensure_term(term_months)?;

    let rate = monthly_rate(annual_rate_percent);
    let payment = if rate == 0.0 {
        principal / f64::from(term_months)
    } else {
        let periods =
            i32::try_from(term_months).map_err(|_| FinancingError::InvalidTerm { term_months })?;
        let growth = (1.0 + rate).powi(periods);
        principal * (rate * growth) / (growth - 1.0)
    };

    ensure_finite(round_cents(payment), "monthly payment")
}

pub fn total_cost(monthly_payment: f64, term_months: u32, down_payment: f64) -> f64 {
    round_cents(monthly_payment * f64::from(term_months) + down_payment)
}

/// Amortizes `option` against `base_price`, returning a copy with the
/// derived payment fields filled in.
pub fn apply_financing(
    base_price: f64,
    option: &FinancingOption,
) -> Result<FinancingOption, FinancingError> {
    let principal = base_price - option.down_payment;
    let monthly = monthly_payment(
        principal,
        option.annual_interest_rate_percent,
        option.term_months,
    )?;
    let total = total_cost(monthly, option.term_months, option.down_payment);

    Ok(FinancingOption {
        monthly_payment: Some(monthly),
        total_cost: Some(ensure_finite(total, "total cost")?),
        ..option.clone()
    })
}

/// Side-by-side lease and finance quotes for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseFinanceComparison {
    pub vehicle_id: VehicleId,
    pub lease: FinancingOption,
    pub finance: FinancingOption,
    /// Finance monthly minus lease monthly.
    pub monthly_savings: f64,
    /// Finance total cost minus lease total cost.
    pub total_savings: f64,
}

pub fn lease_vs_finance(
    vehicle: &Vehicle,
    lease: &FinancingOption,
    finance: &FinancingOption,
) -> Result<LeaseFinanceComparison, FinancingError> {
    vehicle.validate()?;

    let lease = apply_financing(vehicle.base_price, lease)?;
    let finance = apply_financing(vehicle.base_price, finance)?;

    let monthly_savings =
        round_cents(finance.monthly_payment.unwrap_or(0.0) - lease.monthly_payment.unwrap_or(0.0));
    let total_savings =
        round_cents(finance.total_cost.unwrap_or(0.0) - lease.total_cost.unwrap_or(0.0));

    Ok(LeaseFinanceComparison {
        vehicle_id: vehicle.id.clone(),
        lease,
        finance,
        monthly_savings,
        total_savings,
    })
}
