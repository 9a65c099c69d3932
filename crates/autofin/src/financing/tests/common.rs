use crate::financing::domain::{
    FinancialProfile, FinancingKind, FinancingOption, Vehicle, VehicleId,
};

pub(super) fn vehicle(id: &str, name: &str, base_price: f64) -> Vehicle {
    Vehicle {
        id: VehicleId::new(id),
        name: name.to_string(),
        model: "LE".to_string(),
        year: 2024,
        base_price,
        category: "Sedan".to_string(),
        price_source: None,
    }
}

pub(super) fn catalog() -> Vec<Vehicle> {
    vec![
        vehicle("corolla", "Corolla", 21_550.0),
        vehicle("camry", "Camry", 26_220.0),
        vehicle("rav4", "RAV4", 27_575.0),
        vehicle("4runner", "4Runner", 40_155.0),
        vehicle("sequoia", "Sequoia", 60_875.0),
    ]
}

/// Good credit (720), $4,000 monthly income, $5,000 cash plus a $2,000 trade-in.
pub(super) fn profile() -> FinancialProfile {
    FinancialProfile {
        monthly_income: 4_000.0,
        credit_score: 720,
        max_down_payment: 5_000.0,
        preferred_monthly_payment: 450.0,
        has_trade_in: true,
        trade_in_value: 2_000.0,
        financing_preference: FinancingKind::Finance,
        loan_term_months: 60,
        base_interest_rate_percent: 5.5,
    }
}

pub(super) fn finance_option() -> FinancingOption {
    FinancingOption::new(FinancingKind::Finance, 60, 5_000.0, 5.5)
}

pub(super) fn ids(values: &[&str]) -> Vec<VehicleId> {
    values.iter().map(|value| VehicleId::new(*value)).collect()
}
