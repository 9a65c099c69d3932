use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FinancingError;

/// Identifier wrapper for catalog vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A vehicle offered for lease or purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub model: String,
    pub year: u16,
    pub base_price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_source: Option<String>,
}

impl Vehicle {
    /// Rejects records that would feed undefined arithmetic into the engine.
    pub fn validate(&self) -> Result<(), FinancingError> {
        if self.id.0.trim().is_empty() {
            return Err(FinancingError::invalid_vehicle(&self.id, "id must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(FinancingError::invalid_vehicle(&self.id, "name must not be empty"));
        }
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(FinancingError::invalid_vehicle(
                &self.id,
                format!("base price must be positive (got {})", self.base_price),
            ));
        }
        Ok(())
    }

    /// Human readable label such as `2024 RAV4 LE`.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.name, self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingKind {
    Lease,
    Finance,
}

impl FinancingKind {
    pub const fn label(self) -> &'static str {
        match self {
            FinancingKind::Lease => "lease",
            FinancingKind::Finance => "finance",
        }
    }
}

/// Terms of a lease or loan. `monthly_payment` and `total_cost` stay unset
/// until the option has been amortized against a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingOption {
    pub kind: FinancingKind,
    pub term_months: u32,
    pub down_payment: f64,
    pub annual_interest_rate_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl FinancingOption {
    pub fn new(
        kind: FinancingKind,
        term_months: u32,
        down_payment: f64,
        annual_interest_rate_percent: f64,
    ) -> Self {
        Self {
            kind,
            term_months,
            down_payment,
            annual_interest_rate_percent,
            monthly_payment: None,
            total_cost: None,
        }
    }

    pub fn default_lease() -> Self {
        Self::new(FinancingKind::Lease, 36, 3000.0, 3.9)
    }

    pub fn default_finance() -> Self {
        Self::new(FinancingKind::Finance, 60, 5000.0, 5.5)
    }

    pub fn with_down_payment(&self, down_payment: f64) -> Self {
        Self {
            down_payment,
            monthly_payment: None,
            total_cost: None,
            ..self.clone()
        }
    }

    pub fn with_rate(&self, annual_interest_rate_percent: f64) -> Self {
        Self {
            annual_interest_rate_percent,
            monthly_payment: None,
            total_cost: None,
            ..self.clone()
        }
    }
}

/// Lease and finance terms offered side by side for a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultFinancing {
    pub lease: FinancingOption,
    pub finance: FinancingOption,
}

impl DefaultFinancing {
    pub fn option(&self, kind: FinancingKind) -> &FinancingOption {
        match kind {
            FinancingKind::Lease => &self.lease,
            FinancingKind::Finance => &self.finance,
        }
    }
}

impl Default for DefaultFinancing {
    fn default() -> Self {
        Self {
            lease: FinancingOption::default_lease(),
            finance: FinancingOption::default_finance(),
        }
    }
}

/// Buyer-supplied financial snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub credit_score: u16,
    pub max_down_payment: f64,
    pub preferred_monthly_payment: f64,
    pub has_trade_in: bool,
    #[serde(default)]
    pub trade_in_value: f64,
    pub financing_preference: FinancingKind,
    pub loan_term_months: u32,
    pub base_interest_rate_percent: f64,
}

impl FinancialProfile {
    pub fn validate(&self) -> Result<(), FinancingError> {
        self.validate_income()?;
        if !self.preferred_monthly_payment.is_finite() || self.preferred_monthly_payment <= 0.0 {
            return Err(FinancingError::invalid_profile(
                "preferred_monthly_payment",
                self.preferred_monthly_payment,
            ));
        }
        if !self.max_down_payment.is_finite() || self.max_down_payment < 0.0 {
            return Err(FinancingError::invalid_profile(
                "max_down_payment",
                self.max_down_payment,
            ));
        }
        if !self.trade_in_value.is_finite() || self.trade_in_value < 0.0 {
            return Err(FinancingError::invalid_profile(
                "trade_in_value",
                self.trade_in_value,
            ));
        }
        Ok(())
    }

    /// Income is the divisor of every budget-impact calculation.
    pub fn validate_income(&self) -> Result<(), FinancingError> {
        if !self.monthly_income.is_finite() || self.monthly_income <= 0.0 {
            return Err(FinancingError::invalid_profile(
                "monthly_income",
                self.monthly_income,
            ));
        }
        Ok(())
    }

    /// Trade-in value counted toward the down payment.
    pub fn trade_in_credit(&self) -> f64 {
        if self.has_trade_in {
            self.trade_in_value
        } else {
            0.0
        }
    }

    /// Cash plus trade-in available for a down payment.
    pub fn total_down_payment(&self) -> f64 {
        self.max_down_payment + self.trade_in_credit()
    }

    /// The option described by the profile's own financing preferences.
    pub fn financing_option(&self) -> FinancingOption {
        FinancingOption::new(
            self.financing_preference,
            self.loan_term_months,
            self.max_down_payment,
            self.base_interest_rate_percent,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Outcome of weighing a monthly payment against income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub can_afford: bool,
    pub budget_impact_percent: f64,
    pub risk_level: RiskLevel,
    pub recommendation_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditScoreRange {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditScoreRange {
    pub const fn label(self) -> &'static str {
        match self {
            CreditScoreRange::Excellent => "excellent",
            CreditScoreRange::Good => "good",
            CreditScoreRange::Fair => "fair",
            CreditScoreRange::Poor => "poor",
        }
    }
}
