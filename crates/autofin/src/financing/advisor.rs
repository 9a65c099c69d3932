//! Plain-data context handed to a conversational assistant.
//!
//! The engine never talks to a model itself. Callers inject an [`Advisor`]
//! implementation and pass it the context built here.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::amortization::apply_financing;
use super::domain::{DefaultFinancing, FinancialProfile, FinancingOption, Vehicle, VehicleId};
use super::error::FinancingError;
use super::format::dollars;

const HEALTHY_PAYMENT_SHARE: f64 = 15.0;
const UPPER_PAYMENT_SHARE: f64 = 20.0;

/// A selected vehicle with both of its quotes amortized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorVehicle {
    pub vehicle: Vehicle,
    pub lease: FinancingOption,
    pub finance: FinancingOption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorContext {
    pub vehicles: Vec<AdvisorVehicle>,
    pub profile: FinancialProfile,
    pub payment_to_income_percent: f64,
    pub affordability_note: String,
}

impl AdvisorContext {
    /// Quotes every selected vehicle, using its entry in `quotes` or
    /// `defaults` when the buyer has not customised its terms.
    pub fn build(
        selected: &[Vehicle],
        profile: &FinancialProfile,
        quotes: &HashMap<VehicleId, DefaultFinancing>,
        defaults: &DefaultFinancing,
    ) -> Result<Self, FinancingError> {
        profile.validate()?;

        let vehicles = selected
            .iter()
            .map(|vehicle| {
                vehicle.validate()?;
                let terms = quotes.get(&vehicle.id).unwrap_or(defaults);
                Ok(AdvisorVehicle {
                    vehicle: vehicle.clone(),
                    lease: apply_financing(vehicle.base_price, &terms.lease)?,
                    finance: apply_financing(vehicle.base_price, &terms.finance)?,
                })
            })
            .collect::<Result<Vec<_>, FinancingError>>()?;

        let payment_to_income_percent =
            profile.preferred_monthly_payment / profile.monthly_income * 100.0;
        let affordability_note = if payment_to_income_percent <= HEALTHY_PAYMENT_SHARE {
            "This is within the recommended 15% payment-to-income ratio - financially healthy."
        } else if payment_to_income_percent <= UPPER_PAYMENT_SHARE {
            "This is at the upper limit (15-20% of income). Consider if this fits your budget comfortably."
        } else {
            "This exceeds the recommended 20% limit. You may want to consider a lower payment."
        };

        Ok(Self {
            vehicles,
            profile: profile.clone(),
            payment_to_income_percent,
            affordability_note: affordability_note.to_string(),
        })
    }

    pub fn render_prompt(&self) -> String {
        let mut prompt = String::new();

        if self.vehicles.is_empty() {
            prompt.push_str("Selected vehicles: none yet.\n");
        } else {
            let _ = writeln!(prompt, "Selected vehicles ({}):", self.vehicles.len());
            for entry in &self.vehicles {
                let vehicle = &entry.vehicle;
                let _ = writeln!(
                    prompt,
                    "- {} ({}): {}",
                    vehicle.display_name(),
                    vehicle.category,
                    dollars(vehicle.base_price)
                );
                for quote in [&entry.lease, &entry.finance] {
                    let _ = writeln!(
                        prompt,
                        "  {}: {} down, {}% APR, {} months, {} per month",
                        quote.kind.label(),
                        dollars(quote.down_payment),
                        quote.annual_interest_rate_percent,
                        quote.term_months,
                        dollars(quote.monthly_payment.unwrap_or(0.0))
                    );
                }
            }
        }

        let profile = &self.profile;
        let _ = writeln!(prompt, "\nFinancial profile:");
        let _ = writeln!(prompt, "Monthly income: {}", dollars(profile.monthly_income));
        let _ = writeln!(prompt, "Credit score: {}", profile.credit_score);
        let _ = writeln!(
            prompt,
            "Max down payment: {}",
            dollars(profile.max_down_payment)
        );
        let _ = writeln!(
            prompt,
            "Preferred monthly payment: {}",
            dollars(profile.preferred_monthly_payment)
        );
        if profile.has_trade_in {
            let _ = writeln!(prompt, "Trade-in: yes ({})", dollars(profile.trade_in_value));
        } else {
            let _ = writeln!(prompt, "Trade-in: no");
        }
        let _ = writeln!(prompt, "\nAffordability: {}", self.affordability_note);

        prompt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("advisor backend unavailable: {0}")]
    Unavailable(String),
    #[error("advisor request failed: {0}")]
    Request(String),
}

/// Conversational assistant answering questions about a financing context.
pub trait Advisor: Send + Sync {
    fn reply(
        &self,
        context: &AdvisorContext,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AdvisorError>;
}

/// Stand-in used when no assistant backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredAdvisor;

impl Advisor for UnconfiguredAdvisor {
    fn reply(
        &self,
        _context: &AdvisorContext,
        _history: &[ChatMessage],
        _message: &str,
    ) -> Result<String, AdvisorError> {
        Ok(
            "I'm sorry, but the financing assistant is not configured. Ask your administrator to enable an advisor backend."
                .to_string(),
        )
    }
}
