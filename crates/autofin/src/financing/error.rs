use super::domain::VehicleId;

/// Longest loan or lease term accepted, in months.
pub const MAX_TERM_MONTHS: u32 = 1_200;
/// Longest depreciation horizon accepted, in years.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Typed failure for a single engine calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FinancingError {
    #[error("term must be between 1 and {max} months (got {term_months})", max = MAX_TERM_MONTHS)]
    InvalidTerm { term_months: u32 },
    #[error("projection horizon must be at most {max} years (got {years})", max = MAX_PROJECTION_YEARS)]
    InvalidHorizon { years: u32 },
    #[error("invalid financial profile: {field} must be a positive amount (got {value})")]
    InvalidProfile { field: &'static str, value: f64 },
    #[error("invalid vehicle '{id}': {reason}")]
    InvalidVehicle { id: String, reason: String },
    #[error("price must be positive (got {value})")]
    InvalidPrice { value: f64 },
    #[error("{quantity} is not a finite number")]
    NonFinite { quantity: &'static str },
}

impl FinancingError {
    pub(crate) fn invalid_profile(field: &'static str, value: f64) -> Self {
        Self::InvalidProfile { field, value }
    }

    pub(crate) fn invalid_vehicle(id: &VehicleId, reason: impl Into<String>) -> Self {
        Self::InvalidVehicle {
            id: id.0.clone(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn ensure_term(term_months: u32) -> Result<(), FinancingError> {
    if term_months == 0 || term_months > MAX_TERM_MONTHS {
        return Err(FinancingError::InvalidTerm { term_months });
    }
    Ok(())
}

pub(crate) fn ensure_horizon(years: u32) -> Result<(), FinancingError> {
    if years > MAX_PROJECTION_YEARS {
        return Err(FinancingError::InvalidHorizon { years });
    }
    Ok(())
}

pub(crate) fn ensure_finite(value: f64, quantity: &'static str) -> Result<f64, FinancingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FinancingError::NonFinite { quantity })
    }
}
