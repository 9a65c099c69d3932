//! Credit-score driven rate adjustments.
//!
//! Two schedules coexist. [`adjusted_rate`] marks the base rate up by credit
//! tier and feeds recommendations and affordability badges.
//! [`rate_by_credit`] discounts strong scores and drives the sensitivity
//! charts. They are not interchangeable.

use super::domain::CreditScoreRange;

pub fn credit_score_range(score: u16) -> CreditScoreRange {
    if score >= 750 {
        CreditScoreRange::Excellent
    } else if score >= 700 {
        CreditScoreRange::Good
    } else if score >= 650 {
        CreditScoreRange::Fair
    } else {
        CreditScoreRange::Poor
    }
}

/// Markup applied on top of `base_rate` for the borrower's credit tier.
pub fn adjusted_rate(score: u16, base_rate: f64) -> f64 {
    match credit_score_range(score) {
        CreditScoreRange::Excellent => base_rate,
        CreditScoreRange::Good => base_rate + 1.0,
        CreditScoreRange::Fair => base_rate + 2.5,
        CreditScoreRange::Poor => base_rate + 4.5,
    }
}

/// Rate schedule used by the credit-score and down-payment sensitivity sweeps.
pub fn rate_by_credit(base_rate: f64, score: u16) -> f64 {
    if score >= 750 {
        base_rate - 1.0
    } else if score >= 700 {
        base_rate - 0.5
    } else if score >= 650 {
        base_rate
    } else if score >= 600 {
        base_rate + 1.5
    } else {
        base_rate + 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_use_inclusive_lower_bounds() {
        assert_eq!(credit_score_range(850), CreditScoreRange::Excellent);
        assert_eq!(credit_score_range(750), CreditScoreRange::Excellent);
        assert_eq!(credit_score_range(749), CreditScoreRange::Good);
        assert_eq!(credit_score_range(700), CreditScoreRange::Good);
        assert_eq!(credit_score_range(650), CreditScoreRange::Fair);
        assert_eq!(credit_score_range(649), CreditScoreRange::Poor);
        assert_eq!(credit_score_range(300), CreditScoreRange::Poor);
    }

    #[test]
    fn adjusted_rate_marks_up_by_tier() {
        assert_eq!(adjusted_rate(780, 5.0), 5.0);
        assert_eq!(adjusted_rate(720, 5.0), 6.0);
        assert_eq!(adjusted_rate(660, 5.0), 7.5);
        assert_eq!(adjusted_rate(580, 5.0), 9.5);
    }

    #[test]
    fn chart_schedule_differs_from_markup_schedule() {
        assert_eq!(rate_by_credit(5.0, 800), 4.0);
        assert_eq!(rate_by_credit(5.0, 700), 4.5);
        assert_eq!(rate_by_credit(5.0, 650), 5.0);
        assert_eq!(rate_by_credit(5.0, 600), 6.5);
        assert_eq!(rate_by_credit(5.0, 599), 8.0);
        assert_ne!(rate_by_credit(5.0, 760), adjusted_rate(760, 5.0));
    }
}
