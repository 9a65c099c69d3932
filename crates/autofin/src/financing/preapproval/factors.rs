use super::super::domain::FinancialProfile;
use super::super::format::dollars;
use super::{
    CreditFactor, CreditStatus, DownPaymentFactor, DownPaymentStatus, IncomeRatioFactor,
    IncomeStatus, TradeInFactor, TradeInStatus,
};

const MIN_CREDIT_SCORE: u16 = 610;
const EXCELLENT_CREDIT_SCORE: u16 = 720;
const GOOD_CREDIT_SCORE: u16 = 660;
const MIN_INCOME_TO_PAYMENT: f64 = 2.5;
const EXCELLENT_INCOME_TO_PAYMENT: f64 = 5.0;
const GOOD_INCOME_TO_PAYMENT: f64 = 3.5;
const MIN_DOWN_PAYMENT_SHARE: f64 = 0.1;
const HELPFUL_TRADE_IN_VALUE: f64 = 1000.0;

/// A factor evaluation and the advice it contributes, if any.
pub(crate) struct Evaluated<F> {
    pub(crate) factor: F,
    pub(crate) recommendation: Option<String>,
}

pub(crate) fn evaluate_credit(credit_score: u16) -> Evaluated<CreditFactor> {
    if credit_score < MIN_CREDIT_SCORE {
        Evaluated {
            factor: CreditFactor {
                percentage: 0,
                status: CreditStatus::Poor,
                message: format!(
                    "Credit score of {credit_score} is below the typical minimum ({MIN_CREDIT_SCORE}). Focus on improving credit before applying."
                ),
            },
            recommendation: Some(format!(
                "Improve your credit score to at least {MIN_CREDIT_SCORE} by paying bills on time and reducing debt"
            )),
        }
    } else if credit_score >= EXCELLENT_CREDIT_SCORE {
        Evaluated {
            factor: CreditFactor {
                percentage: 100,
                status: CreditStatus::Excellent,
                message: format!(
                    "Excellent credit score of {credit_score}! You qualify for the best interest rates."
                ),
            },
            recommendation: None,
        }
    } else if credit_score >= GOOD_CREDIT_SCORE {
        Evaluated {
            factor: CreditFactor {
                percentage: 75,
                status: CreditStatus::Good,
                message: format!(
                    "Good credit score of {credit_score}. You should qualify for competitive rates."
                ),
            },
            recommendation: Some(format!(
                "Consider improving credit to {EXCELLENT_CREDIT_SCORE}+ for the best interest rates"
            )),
        }
    } else {
        Evaluated {
            factor: CreditFactor {
                percentage: 50,
                status: CreditStatus::Fair,
                message: format!(
                    "Fair credit score of {credit_score}. You may qualify but with higher interest rates."
                ),
            },
            recommendation: Some(
                "Work on improving your credit score to get better loan terms".to_string(),
            ),
        }
    }
}

pub(crate) fn evaluate_income(profile: &FinancialProfile) -> Evaluated<IncomeRatioFactor> {
    let income = profile.monthly_income;
    let payment = profile.preferred_monthly_payment;
    let ratio = income / payment;

    if income < payment * MIN_INCOME_TO_PAYMENT {
        let affordable_payment = (income / MIN_INCOME_TO_PAYMENT).floor();
        Evaluated {
            factor: IncomeRatioFactor {
                percentage: 0,
                ratio,
                status: IncomeStatus::Issue,
                message: format!(
                    "Monthly income of {} is too low for a {} payment. Lenders prefer income to be at least {MIN_INCOME_TO_PAYMENT}x the payment.",
                    dollars(income),
                    dollars(payment)
                ),
            },
            recommendation: Some(format!(
                "Reduce target monthly payment to {} or increase income",
                dollars(affordable_payment)
            )),
        }
    } else if ratio >= EXCELLENT_INCOME_TO_PAYMENT {
        Evaluated {
            factor: IncomeRatioFactor {
                percentage: 100,
                ratio,
                status: IncomeStatus::Excellent,
                message: format!(
                    "Your income is {ratio:.1}x your target payment - excellent ratio!"
                ),
            },
            recommendation: None,
        }
    } else if ratio >= GOOD_INCOME_TO_PAYMENT {
        Evaluated {
            factor: IncomeRatioFactor {
                percentage: 75,
                ratio,
                status: IncomeStatus::Good,
                message: format!("Your income is {ratio:.1}x your target payment - good ratio."),
            },
            recommendation: None,
        }
    } else {
        Evaluated {
            factor: IncomeRatioFactor {
                percentage: 50,
                ratio,
                status: IncomeStatus::Concern,
                message: format!(
                    "Your income is {ratio:.1}x your target payment - meets minimum but tight."
                ),
            },
            recommendation: Some(
                "Consider a lower monthly payment for better approval odds".to_string(),
            ),
        }
    }
}

pub(crate) fn evaluate_down_payment(
    profile: &FinancialProfile,
    estimated_price: f64,
) -> Evaluated<DownPaymentFactor> {
    let total_down = profile.total_down_payment();
    let percent_down = total_down / estimated_price * 100.0;
    let amount = dollars(total_down);

    if percent_down >= 20.0 {
        Evaluated {
            factor: DownPaymentFactor {
                percentage: 100,
                percent_down,
                status: DownPaymentStatus::Excellent,
                message: format!(
                    "Excellent down payment of {percent_down:.1}% ({amount})! This significantly increases approval chances."
                ),
            },
            recommendation: None,
        }
    } else if percent_down >= 15.0 {
        Evaluated {
            factor: DownPaymentFactor {
                percentage: 83,
                percent_down,
                status: DownPaymentStatus::Good,
                message: format!("Good down payment of {percent_down:.1}% ({amount})."),
            },
            recommendation: None,
        }
    } else if percent_down >= MIN_DOWN_PAYMENT_SHARE * 100.0 {
        Evaluated {
            factor: DownPaymentFactor {
                percentage: 67,
                percent_down,
                status: DownPaymentStatus::Minimal,
                message: format!(
                    "Down payment of {percent_down:.1}% ({amount}) meets minimum requirements."
                ),
            },
            recommendation: Some(
                "Consider increasing down payment to 15-20% for better terms".to_string(),
            ),
        }
    } else {
        Evaluated {
            factor: DownPaymentFactor {
                percentage: 33,
                percent_down,
                status: DownPaymentStatus::Low,
                message: format!(
                    "Down payment of {percent_down:.1}% ({amount}) is below the recommended 10% minimum."
                ),
            },
            recommendation: Some(format!(
                "Increase down payment to at least {} (10% of vehicle price)",
                dollars((estimated_price * MIN_DOWN_PAYMENT_SHARE).ceil())
            )),
        }
    }
}

pub(crate) fn evaluate_trade_in(profile: &FinancialProfile) -> TradeInFactor {
    let value = profile.trade_in_value;

    if profile.has_trade_in && value >= HELPFUL_TRADE_IN_VALUE {
        TradeInFactor {
            percentage: 100,
            status: TradeInStatus::Helpful,
            message: format!(
                "Trade-in value of {} helps reduce the amount financed.",
                dollars(value)
            ),
        }
    } else if profile.has_trade_in {
        TradeInFactor {
            percentage: 50,
            status: TradeInStatus::Helpful,
            message: format!("Trade-in value of {} provides minimal help.", dollars(value)),
        }
    } else {
        TradeInFactor {
            percentage: 0,
            status: TradeInStatus::None,
            message: "No trade-in vehicle. Consider trading in a current vehicle to reduce financed amount."
                .to_string(),
        }
    }
}
