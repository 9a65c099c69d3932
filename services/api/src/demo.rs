use crate::infra::load_environment;
use autofin::catalog::VehicleCatalog;
use autofin::error::AppError;
use autofin::financing::{
    affordability_impact, affordable_vehicle_ids, apply_financing, credit_score_impact,
    depreciation_curve, down_payment_sensitivity, equity_timeline, financial_tips,
    lease_vs_finance, predict_approval, score_vehicles, vehicle_affordability, DefaultFinancing,
    FinancialProfile, FinancingKind, FinancingOption, PreApprovalResult, Vehicle,
    DEFAULT_DEPRECIATION_YEARS,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindArg {
    Lease,
    Finance,
}

impl From<KindArg> for FinancingKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Lease => FinancingKind::Lease,
            KindArg::Finance => FinancingKind::Finance,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ProfileArgs {
    /// Gross monthly income
    #[arg(long, default_value_t = 5000.0)]
    pub(crate) income: f64,
    /// Credit score (300-850)
    #[arg(long, default_value_t = 720)]
    pub(crate) credit_score: u16,
    /// Cash available for a down payment
    #[arg(long, default_value_t = 5000.0)]
    pub(crate) max_down: f64,
    /// Target monthly payment
    #[arg(long, default_value_t = 450.0)]
    pub(crate) preferred_payment: f64,
    /// Value of a vehicle being traded in
    #[arg(long)]
    pub(crate) trade_in: Option<f64>,
    #[arg(long, value_enum, default_value_t = KindArg::Finance)]
    pub(crate) financing: KindArg,
    /// Loan term in months
    #[arg(long, default_value_t = 60)]
    pub(crate) term: u32,
    /// Base APR in percent before credit adjustment
    #[arg(long, default_value_t = 5.5)]
    pub(crate) rate: f64,
}

impl ProfileArgs {
    pub(crate) fn to_profile(&self) -> FinancialProfile {
        FinancialProfile {
            monthly_income: self.income,
            credit_score: self.credit_score,
            max_down_payment: self.max_down,
            preferred_monthly_payment: self.preferred_payment,
            has_trade_in: self.trade_in.is_some(),
            trade_in_value: self.trade_in.unwrap_or(0.0),
            financing_preference: self.financing.into(),
            loan_term_months: self.term,
            base_interest_rate_percent: self.rate,
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CatalogArgs {
    /// Vehicle catalog (CSV or JSON) replacing the bundled listings
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Catalog id of the vehicle to quote
    pub(crate) vehicle: String,
    /// Override the finance down payment
    #[arg(long)]
    pub(crate) down: Option<f64>,
    /// Override the finance APR
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Include credit-score and down-payment sensitivity tables
    #[arg(long)]
    pub(crate) sensitivity: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Print the score breakdown for every ranked vehicle
    #[arg(long)]
    pub(crate) scores: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct PreApprovalArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Catalog id of the vehicle being financed
    #[arg(long)]
    pub(crate) vehicle: Option<String>,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Catalog id of the vehicle to walk through
    #[arg(long, default_value = "rav4-2024")]
    pub(crate) vehicle: String,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

fn money(value: f64) -> String {
    format!("${value:.2}")
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let (config, catalog) = load_environment(args.catalog.catalog.as_deref())?;
    let vehicle = catalog.require(&args.vehicle)?;

    let mut finance = config.financing.defaults.finance.clone();
    if let Some(down) = args.down {
        finance = finance.with_down_payment(down);
    }
    if let Some(rate) = args.rate {
        finance = finance.with_rate(rate);
    }
    let defaults = DefaultFinancing {
        lease: config.financing.defaults.lease.clone(),
        finance,
    };

    render_quote(vehicle, &defaults)?;
    if args.sensitivity {
        render_sensitivity(vehicle, &defaults.finance)?;
    }
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let (_, catalog) = load_environment(args.catalog.catalog.as_deref())?;
    let profile = args.profile.to_profile();

    render_recommendations(&catalog, &profile, args.scores)
}

pub(crate) fn run_preapproval(args: PreApprovalArgs) -> Result<(), AppError> {
    let (_, catalog) = load_environment(args.catalog.catalog.as_deref())?;
    let profile = args.profile.to_profile();
    let vehicle = args
        .vehicle
        .as_deref()
        .map(|id| catalog.require(id))
        .transpose()?;

    let result = predict_approval(&profile, vehicle)?;
    render_preapproval(&result, vehicle);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (config, catalog) = load_environment(args.catalog.catalog.as_deref())?;
    let vehicle = catalog.require(&args.vehicle)?;
    let profile = sample_profile();

    println!("Vehicle financing demo");
    println!(
        "Buyer: {} monthly income | credit {} | {} cash down | {} trade-in | target {}/mo",
        money(profile.monthly_income),
        profile.credit_score,
        money(profile.max_down_payment),
        money(profile.trade_in_value),
        money(profile.preferred_monthly_payment)
    );

    println!();
    render_quote(vehicle, &config.financing.defaults)?;

    let badge = vehicle_affordability(vehicle, &profile, &profile.financing_option())?;
    println!(
        "  Affordability badge: {:.1}% of income ({}) - {}",
        badge.budget_impact_percent,
        badge.risk_level.label(),
        badge.recommendation_text
    );

    println!();
    render_recommendations(&catalog, &profile, false)?;

    println!();
    render_sensitivity(vehicle, &config.financing.defaults.finance)?;

    let finance = &config.financing.defaults.finance;
    let quoted = apply_financing(vehicle.base_price, finance)?;
    let timeline = equity_timeline(
        vehicle.base_price,
        finance.down_payment,
        quoted.monthly_payment.unwrap_or(0.0),
        finance.annual_interest_rate_percent,
        finance.term_months,
    )?;
    println!("\nEquity build-up (every 12 months)");
    for point in timeline.iter().step_by(12) {
        println!(
            "  - month {:>2}: equity {} | owed {}",
            point.month,
            money(point.equity),
            money(point.remaining_principal)
        );
    }

    println!("\nDepreciation");
    for point in depreciation_curve(vehicle.base_price, DEFAULT_DEPRECIATION_YEARS)? {
        println!(
            "  - year {}: {} ({:.1}% lost)",
            point.year,
            money(point.value),
            point.depreciation_percent
        );
    }

    println!();
    let result = predict_approval(&profile, Some(vehicle))?;
    render_preapproval(&result, Some(vehicle));

    println!("\nTips");
    for tip in financial_tips(&profile) {
        println!("  - {tip}");
    }

    Ok(())
}

fn sample_profile() -> FinancialProfile {
    FinancialProfile {
        monthly_income: 5200.0,
        credit_score: 705,
        max_down_payment: 4000.0,
        preferred_monthly_payment: 480.0,
        has_trade_in: true,
        trade_in_value: 3500.0,
        financing_preference: FinancingKind::Finance,
        loan_term_months: 60,
        base_interest_rate_percent: 5.5,
    }
}

fn render_quote(vehicle: &Vehicle, defaults: &DefaultFinancing) -> Result<(), AppError> {
    let comparison = lease_vs_finance(vehicle, &defaults.lease, &defaults.finance)?;

    println!(
        "Quote for {} ({}) at {}",
        vehicle.display_name(),
        vehicle.category,
        money(vehicle.base_price)
    );
    if let Some(source) = &vehicle.price_source {
        println!("  Price source: {source}");
    }
    for quote in [&comparison.lease, &comparison.finance] {
        println!(
            "  - {}: {} down | {:.2}% APR | {} months -> {}/mo, {} total",
            quote.kind.label(),
            money(quote.down_payment),
            quote.annual_interest_rate_percent,
            quote.term_months,
            money(quote.monthly_payment.unwrap_or(0.0)),
            money(quote.total_cost.unwrap_or(0.0))
        );
    }
    println!(
        "  Finance vs lease: {}/mo | {} over the term",
        money(comparison.monthly_savings),
        money(comparison.total_savings)
    );
    Ok(())
}

fn render_sensitivity(vehicle: &Vehicle, finance: &FinancingOption) -> Result<(), AppError> {
    println!("Credit score impact");
    for scenario in credit_score_impact(
        vehicle.base_price,
        finance.down_payment,
        finance.annual_interest_rate_percent,
        finance.term_months,
    )? {
        println!(
            "  - {}: {:.1}% APR -> {}/mo, {} interest",
            scenario.credit_score,
            scenario.interest_rate,
            money(scenario.monthly_payment),
            money(scenario.total_interest)
        );
    }

    println!("Down payment sensitivity");
    for scenario in down_payment_sensitivity(
        vehicle.base_price,
        finance.annual_interest_rate_percent,
        finance.term_months,
        0.0,
        None,
    )? {
        println!(
            "  - {} down -> {}/mo ({} less), {} interest",
            money(scenario.down_payment),
            money(scenario.monthly_payment),
            money(scenario.monthly_reduction),
            money(scenario.total_interest)
        );
    }
    Ok(())
}

fn render_recommendations(
    catalog: &VehicleCatalog,
    profile: &FinancialProfile,
    show_scores: bool,
) -> Result<(), AppError> {
    let option = profile.financing_option();
    let affordable = affordable_vehicle_ids(catalog.vehicles(), profile, &option)?;
    let scores = score_vehicles(catalog.vehicles(), profile, &option)?;
    let impact = affordability_impact(profile.preferred_monthly_payment, profile.monthly_income)?;

    println!(
        "Target payment uses {:.1}% of income: {}",
        impact.percentage, impact.message
    );
    println!(
        "{} of {} vehicles fit the budget",
        affordable.len(),
        catalog.len()
    );

    println!("Top picks");
    for (rank, score) in scores.iter().take(3).enumerate() {
        let name = catalog
            .get(score.vehicle_id.as_str())
            .map(Vehicle::display_name)
            .unwrap_or_else(|| score.vehicle_id.to_string());
        println!(
            "  {}. {} -> {}/mo ({:.1}% of income, {} risk)",
            rank + 1,
            name,
            money(score.monthly_payment),
            score.budget_impact_percent,
            score.risk_level.label()
        );
    }

    if show_scores {
        println!("Score breakdown");
        for score in &scores {
            println!(
                "  - {}: {:.1} = budget {:.1} + payment {:.1} + risk {:.0}",
                score.vehicle_id,
                score.total_score,
                score.budget_impact_score,
                score.payment_score,
                score.risk_score
            );
        }
    }
    Ok(())
}

fn render_preapproval(result: &PreApprovalResult, vehicle: Option<&Vehicle>) {
    let target = vehicle
        .map(Vehicle::display_name)
        .unwrap_or_else(|| "a typical vehicle".to_string());
    println!(
        "Pre-approval for {} ({}): {}% - {}",
        target,
        money(result.estimated_vehicle_price),
        result.approval_percentage,
        result.likelihood_status.label()
    );

    let factors = &result.factors;
    println!("  - Credit: {}", factors.credit_score.message);
    println!("  - Income: {}", factors.income_ratio.message);
    println!("  - Down payment: {}", factors.down_payment.message);
    println!("  - Trade-in: {}", factors.trade_in.message);

    if !result.recommendations.is_empty() {
        println!("  Next steps:");
        for recommendation in &result.recommendations {
            println!("    * {recommendation}");
        }
    }
}
