use crate::infra::AppState;
use autofin::catalog::VehicleCatalog;
use autofin::error::AppError;
use autofin::financing::{
    affordability_impact, affordable_vehicle_ids, analyze_affordability, apply_financing,
    credit_score_impact, depreciation_curve, down_payment_sensitivity, equity_timeline,
    financial_tips, lease_vs_finance, monthly_payment, predict_approval, score_vehicles,
    top3_recommended_vehicle_ids, vehicle_affordability, AdvisorContext, AffordabilityAssessment,
    AffordabilityImpact, ChatMessage, CreditScenario, DefaultFinancing, DepreciationPoint,
    DownPaymentScenario, EquityPoint, FinancialProfile, FinancingError, FinancingKind,
    FinancingOption, LeaseFinanceComparison, PreApprovalResult, Vehicle, VehicleId, VehicleScore,
    DEFAULT_DEPRECIATION_YEARS,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

pub(crate) fn financing_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/vehicles", get(vehicles_endpoint))
        .route("/api/v1/financing/quote", post(quote_endpoint))
        .route("/api/v1/financing/compare", post(compare_endpoint))
        .route("/api/v1/affordability", post(affordability_endpoint))
        .route("/api/v1/recommendations", post(recommendations_endpoint))
        .route("/api/v1/preapproval", post(preapproval_endpoint))
        .route("/api/v1/projections/equity", post(equity_endpoint))
        .route(
            "/api/v1/projections/depreciation",
            post(depreciation_endpoint),
        )
        .route("/api/v1/sensitivity/credit", post(credit_sensitivity_endpoint))
        .route(
            "/api/v1/sensitivity/down-payment",
            post(down_payment_sensitivity_endpoint),
        )
        .route("/api/v1/advisor/context", post(advisor_context_endpoint))
        .route("/api/v1/advisor/reply", post(advisor_reply_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn vehicles_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<VehicleCatalog> {
    Json(state.catalog.as_ref().clone())
}

/// A catalog vehicle by id, or an ad-hoc price when no id is given.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PriceTarget {
    #[serde(default)]
    pub(crate) vehicle_id: Option<String>,
    #[serde(default)]
    pub(crate) base_price: Option<f64>,
}

impl PriceTarget {
    fn resolve(&self, catalog: &VehicleCatalog) -> Result<(Option<VehicleId>, f64), AppError> {
        match &self.vehicle_id {
            Some(id) => {
                let vehicle = catalog.require(id)?;
                Ok((Some(vehicle.id.clone()), vehicle.base_price))
            }
            None => {
                let price = self.base_price.unwrap_or(0.0);
                if !price.is_finite() || price <= 0.0 {
                    return Err(FinancingError::InvalidPrice { value: price }.into());
                }
                Ok((None, price))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    #[serde(flatten)]
    pub(crate) target: PriceTarget,
    #[serde(default)]
    pub(crate) kind: Option<FinancingKind>,
    #[serde(default)]
    pub(crate) option: Option<FinancingOption>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vehicle_id: Option<VehicleId>,
    pub(crate) base_price: f64,
    pub(crate) quote: FinancingOption,
}

pub(crate) async fn quote_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let (vehicle_id, base_price) = payload.target.resolve(&state.catalog)?;
    let option = match payload.option {
        Some(option) => option,
        None => state
            .defaults
            .option(payload.kind.unwrap_or(FinancingKind::Finance))
            .clone(),
    };

    Ok(Json(QuoteResponse {
        vehicle_id,
        base_price,
        quote: apply_financing(base_price, &option)?,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    pub(crate) vehicle_id: String,
    #[serde(default)]
    pub(crate) lease: Option<FinancingOption>,
    #[serde(default)]
    pub(crate) finance: Option<FinancingOption>,
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<LeaseFinanceComparison>, AppError> {
    let vehicle = state.catalog.require(&payload.vehicle_id)?;
    let lease = payload.lease.unwrap_or_else(|| state.defaults.lease.clone());
    let finance = payload
        .finance
        .unwrap_or_else(|| state.defaults.finance.clone());

    Ok(Json(lease_vs_finance(vehicle, &lease, &finance)?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AffordabilityRequest {
    pub(crate) monthly_payment: f64,
    pub(crate) profile: FinancialProfile,
    #[serde(default)]
    pub(crate) vehicle_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AffordabilityResponse {
    pub(crate) assessment: AffordabilityAssessment,
    pub(crate) impact: AffordabilityImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vehicle_badge: Option<AffordabilityAssessment>,
    pub(crate) tips: Vec<String>,
}

pub(crate) async fn affordability_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AffordabilityRequest>,
) -> Result<Json<AffordabilityResponse>, AppError> {
    let AffordabilityRequest {
        monthly_payment: payment,
        profile,
        vehicle_id,
    } = payload;

    let vehicle_badge = match vehicle_id {
        Some(id) => {
            let vehicle = state.catalog.require(&id)?;
            Some(vehicle_affordability(
                vehicle,
                &profile,
                &profile.financing_option(),
            )?)
        }
        None => None,
    };

    Ok(Json(AffordabilityResponse {
        assessment: analyze_affordability(payment, &profile)?,
        impact: affordability_impact(payment, profile.monthly_income)?,
        vehicle_badge,
        tips: financial_tips(&profile),
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) profile: FinancialProfile,
    #[serde(default)]
    pub(crate) option: Option<FinancingOption>,
    /// Restricts the ranking to these catalog vehicles.
    #[serde(default)]
    pub(crate) vehicle_ids: Option<Vec<VehicleId>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) affordable: Vec<VehicleId>,
    pub(crate) top3: Vec<VehicleId>,
    pub(crate) scores: Vec<VehicleScore>,
}

pub(crate) async fn recommendations_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let candidates: Vec<Vehicle> = match &payload.vehicle_ids {
        Some(ids) => state.catalog.select(ids)?,
        None => state.catalog.vehicles().to_vec(),
    };
    let option = payload
        .option
        .unwrap_or_else(|| payload.profile.financing_option());

    let affordable = affordable_vehicle_ids(&candidates, &payload.profile, &option)?;
    let top3 = top3_recommended_vehicle_ids(&candidates, &payload.profile, &option)?;
    let scores = score_vehicles(&candidates, &payload.profile, &option)?;

    Ok(Json(RecommendationResponse {
        affordable,
        top3,
        scores,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreApprovalRequest {
    pub(crate) profile: FinancialProfile,
    #[serde(default)]
    pub(crate) vehicle_id: Option<String>,
}

pub(crate) async fn preapproval_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PreApprovalRequest>,
) -> Result<Json<PreApprovalResult>, AppError> {
    let vehicle = payload
        .vehicle_id
        .as_deref()
        .map(|id| state.catalog.require(id))
        .transpose()?;

    Ok(Json(predict_approval(&payload.profile, vehicle)?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct EquityRequest {
    #[serde(flatten)]
    pub(crate) target: PriceTarget,
    pub(crate) down_payment: f64,
    pub(crate) annual_rate_percent: f64,
    pub(crate) term_months: u32,
    /// Computed from the loan terms when omitted.
    #[serde(default)]
    pub(crate) monthly_payment: Option<f64>,
}

pub(crate) async fn equity_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EquityRequest>,
) -> Result<Json<Vec<EquityPoint>>, AppError> {
    let (_, base_price) = payload.target.resolve(&state.catalog)?;
    let payment = match payload.monthly_payment {
        Some(payment) => payment,
        None => monthly_payment(
            base_price - payload.down_payment,
            payload.annual_rate_percent,
            payload.term_months,
        )?,
    };

    Ok(Json(equity_timeline(
        base_price,
        payload.down_payment,
        payment,
        payload.annual_rate_percent,
        payload.term_months,
    )?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DepreciationRequest {
    #[serde(flatten)]
    pub(crate) target: PriceTarget,
    #[serde(default)]
    pub(crate) years: Option<u32>,
}

pub(crate) async fn depreciation_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DepreciationRequest>,
) -> Result<Json<Vec<DepreciationPoint>>, AppError> {
    let (_, base_price) = payload.target.resolve(&state.catalog)?;
    let years = payload.years.unwrap_or(DEFAULT_DEPRECIATION_YEARS);

    Ok(Json(depreciation_curve(base_price, years)?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditSensitivityRequest {
    #[serde(flatten)]
    pub(crate) target: PriceTarget,
    pub(crate) down_payment: f64,
    pub(crate) base_rate: f64,
    pub(crate) term_months: u32,
}

pub(crate) async fn credit_sensitivity_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreditSensitivityRequest>,
) -> Result<Json<Vec<CreditScenario>>, AppError> {
    let (_, base_price) = payload.target.resolve(&state.catalog)?;

    Ok(Json(credit_score_impact(
        base_price,
        payload.down_payment,
        payload.base_rate,
        payload.term_months,
    )?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownPaymentSensitivityRequest {
    #[serde(flatten)]
    pub(crate) target: PriceTarget,
    pub(crate) rate: f64,
    pub(crate) term_months: u32,
    #[serde(default)]
    pub(crate) min_down: f64,
    #[serde(default)]
    pub(crate) max_down: Option<f64>,
}

pub(crate) async fn down_payment_sensitivity_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DownPaymentSensitivityRequest>,
) -> Result<Json<Vec<DownPaymentScenario>>, AppError> {
    let (_, base_price) = payload.target.resolve(&state.catalog)?;

    Ok(Json(down_payment_sensitivity(
        base_price,
        payload.rate,
        payload.term_months,
        payload.min_down,
        payload.max_down,
    )?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvisorContextRequest {
    #[serde(default)]
    pub(crate) vehicle_ids: Vec<VehicleId>,
    pub(crate) profile: FinancialProfile,
    /// Per-vehicle terms overriding the service defaults.
    #[serde(default)]
    pub(crate) quotes: HashMap<VehicleId, DefaultFinancing>,
}

impl AdvisorContextRequest {
    fn build(&self, state: &AppState) -> Result<AdvisorContext, AppError> {
        let selected = state.catalog.select(&self.vehicle_ids)?;
        Ok(AdvisorContext::build(
            &selected,
            &self.profile,
            &self.quotes,
            &state.defaults,
        )?)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AdvisorContextResponse {
    pub(crate) context: AdvisorContext,
    pub(crate) prompt: String,
}

pub(crate) async fn advisor_context_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AdvisorContextRequest>,
) -> Result<Json<AdvisorContextResponse>, AppError> {
    let context = payload.build(&state)?;
    let prompt = context.render_prompt();

    Ok(Json(AdvisorContextResponse { context, prompt }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvisorReplyRequest {
    #[serde(flatten)]
    pub(crate) context: AdvisorContextRequest,
    #[serde(default)]
    pub(crate) history: Vec<ChatMessage>,
    pub(crate) message: String,
}

pub(crate) async fn advisor_reply_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AdvisorReplyRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let context = payload.context.build(&state)?;
    let reply = state
        .advisor
        .reply(&context, &payload.history, &payload.message)?;

    Ok(Json(json!({ "reply": reply })))
}
