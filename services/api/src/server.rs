use crate::cli::ServeArgs;
use crate::infra::{load_environment, AppState};
use crate::routes::financing_routes;
use autofin::error::AppError;
use autofin::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let (mut config, catalog) = load_environment(args.catalog.as_deref())?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(
        prometheus_handle,
        catalog,
        config.financing.defaults.clone(),
    );
    let readiness_flag = app_state.readiness.clone();
    let vehicles = app_state.catalog.len();

    let app = financing_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, vehicles, "vehicle financing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
