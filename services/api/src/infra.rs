use autofin::catalog::VehicleCatalog;
use autofin::config::AppConfig;
use autofin::error::AppError;
use autofin::financing::{Advisor, DefaultFinancing, UnconfiguredAdvisor};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<VehicleCatalog>,
    pub(crate) defaults: Arc<DefaultFinancing>,
    pub(crate) advisor: Arc<dyn Advisor>,
}

impl AppState {
    pub(crate) fn new(
        metrics: PrometheusHandle,
        catalog: VehicleCatalog,
        defaults: DefaultFinancing,
    ) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            catalog: Arc::new(catalog),
            defaults: Arc::new(defaults),
            advisor: Arc::new(UnconfiguredAdvisor),
        }
    }
}

/// Reads `path` when given, otherwise the bundled catalog.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<VehicleCatalog, AppError> {
    let catalog = match path {
        Some(path) => {
            let catalog = VehicleCatalog::from_path(path)?;
            info!(path = %path.display(), vehicles = catalog.len(), "loaded vehicle catalog");
            catalog
        }
        None => VehicleCatalog::standard()?,
    };
    Ok(catalog)
}

/// Configuration plus the catalog it points at, with `catalog_override`
/// taking precedence over `APP_CATALOG_PATH`.
pub(crate) fn load_environment(
    catalog_override: Option<&Path>,
) -> Result<(AppConfig, VehicleCatalog), AppError> {
    let config = AppConfig::load()?;
    let path = catalog_override.or(config.financing.catalog_path.as_deref());
    let catalog = load_catalog(path)?;
    Ok((config, catalog))
}
