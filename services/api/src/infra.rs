use metrics_exporter_prometheus::PrometheusHandle;
use rapport::assessment::{parse_assignment, Answer, CatalogPreset, ScoreEngine};
use rapport::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the catalog once at startup; a malformed catalog is fatal.
pub(crate) fn load_engine(preset: CatalogPreset) -> Result<Arc<ScoreEngine>, AppError> {
    let catalog = preset.build()?;
    info!(
        catalog = %preset,
        criteria = catalog.len(),
        "assessment catalog loaded"
    );
    Ok(Arc::new(ScoreEngine::new(catalog)))
}

pub(crate) fn parse_answer_arg(raw: &str) -> Result<(String, Answer), String> {
    parse_assignment(raw).map_err(|err| err.to_string())
}
