use fleet_roi::config::AppConfig;
use fleet_roi::error::AppError;
use fleet_roi::{NarrativeSynthesizer, RoiAnalysisService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service wired to the configured collaborator, or deterministic-only when
/// `offline` is set.
pub(crate) fn build_service(
    config: Option<&AppConfig>,
    offline: bool,
) -> Result<Arc<RoiAnalysisService>, AppError> {
    let synthesizer = match config {
        Some(config) if !offline => NarrativeSynthesizer::from_config(&config.narrative)?,
        _ => NarrativeSynthesizer::offline(),
    };
    Ok(Arc::new(RoiAnalysisService::new(synthesizer)))
}

/// CLI commands only need configuration when they may call the collaborator.
pub(crate) fn cli_service(offline: bool) -> Result<Arc<RoiAnalysisService>, AppError> {
    if offline {
        return build_service(None, true);
    }
    let config = AppConfig::load()?;
    build_service(Some(&config), false)
}
