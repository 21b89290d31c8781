use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::analysis::ValidationError;
use crate::error::AppError;
use crate::locale;
use crate::service::{AnalysisResponse, RoiAnalysisService};

/// Router builder exposing the analysis and health endpoints.
pub fn analysis_router(service: Arc<RoiAnalysisService>) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<RoiAnalysisService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "analyze request without a usable JSON body");
        ValidationError::EmptyPayload
    })?;

    let response = service.analyze(&payload).await?;
    Ok(Json(response))
}

pub(crate) async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "language": locale::active().language(),
        "output_format": "Structured JSON",
        "endpoints": {
            "/health": "Health check endpoint",
            "/analyze": "Vehicle ROI analysis endpoint",
        },
    }))
}
