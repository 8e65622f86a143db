//! API request handlers

use axum::{extract::Extension, response::Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use yoda_mqa::{MqaEngine, MqaResponse};

use crate::error::ApiError;
use crate::extract::MetadataDocument;
use crate::models::HealthResponse;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MqaEngine>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: Arc<MqaEngine>) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
        }
    }
}

/// Score the RDF/XML document carried in the request body
pub async fn evaluate_metadata(
    Extension(state): Extension<Arc<AppState>>,
    MetadataDocument(document): MetadataDocument,
) -> Result<Json<MqaResponse>, ApiError> {
    let start = Instant::now();
    let response = state.engine.evaluate(&document).await?;

    info!(
        score = response.summary.score,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "served /mqavalues"
    );
    Ok(Json(response))
}

/// Health check handler
pub async fn health_check(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now(),
    })
}
