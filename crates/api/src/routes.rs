use std::sync::Arc;

use ai_score::AiScorer;
use analysis::SpamPredictor;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::text::normalize;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec};
use tracing::{info, instrument};

use crate::dto::{AnalysisRequest, AnalysisResponse, MessageDto};
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ApiState {
    pub classifier: Arc<dyn SpamPredictor>,
    pub ai_scorer: Arc<dyn AiScorer>,
    pub metrics_path: String,
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let metrics_path = state.metrics_path.clone();
    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze))
        .route(&metrics_path, get(metrics))
        .with_state(state)
}

static ANALYSES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "analyze_requests_total",
        "Completed analyses by spam result and AI score outcome",
        &["result", "ai_outcome"]
    )
    .expect("analyses counter")
});

async fn root() -> impl IntoResponse {
    Json(MessageDto {
        message: "API is running correctly",
    })
}

#[instrument(skip_all)]
async fn analyze(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> ApiResult<Json<AnalysisResponse>> {
    let Json(request) = payload?;

    let normalized = normalize(&request.text);
    let verdict = state.classifier.predict(&normalized)?;
    let ai = state.ai_scorer.score(&request.text).await;

    ANALYSES
        .with_label_values(&[verdict.label.as_str(), ai.outcome()])
        .inc();
    info!(
        spam = verdict.is_spam(),
        ai_outcome = ai.outcome(),
        chars = request.text.chars().count(),
        "analysis complete"
    );
    Ok(Json(AnalysisResponse::new(verdict, ai)))
}

async fn metrics() -> ApiResult<impl IntoResponse> {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let content_type = encoder.format_type().to_string();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, content_type)],
        buffer,
    ))
}
