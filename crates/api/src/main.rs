use std::sync::Arc;

use ai_score::AiScoreClientBuilder;
use analysis::SpamClassifier;
use anyhow::{Context, Result};
use api::{build_router, cors_layer, shutdown_signal, ApiState};
use axum::Router;
use common::config::API_KEY_ENV;
use common::{logging, AppConfig};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init_logging(
        &config.observability.log_level,
        config.observability.log_format,
    );

    // No classifier, no service.
    let classifier = SpamClassifier::load(&config.classifier.model_path).with_context(|| {
        format!(
            "spam classifier unavailable at {}",
            config.classifier.model_path
        )
    })?;

    let ai_scorer = AiScoreClientBuilder::from_config(&config.ai_score).build()?;
    if !ai_scorer.has_api_key() {
        warn!(
            "{} is not set; AI scores will report a missing key",
            API_KEY_ENV
        );
    }

    let cors = cors_layer(&config.api.allowed_origins)?;
    let state = Arc::new(ApiState {
        classifier: Arc::new(classifier),
        ai_scorer: Arc::new(ai_scorer),
        metrics_path: config.observability.metrics_path.clone(),
    });
    let app: Router = build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: std::net::SocketAddr = config.api.bind.parse()?;
    info!("api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
