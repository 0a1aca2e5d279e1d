use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use common::config::AiScoreConfig;
use common::text::preview;
use http::{header, Method, Request};
use tracing::{debug, info, instrument, warn};

use crate::error::ScoreError;
use crate::exec::{HttpExec, ReqwestExecutor};
use crate::metrics;
use crate::model::{ChatCompletionRequest, ChatCompletionResponse};
use crate::score::{extract_percentage, AiScore, AiScoreFailure, Percentage};

pub const SYSTEM_PROMPT: &str = "You are an AI content detector. Analyze the user's text. \
Respond with ONLY a single number from 0 to 100 representing the percentage chance the text \
is AI-generated. Do not add any other words, symbols, or explanations. Just the number.";

const PREVIEW_CHARS: usize = 50;

/// Estimates how likely a text is machine-generated. Never fails: problems
/// come back as [`AiScore::Unavailable`].
#[async_trait]
pub trait AiScorer: Send + Sync {
    async fn score(&self, text: &str) -> AiScore;
}

#[derive(Clone)]
pub struct AiScoreClientBuilder {
    api_key: Option<String>,
    http_exec: Option<Arc<dyn HttpExec>>,
    endpoint: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl AiScoreClientBuilder {
    /// Default endpoint, model and limits with the given key.
    pub fn new(api_key: Option<String>) -> Self {
        Self::from_config(&AiScoreConfig {
            api_key,
            ..AiScoreConfig::default()
        })
    }

    pub fn from_config(config: &AiScoreConfig) -> Self {
        Self {
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            http_exec: None,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout(),
        }
    }

    pub fn http_exec(mut self, exec: Arc<dyn HttpExec>) -> Self {
        self.http_exec = Some(exec);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<AiScoreClient> {
        let http_exec = match self.http_exec {
            Some(exec) => exec,
            None => Arc::new(ReqwestExecutor::new(self.timeout)?),
        };
        Ok(AiScoreClient {
            api_key: self.api_key,
            http_exec,
            endpoint: self.endpoint,
            model: self.model,
            temperature: self.temperature,
            timeout: self.timeout,
        })
    }
}

pub struct AiScoreClient {
    api_key: Option<String>,
    http_exec: Arc<dyn HttpExec>,
    endpoint: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl AiScoreClient {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_request(&self, api_key: &str, text: &str) -> Result<Request<Vec<u8>>, ScoreError> {
        let payload =
            ChatCompletionRequest::new(&self.model, SYSTEM_PROMPT, text, self.temperature);
        let body = serde_json::to_vec(&payload).map_err(|err| ScoreError::Request(err.into()))?;
        Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|err| ScoreError::Request(err.into()))
    }

    async fn request_score(
        &self,
        api_key: &str,
        text: &str,
    ) -> Result<Percentage, ScoreError> {
        let request = self.build_request(api_key, text)?;
        let response = tokio::time::timeout(self.timeout, self.http_exec.execute(request))
            .await
            .map_err(|_| ScoreError::Timeout(self.timeout))?
            .map_err(ScoreError::Transport)?;

        let status = response.status();
        let body = response.into_body();
        debug!(
            status = %status,
            body = %String::from_utf8_lossy(&body),
            "chat completion response"
        );
        if !status.is_success() {
            return Err(ScoreError::Status {
                status,
                endpoint: self.endpoint.clone(),
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_slice(&body)?;
        let content = completion.first_content().ok_or(ScoreError::EmptyChoices)?;
        extract_percentage(content).ok_or_else(|| ScoreError::NoDigits(content.to_string()))
    }
}

#[async_trait]
impl AiScorer for AiScoreClient {
    #[instrument(skip_all)]
    async fn score(&self, text: &str) -> AiScore {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("no API key configured, skipping AI score");
            let score = AiScore::Unavailable(AiScoreFailure::MissingApiKey);
            metrics::OUTCOMES.with_label_values(&[score.outcome()]).inc();
            return score;
        };

        info!(
            model = %self.model,
            preview = %preview(text, PREVIEW_CHARS),
            "requesting AI score"
        );
        let start = Instant::now();
        let score = match self.request_score(api_key, text).await {
            Ok(percentage) => AiScore::Percentage(percentage),
            Err(err) => {
                warn!(error = %err, "AI score unavailable");
                AiScore::Unavailable(err.failure())
            }
        };
        metrics::UPSTREAM_LATENCY
            .with_label_values(&[score.outcome()])
            .observe(start.elapsed().as_secs_f64());
        metrics::OUTCOMES.with_label_values(&[score.outcome()]).inc();
        score
    }
}
