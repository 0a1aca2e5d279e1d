use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::{AppError, Result};

/// Environment variable the hosted inference service documents for its key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

const RESERVED_PATHS: &[&str] = &["/", "/analyze"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub ai_score: AiScoreConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: AppConfig = Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("api.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("ai_score.api_key", std::env::var(API_KEY_ENV).ok())?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.allowed_origins.is_empty() {
            return Err(AppError::invalid("api.allowed_origins must not be empty"));
        }
        if self.ai_score.timeout_secs == 0 {
            return Err(AppError::invalid("ai_score.timeout_secs must be positive"));
        }
        if !(0.0..=2.0).contains(&self.ai_score.temperature) {
            return Err(AppError::invalid(format!(
                "ai_score.temperature must be within [0, 2], got {}",
                self.ai_score.temperature
            )));
        }
        let metrics_path = self.observability.metrics_path.as_str();
        if !metrics_path.starts_with('/') {
            return Err(AppError::invalid(
                "observability.metrics_path must start with '/'",
            ));
        }
        if RESERVED_PATHS.contains(&metrics_path) {
            return Err(AppError::invalid(format!(
                "observability.metrics_path {} collides with an API route",
                metrics_path
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_bind")]
    pub bind: String,
    #[serde(default = "ApiConfig::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    fn default_bind() -> String {
        "0.0.0.0:8000".to_string()
    }

    fn default_allowed_origins() -> Vec<String> {
        vec!["http://localhost:3000".to_string()]
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
            allowed_origins: Self::default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "ClassifierConfig::default_model_path")]
    pub model_path: String,
}

impl ClassifierConfig {
    fn default_model_path() -> String {
        "spam_classifier.json".to_string()
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: Self::default_model_path(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct AiScoreConfig {
    #[serde(default = "AiScoreConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "AiScoreConfig::default_model")]
    pub model: String,
    #[serde(default = "AiScoreConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "AiScoreConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl AiScoreConfig {
    fn default_endpoint() -> String {
        "https://api.groq.com/openai/v1/chat/completions".to_string()
    }

    fn default_model() -> String {
        "llama3-8b-8192".to_string()
    }

    const fn default_temperature() -> f32 {
        0.1
    }

    const fn default_timeout_secs() -> u64 {
        15
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AiScoreConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            timeout_secs: Self::default_timeout_secs(),
            api_key: None,
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for AiScoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiScoreConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_metrics_path")]
    pub metrics_path: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,
}

impl ObservabilityConfig {
    fn default_metrics_path() -> String {
        "/metrics".to_string()
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_path: Self::default_metrics_path(),
            log_format: LogFormat::default(),
            log_level: Self::default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hosted_service() {
        let config = AppConfig::default();
        assert_eq!(config.api.bind, "0.0.0.0:8000");
        assert_eq!(config.api.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.classifier.model_path, "spam_classifier.json");
        assert_eq!(config.ai_score.model, "llama3-8b-8192");
        assert_eq!(config.ai_score.timeout(), Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_workspace_defaults_file() {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../..");
        let config = AppConfig::load_from_path(root).expect("config loads");
        assert_eq!(config.observability.metrics_path, "/metrics");
        assert!(config.ai_score.endpoint.starts_with("https://"));
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let config = AppConfig::load_from_path("/nonexistent/config/root").expect("defaults");
        assert_eq!(config.classifier.model_path, "spam_classifier.json");
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.ai_score.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(AppError::Invalid(_))));
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let mut config = AppConfig::default();
        config.ai_score.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn metrics_path_needs_leading_slash() {
        let mut config = AppConfig::default();
        config.observability.metrics_path = "metrics".into();
        assert!(config.validate().is_err());
        config.observability.metrics_path = "/analyze".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AiScoreConfig {
            api_key: Some("gsk_secret".into()),
            ..AiScoreConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
