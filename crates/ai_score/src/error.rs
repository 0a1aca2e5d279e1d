use std::time::Duration;

use http::StatusCode;

use crate::score::AiScoreFailure;

/// Everything that can go wrong between building the completion request and
/// reading a number out of the reply.
#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("failed to build completion request: {0}")]
    Request(#[source] anyhow::Error),
    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),
    #[error("completion request failed: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("unexpected status {status} for {endpoint}")]
    Status { status: StatusCode, endpoint: String },
    #[error("completion body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("completion contained no choices")]
    EmptyChoices,
    #[error("no number in completion content {0:?}")]
    NoDigits(String),
}

impl ScoreError {
    pub fn failure(&self) -> AiScoreFailure {
        match self {
            ScoreError::NoDigits(_) => AiScoreFailure::UnparsableResponse,
            _ => AiScoreFailure::UpstreamError,
        }
    }
}
