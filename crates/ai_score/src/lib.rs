pub mod client;
pub mod error;
pub mod exec;
pub mod metrics;
pub mod model;
pub mod score;

pub use client::{AiScoreClient, AiScoreClientBuilder, AiScorer};
pub use error::ScoreError;
pub use exec::{HttpExec, ReqwestExecutor};
pub use score::{extract_percentage, AiScore, AiScoreFailure, Percentage};
