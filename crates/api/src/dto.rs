use ai_score::AiScore;
use analysis::SpamVerdict;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SpamDetectionDto {
    pub result: &'static str,
    pub prediction_code: i64,
}

impl From<SpamVerdict> for SpamDetectionDto {
    fn from(verdict: SpamVerdict) -> Self {
        Self {
            result: verdict.label.as_str(),
            prediction_code: verdict.code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AiDetectionDto {
    pub percentage: AiScore,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub spam_detection: SpamDetectionDto,
    pub ai_detection: AiDetectionDto,
}

impl AnalysisResponse {
    pub fn new(verdict: SpamVerdict, ai: AiScore) -> Self {
        Self {
            spam_detection: verdict.into(),
            ai_detection: AiDetectionDto { percentage: ai },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: &'static str,
}
