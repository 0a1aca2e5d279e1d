use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ClassifierError, Result};
use crate::estimator::Estimator;
use crate::vectorizer::TfidfVectorizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamLabel {
    Spam,
    NotSpam,
}

impl SpamLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamLabel::Spam => "Spam",
            SpamLabel::NotSpam => "Not Spam",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpamVerdict {
    pub label: SpamLabel,
    pub code: i64,
}

impl SpamVerdict {
    /// Only code 1 means spam; every other code maps to `NotSpam`.
    pub fn from_code(code: i64) -> Self {
        let label = if code == 1 {
            SpamLabel::Spam
        } else {
            SpamLabel::NotSpam
        };
        Self { label, code }
    }

    pub fn is_spam(&self) -> bool {
        self.label == SpamLabel::Spam
    }
}

/// Classifies already-normalized text.
pub trait SpamPredictor: Send + Sync {
    fn predict(&self, normalized: &str) -> Result<SpamVerdict>;
}

/// TF-IDF vectorizer followed by a binary estimator, loaded once from a JSON
/// artifact and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SpamClassifier {
    vectorizer: TfidfVectorizer,
    estimator: Estimator,
}

impl SpamClassifier {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let classifier = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            features = classifier.vectorizer.n_features(),
            estimator = classifier.estimator.kind(),
            "loaded spam classifier"
        );
        Ok(classifier)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let classifier: SpamClassifier = serde_json::from_str(raw)?;
        classifier.vectorizer.validate()?;
        classifier
            .estimator
            .validate(classifier.vectorizer.n_features())?;
        Ok(classifier)
    }

    pub fn predict_batch(&self, docs: &[&str]) -> Result<Vec<i64>> {
        docs.iter()
            .map(|doc| {
                let row = self.vectorizer.transform(doc);
                self.estimator.predict(&row)
            })
            .collect()
    }
}

impl SpamPredictor for SpamClassifier {
    fn predict(&self, normalized: &str) -> Result<SpamVerdict> {
        let code = self
            .predict_batch(&[normalized])?
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::inference("empty prediction batch"))?;
        let verdict = SpamVerdict::from_code(code);
        debug!(code, label = verdict.label.as_str(), "spam prediction");
        Ok(verdict)
    }
}
