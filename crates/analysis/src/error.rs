use std::path::PathBuf;

pub type Result<T, E = ClassifierError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    #[error("failed to read classifier artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse classifier artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid classifier artifact: {0}")]
    Invalid(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

impl ClassifierError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}
