pub mod classifier;
pub mod error;
pub mod estimator;
pub mod vectorizer;

pub use classifier::{SpamClassifier, SpamLabel, SpamPredictor, SpamVerdict};
pub use error::{ClassifierError, Result};
