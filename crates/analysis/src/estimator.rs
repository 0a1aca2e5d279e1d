use serde::Deserialize;

use crate::error::{ClassifierError, Result};
use crate::vectorizer::SparseVector;

/// Binary estimator fitted on TF-IDF rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    /// Multinomial naive Bayes: argmax of the joint log likelihood.
    MultinomialNb {
        classes: Vec<i64>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
    /// Linear decision function (logistic regression, linear SVM).
    /// A positive score selects `classes[1]`.
    Linear {
        classes: Vec<i64>,
        coef: Vec<f64>,
        intercept: f64,
    },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::MultinomialNb { .. } => "multinomial_nb",
            Estimator::Linear { .. } => "linear",
        }
    }

    pub fn classes(&self) -> &[i64] {
        match self {
            Estimator::MultinomialNb { classes, .. } | Estimator::Linear { classes, .. } => classes,
        }
    }

    pub fn validate(&self, n_features: usize) -> Result<()> {
        let mut sorted = self.classes().to_vec();
        sorted.sort_unstable();
        if sorted != [0, 1] {
            return Err(ClassifierError::invalid(format!(
                "expected binary classes [0, 1], got {:?}",
                self.classes()
            )));
        }

        match self {
            Estimator::MultinomialNb {
                class_log_prior,
                feature_log_prob,
                ..
            } => {
                if class_log_prior.len() != 2 || feature_log_prob.len() != 2 {
                    return Err(ClassifierError::invalid(
                        "naive Bayes parameters must have one row per class",
                    ));
                }
                if let Some(row) = feature_log_prob.iter().find(|row| row.len() != n_features) {
                    return Err(ClassifierError::invalid(format!(
                        "feature_log_prob row has {} entries, vectorizer has {} features",
                        row.len(),
                        n_features
                    )));
                }
                let finite = class_log_prior.iter().all(|v| v.is_finite())
                    && feature_log_prob.iter().flatten().all(|v| v.is_finite());
                if !finite {
                    return Err(ClassifierError::invalid(
                        "naive Bayes parameters contain non-finite values",
                    ));
                }
            }
            Estimator::Linear {
                coef, intercept, ..
            } => {
                if coef.len() != n_features {
                    return Err(ClassifierError::invalid(format!(
                        "coef has {} entries, vectorizer has {} features",
                        coef.len(),
                        n_features
                    )));
                }
                if !intercept.is_finite() || coef.iter().any(|v| !v.is_finite()) {
                    return Err(ClassifierError::invalid(
                        "linear parameters contain non-finite values",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, row: &SparseVector) -> Result<i64> {
        match self {
            Estimator::MultinomialNb {
                classes,
                class_log_prior,
                feature_log_prob,
            } => {
                let mut best: Option<(usize, f64)> = None;
                for (class_idx, (prior, log_probs)) in
                    class_log_prior.iter().zip(feature_log_prob).enumerate()
                {
                    let joint = prior + dot(row, log_probs);
                    if !joint.is_finite() {
                        return Err(ClassifierError::inference(
                            "joint log likelihood is not finite",
                        ));
                    }
                    // Ties go to the lower class index.
                    if best.map_or(true, |(_, score)| joint > score) {
                        best = Some((class_idx, joint));
                    }
                }
                best.map(|(idx, _)| classes[idx])
                    .ok_or_else(|| ClassifierError::inference("estimator has no classes"))
            }
            Estimator::Linear {
                classes,
                coef,
                intercept,
            } => {
                let decision = intercept + dot(row, coef);
                if !decision.is_finite() {
                    return Err(ClassifierError::inference("decision value is not finite"));
                }
                Ok(if decision > 0.0 { classes[1] } else { classes[0] })
            }
        }
    }
}

fn dot(row: &SparseVector, dense: &[f64]) -> f64 {
    row.iter()
        .filter_map(|&(idx, w)| dense.get(idx).map(|d| w * d))
        .sum()
}
