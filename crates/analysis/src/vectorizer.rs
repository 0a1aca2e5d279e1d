use std::borrow::Cow;
use std::collections::HashMap;

use common::lazy_regex;
use serde::Deserialize;

use crate::error::{ClassifierError, Result};

/// Sparse row: `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Fitted TF-IDF transform over word n-grams.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "TfidfVectorizer::default_lowercase")]
    lowercase: bool,
    #[serde(default = "TfidfVectorizer::default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "TfidfVectorizer::default_norm")]
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    const fn default_lowercase() -> bool {
        true
    }

    const fn default_ngram_range() -> (usize, usize) {
        (1, 1)
    }

    const fn default_norm() -> Option<Norm> {
        Some(Norm::L2)
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(ClassifierError::invalid("vectorizer vocabulary is empty"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::invalid(format!(
                "ngram_range ({}, {}) is not a valid range",
                min_n, max_n
            )));
        }
        if let Some((term, &idx)) = self
            .vocabulary
            .iter()
            .find(|(_, &idx)| idx >= self.n_features())
        {
            return Err(ClassifierError::invalid(format!(
                "vocabulary term {:?} maps to index {} but idf has {} entries",
                term,
                idx,
                self.n_features()
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::invalid("idf contains non-finite weights"));
        }
        Ok(())
    }

    pub fn transform(&self, doc: &str) -> SparseVector {
        let doc = if self.lowercase {
            Cow::Owned(doc.to_lowercase())
        } else {
            Cow::Borrowed(doc)
        };
        let tokens = tokenize(&doc);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&idx) = self.vocabulary.get(&term) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();
        row.sort_unstable_by_key(|(idx, _)| *idx);

        let length = match self.norm {
            Some(Norm::L2) => row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 0.0,
        };
        if length > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= length;
            }
        }
        row
    }
}

/// Runs of two or more word characters; single characters are ignored.
fn tokenize(doc: &str) -> Vec<&str> {
    lazy_regex!(TOKEN_RE = r"\b\w\w+\b");
    TOKEN_RE.find_iter(doc).map(|m| m.as_str()).collect()
}
