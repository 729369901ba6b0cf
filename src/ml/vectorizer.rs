//! TF-IDF vectorizer for text feature extraction.
//!
//! Learns a fixed vocabulary and inverse-document-frequency weights from the
//! training corpus (`fit`), then maps any token sequence into that fixed
//! vector space (`transform`). Fitting is a once-per-pipeline operation and
//! must only ever see the training split; tokens outside the fitted
//! vocabulary are silently ignored at transform time.
//!
//! Every tunable is an explicit field of [`TfIdfConfig`] so numeric behavior
//! is pinned rather than inherited from library defaults.

use std::collections::HashMap;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{MaydayError, Result};

/// Vector normalization applied to each transformed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorNorm {
    /// Scale to unit L1 norm (sum of absolute values).
    L1,
    /// Scale to unit L2 norm (Euclidean length).
    L2,
    /// No normalization.
    None,
}

/// Configuration for the TF-IDF vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfConfig {
    /// Smooth IDF weights: `ln((1 + n) / (1 + df)) + 1`. When false, the
    /// unsmoothed `ln(n / df) + 1` is used.
    pub smooth_idf: bool,
    /// Replace raw term frequency with `1 + ln(tf)`.
    pub sublinear_tf: bool,
    /// Per-document vector normalization.
    pub norm: VectorNorm,
    /// Minimum number of documents a term must appear in to enter the
    /// vocabulary.
    pub min_df: usize,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        TfIdfConfig {
            smooth_idf: true,
            sublinear_tf: false,
            norm: VectorNorm::L2,
            min_df: 1,
        }
    }
}

/// TF-IDF vectorizer over normalized token sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    config: TfIdfConfig,
    /// Vocabulary: term -> feature index, in first-seen document order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
    fitted: bool,
}

impl TfIdfVectorizer {
    /// Create a new unfitted vectorizer with the given configuration.
    pub fn new(config: TfIdfConfig) -> Self {
        TfIdfVectorizer {
            config,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            fitted: false,
        }
    }

    /// Create a new unfitted vectorizer with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TfIdfConfig::default())
    }

    /// Fit the vocabulary and IDF weights on training documents.
    ///
    /// Fitting twice is an error: the vocabulary is fixed for the lifetime of
    /// the pipeline and must never be regrown from evaluation or live data.
    pub fn fit(&mut self, documents: &[Vec<String>]) -> Result<()> {
        if self.fitted {
            return Err(MaydayError::invalid_operation(
                "vectorizer is already fitted; fit must be called at most once per pipeline",
            ));
        }

        self.n_documents = documents.len();

        // Document frequency per term, tracking first-seen order so feature
        // indices are deterministic for a given corpus.
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for doc in documents {
            let mut seen: AHashSet<&str> = AHashSet::new();
            for token in doc {
                if seen.insert(token.as_str()) {
                    match document_frequency.get_mut(token) {
                        Some(count) => *count += 1,
                        None => {
                            document_frequency.insert(token.clone(), 1);
                            first_seen.push(token.clone());
                        }
                    }
                }
            }
        }

        let mut vocabulary = HashMap::new();
        let mut idf = Vec::new();
        let n = self.n_documents as f64;

        for term in first_seen {
            let df = document_frequency[&term];
            if df < self.config.min_df {
                continue;
            }
            let weight = if self.config.smooth_idf {
                ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0
            } else {
                (n / df as f64).ln() + 1.0
            };
            vocabulary.insert(term, vocabulary.len());
            idf.push(weight);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.fitted = true;

        Ok(())
    }

    /// Transform a normalized token sequence into a feature vector.
    ///
    /// Tokens outside the fitted vocabulary contribute nothing; a sequence of
    /// only unseen tokens (or an empty sequence) yields the all-zero vector.
    pub fn transform(&self, tokens: &[String]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(MaydayError::invalid_operation(
                "vectorizer must be fitted before transform",
            ));
        }

        let mut features = vec![0.0; self.vocabulary.len()];
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                features[idx] += 1.0;
            }
        }

        if self.config.sublinear_tf {
            for value in features.iter_mut() {
                if *value > 0.0 {
                    *value = 1.0 + value.ln();
                }
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = match self.config.norm {
            VectorNorm::L1 => features.iter().map(|v| v.abs()).sum::<f64>(),
            VectorNorm::L2 => features.iter().map(|v| v * v).sum::<f64>().sqrt(),
            VectorNorm::None => 0.0,
        };
        if norm > 0.0 {
            for value in features.iter_mut() {
                *value /= norm;
            }
        }

        Ok(features)
    }

    /// Fit on the given documents, then transform each of them.
    pub fn fit_transform(&mut self, documents: &[Vec<String>]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Get the size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check whether the vectorizer has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}
