//! Gradient-boosted binary classifier.
//!
//! Logistic boosting over [`RegressionTree`]s: the model starts from the
//! smoothed prior log-odds, then each round fits a tree to the logistic
//! gradients and adds it with shrinkage. Rounds stop early once gradients
//! vanish, which is what happens immediately for near-constant label columns;
//! those degrade to (near-)trivial always-negative predictors instead of
//! failing.

use serde::{Deserialize, Serialize};

use crate::error::{MaydayError, Result};
use crate::ml::tree::{RegressionTree, TreeParams};

/// Hyperparameters of one boosted classifier.
///
/// Every tunable is enumerated here; nothing is left to implicit defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Maximum number of boosting rounds (trees).
    pub n_estimators: usize,
    /// Shrinkage applied to each tree's contribution.
    pub learning_rate: f64,
    /// Maximum depth of each tree.
    pub max_depth: usize,
    /// Minimum samples required to split a tree node.
    pub min_samples_split: usize,
    /// L2 regularization on leaf values.
    pub l2_regularization: f64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        BoostConfig {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_split: 2,
            l2_regularization: 1.0,
        }
    }
}

impl BoostConfig {
    /// Compact human-readable form for reports and logs.
    pub fn describe(&self) -> String {
        format!(
            "n_estimators={}, max_depth={}, learning_rate={}",
            self.n_estimators, self.max_depth, self.learning_rate
        )
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            l2_regularization: self.l2_regularization,
        }
    }
}

/// Gradients below this mean magnitude end the boosting loop.
const GRADIENT_TOLERANCE: f64 = 1e-4;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A binary classifier trained by gradient boosting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedClassifier {
    config: BoostConfig,
    base_score: f64,
    trees: Vec<RegressionTree>,
    fitted: bool,
}

impl GradientBoostedClassifier {
    /// Create a new untrained classifier.
    pub fn new(config: BoostConfig) -> Self {
        GradientBoostedClassifier {
            config,
            base_score: 0.0,
            trees: Vec::new(),
            fitted: false,
        }
    }

    /// Train on feature vectors and 0/1 labels.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()> {
        if features.len() != labels.len() {
            return Err(MaydayError::model(
                "features and labels must have equal length",
            ));
        }
        if features.is_empty() {
            return Err(MaydayError::model("cannot train on an empty sample set"));
        }
        if labels.iter().any(|&label| label > 1) {
            return Err(MaydayError::model("labels must be 0 or 1"));
        }

        let n = labels.len() as f64;
        let positives = labels.iter().filter(|&&label| label == 1).count() as f64;
        let negatives = n - positives;

        // Smoothed prior log-odds; finite even for constant label columns.
        self.base_score = ((positives + 0.5) / (negatives + 0.5)).ln();
        self.trees = Vec::with_capacity(self.config.n_estimators);

        let params = self.config.tree_params();
        let mut scores = vec![self.base_score; labels.len()];
        let mut gradients = vec![0.0; labels.len()];
        let mut hessians = vec![0.0; labels.len()];

        for _round in 0..self.config.n_estimators {
            for (i, &label) in labels.iter().enumerate() {
                let p = sigmoid(scores[i]);
                gradients[i] = label as f64 - p;
                hessians[i] = (p * (1.0 - p)).max(1e-12);
            }

            let mean_gradient =
                gradients.iter().map(|g| g.abs()).sum::<f64>() / gradients.len() as f64;
            if mean_gradient < GRADIENT_TOLERANCE {
                break;
            }

            let tree = RegressionTree::fit(features, &gradients, &hessians, &params)?;
            for (i, row) in features.iter().enumerate() {
                scores[i] += self.config.learning_rate * tree.predict(row);
            }
            self.trees.push(tree);
        }

        self.fitted = true;
        Ok(())
    }

    /// Raw additive score (log-odds) for one feature vector.
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        let mut score = self.base_score;
        for tree in &self.trees {
            score += self.config.learning_rate * tree.predict(features);
        }
        score
    }

    /// Predicted probability of the positive class.
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        sigmoid(self.decision_function(features))
    }

    /// Predicted 0/1 label. Ties at probability 0.5 resolve to the negative
    /// class.
    pub fn predict(&self, features: &[f64]) -> u8 {
        u8::from(self.predict_proba(features) > 0.5)
    }

    /// Check whether the classifier has been trained.
    pub fn is_trained(&self) -> bool {
        self.fitted
    }

    /// Number of trees actually grown (early stopping may keep this below
    /// `n_estimators`).
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// The configuration this classifier was built with.
    pub fn config(&self) -> &BoostConfig {
        &self.config
    }
}
