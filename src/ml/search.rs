//! Hyperparameter grid search with k-fold cross-validation.
//!
//! Every configuration in the declared grid is evaluated with the same seeded
//! folds; each fold fits a fresh vectorizer and classifier on the training
//! folds only, so no information leaks from the held-out fold. Configurations
//! are independent and evaluate in parallel across the rayon pool; results
//! collect into one table and reduce by arg-max mean micro-F1, with ties
//! broken by enumeration order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MaydayError, Result};
use crate::ml::boost::BoostConfig;
use crate::ml::metrics::micro_f1;
use crate::ml::multilabel::MultiLabelClassifier;
use crate::ml::split::KFold;
use crate::ml::vectorizer::{TfIdfConfig, TfIdfVectorizer};

/// Declared value lists for the tunable classifier hyperparameters.
///
/// The default grid mirrors the production training job: 2 ensemble sizes ×
/// 3 depths × 3 learning rates = 18 configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamGrid {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<usize>,
    pub learning_rate: Vec<f64>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        ParamGrid {
            n_estimators: vec![50, 100],
            max_depth: vec![3, 5, 7],
            learning_rate: vec![0.01, 0.1, 0.2],
        }
    }
}

impl ParamGrid {
    /// Enumerate every configuration, in nested declaration order
    /// (`n_estimators` outermost, `learning_rate` innermost).
    pub fn configurations(&self) -> Vec<BoostConfig> {
        let mut configs = Vec::new();
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &learning_rate in &self.learning_rate {
                    configs.push(BoostConfig {
                        n_estimators,
                        max_depth,
                        learning_rate,
                        ..BoostConfig::default()
                    });
                }
            }
        }
        configs
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.n_estimators.len() * self.max_depth.len() * self.learning_rate.len()
    }

    /// Check whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One evaluated grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridPoint {
    pub config: BoostConfig,
    /// Micro-F1 per fold, in fold order.
    pub fold_scores: Vec<f64>,
    /// Mean of the fold scores.
    pub mean_score: f64,
}

/// The full evaluation table plus the selected configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSearchOutcome {
    /// One entry per grid configuration, in enumeration order.
    pub evaluations: Vec<GridPoint>,
    /// Index into `evaluations` of the best-scoring configuration.
    pub best_index: usize,
}

impl GridSearchOutcome {
    /// The winning grid point.
    pub fn best(&self) -> &GridPoint {
        &self.evaluations[self.best_index]
    }
}

/// Exhaustive grid search driver.
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: ParamGrid,
    folds: usize,
    seed: u64,
}

impl GridSearch {
    /// Create a driver for the given grid, fold count, and split seed.
    pub fn new(grid: ParamGrid, folds: usize, seed: u64) -> Self {
        GridSearch { grid, folds, seed }
    }

    /// Evaluate the whole grid on normalized training documents and select
    /// the best configuration.
    ///
    /// `documents` and `labels` must be the training split only; the
    /// held-out evaluation split never enters cross-validation.
    pub fn run(
        &self,
        tfidf: &TfIdfConfig,
        categories: &[String],
        documents: &[Vec<String>],
        labels: &[Vec<u8>],
    ) -> Result<GridSearchOutcome> {
        if documents.len() != labels.len() {
            return Err(MaydayError::model(
                "documents and label rows must have equal length",
            ));
        }
        let configs = self.grid.configurations();
        if configs.is_empty() {
            return Err(MaydayError::invalid_operation("hyperparameter grid is empty"));
        }

        let folds = KFold::new(self.folds, self.seed)?.split(documents.len())?;

        let evaluations: Vec<GridPoint> = configs
            .into_par_iter()
            .map(|config| {
                let fold_scores = folds
                    .iter()
                    .map(|(train_idx, test_idx)| {
                        Self::fit_and_score(
                            tfidf, &config, categories, documents, labels, train_idx, test_idx,
                        )
                    })
                    .collect::<Result<Vec<f64>>>()?;

                let mean_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
                debug!(
                    config = %config.describe(),
                    mean_score,
                    "evaluated grid configuration"
                );

                Ok(GridPoint {
                    config,
                    fold_scores,
                    mean_score,
                })
            })
            .collect::<Result<Vec<GridPoint>>>()?;

        // Arg-max with strict comparison: ties keep the earliest enumerated
        // configuration.
        let mut best_index = 0;
        for (index, point) in evaluations.iter().enumerate() {
            if point.mean_score > evaluations[best_index].mean_score {
                best_index = index;
            }
        }

        Ok(GridSearchOutcome {
            evaluations,
            best_index,
        })
    }

    /// One cross-validation cell: fit a fresh pipeline on the training fold,
    /// score micro-F1 on the held-out fold.
    #[allow(clippy::too_many_arguments)]
    fn fit_and_score(
        tfidf: &TfIdfConfig,
        config: &BoostConfig,
        categories: &[String],
        documents: &[Vec<String>],
        labels: &[Vec<u8>],
        train_idx: &[usize],
        test_idx: &[usize],
    ) -> Result<f64> {
        let train_docs: Vec<Vec<String>> =
            train_idx.iter().map(|&i| documents[i].clone()).collect();
        let train_labels: Vec<Vec<u8>> = train_idx.iter().map(|&i| labels[i].clone()).collect();

        let mut vectorizer = TfIdfVectorizer::new(tfidf.clone());
        let x_train = vectorizer.fit_transform(&train_docs)?;
        let classifier = MultiLabelClassifier::fit(config, categories, &x_train, &train_labels)?;

        let x_test = test_idx
            .iter()
            .map(|&i| vectorizer.transform(&documents[i]))
            .collect::<Result<Vec<_>>>()?;
        let y_test: Vec<Vec<u8>> = test_idx.iter().map(|&i| labels[i].clone()).collect();
        let y_pred = classifier.predict_batch(&x_test);

        Ok(micro_f1(&y_test, &y_pred))
    }
}
