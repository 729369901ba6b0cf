//! Multi-label classification: one binary classifier per category.
//!
//! Categories are not mutually exclusive: a message may be predicted
//! positive for zero, one, or many categories. Each category's classifier is
//! trained on the same feature matrix but its own label column, and predicts
//! independently of every other category.

use serde::{Deserialize, Serialize};

use crate::error::{MaydayError, Result};
use crate::ml::boost::{BoostConfig, GradientBoostedClassifier};

/// A set of per-category boosted classifiers trained jointly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLabelClassifier {
    categories: Vec<String>,
    estimators: Vec<GradientBoostedClassifier>,
}

impl MultiLabelClassifier {
    /// Train one classifier per category.
    ///
    /// `labels` holds one row per sample with one 0/1 entry per category, in
    /// the order of `categories`.
    pub fn fit(
        config: &BoostConfig,
        categories: &[String],
        features: &[Vec<f64>],
        labels: &[Vec<u8>],
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(MaydayError::model("category label set is empty"));
        }
        if features.len() != labels.len() {
            return Err(MaydayError::model(
                "feature rows and label rows must have equal length",
            ));
        }
        if let Some(row) = labels.iter().find(|row| row.len() != categories.len()) {
            return Err(MaydayError::model(format!(
                "label row has {} entries, expected {} categories",
                row.len(),
                categories.len()
            )));
        }

        let mut estimators = Vec::with_capacity(categories.len());
        for (index, _category) in categories.iter().enumerate() {
            let column: Vec<u8> = labels.iter().map(|row| row[index]).collect();
            let mut estimator = GradientBoostedClassifier::new(config.clone());
            estimator.fit(features, &column)?;
            estimators.push(estimator);
        }

        Ok(MultiLabelClassifier {
            categories: categories.to_vec(),
            estimators,
        })
    }

    /// Predict one 0/1 label per category for a single feature vector.
    pub fn predict(&self, features: &[f64]) -> Vec<u8> {
        self.estimators
            .iter()
            .map(|estimator| estimator.predict(features))
            .collect()
    }

    /// Predict label rows for a batch of feature vectors.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Vec<Vec<u8>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// The ordered category label set.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of categories.
    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn quick_config() -> BoostConfig {
        BoostConfig {
            n_estimators: 20,
            learning_rate: 0.3,
            ..BoostConfig::default()
        }
    }

    #[test]
    fn test_independent_per_category_predictions() {
        // water and urgent co-occur on sample 0: labels are not exclusive
        let features = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
        ];
        let labels = vec![vec![1, 1], vec![1, 1], vec![0, 0], vec![0, 0]];

        let classifier = MultiLabelClassifier::fit(
            &quick_config(),
            &categories(&["water", "urgent"]),
            &features,
            &labels,
        )
        .unwrap();

        let prediction = classifier.predict(&[1.0, 0.0]);
        assert_eq!(prediction, vec![1, 1]);

        let prediction = classifier.predict(&[0.0, 1.0]);
        assert_eq!(prediction, vec![0, 0]);
    }

    #[test]
    fn test_constant_column_among_informative_ones() {
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        // "offer" never occurs; "water" is separable
        let labels = vec![vec![1, 0], vec![0, 0]];

        let classifier = MultiLabelClassifier::fit(
            &quick_config(),
            &categories(&["water", "offer"]),
            &features,
            &labels,
        )
        .unwrap();

        assert_eq!(classifier.predict(&[1.0, 0.0]), vec![1, 0]);
        assert_eq!(classifier.predict(&[0.0, 1.0]), vec![0, 0]);
    }

    #[test]
    fn test_shape_validation() {
        let config = quick_config();
        let features = vec![vec![1.0]];

        assert!(MultiLabelClassifier::fit(&config, &[], &features, &[vec![]]).is_err());
        assert!(
            MultiLabelClassifier::fit(&config, &categories(&["a"]), &features, &[vec![1, 0]])
                .is_err()
        );
        assert!(
            MultiLabelClassifier::fit(&config, &categories(&["a"]), &features, &[]).is_err()
        );
    }

    #[test]
    fn test_batch_prediction_matches_single() {
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec![vec![1], vec![0]];

        let classifier = MultiLabelClassifier::fit(
            &quick_config(),
            &categories(&["water"]),
            &features,
            &labels,
        )
        .unwrap();

        let batch = classifier.predict_batch(&features);
        assert_eq!(batch[0], classifier.predict(&features[0]));
        assert_eq!(batch[1], classifier.predict(&features[1]));
    }
}
