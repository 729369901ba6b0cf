//! Classification metrics and the per-category evaluation report.
//!
//! Per-category precision, recall, F1, and support feed the human-readable
//! report; micro-averaged F1 pools true/false positives and negatives across
//! all categories and is the grid search's selection score. Undefined ratios
//! (zero denominators) evaluate to 0.0 rather than NaN, so degenerate
//! categories surface as near-zero rows instead of poisoning the report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Positive-class metrics for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true positive-class examples.
    pub support: usize,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Compute positive-class precision/recall/F1 for one category.
pub fn binary_metrics(y_true: &[u8], y_pred: &[u8]) -> ClassMetrics {
    debug_assert_eq!(y_true.len(), y_pred.len());

    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut fn_ = 0.0;
    let mut support = 0;

    for (&truth, &pred) in y_true.iter().zip(y_pred.iter()) {
        if truth == 1 {
            support += 1;
        }
        match (truth, pred) {
            (1, 1) => tp += 1.0,
            (0, 1) => fp += 1.0,
            (1, 0) => fn_ += 1.0,
            _ => {}
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = ratio(2.0 * precision * recall, precision + recall);

    ClassMetrics {
        precision,
        recall,
        f1,
        support,
    }
}

/// Micro-averaged F1 over label-matrix rows.
///
/// Counts are pooled across every (sample, category) cell before computing
/// precision and recall.
pub fn micro_f1(y_true: &[Vec<u8>], y_pred: &[Vec<u8>]) -> f64 {
    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut fn_ = 0.0;

    for (truth_row, pred_row) in y_true.iter().zip(y_pred.iter()) {
        for (&truth, &pred) in truth_row.iter().zip(pred_row.iter()) {
            match (truth, pred) {
                (1, 1) => tp += 1.0,
                (0, 1) => fp += 1.0,
                (1, 0) => fn_ += 1.0,
                _ => {}
            }
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    ratio(2.0 * precision * recall, precision + recall)
}

/// Human-readable per-category evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    rows: Vec<(String, ClassMetrics)>,
}

impl ClassificationReport {
    /// Build a report from true and predicted label-matrix rows.
    pub fn new(categories: &[String], y_true: &[Vec<u8>], y_pred: &[Vec<u8>]) -> Self {
        let rows = categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let truth: Vec<u8> = y_true.iter().map(|row| row[index]).collect();
                let pred: Vec<u8> = y_pred.iter().map(|row| row[index]).collect();
                (category.clone(), binary_metrics(&truth, &pred))
            })
            .collect();

        ClassificationReport { rows }
    }

    /// Per-category rows in category order.
    pub fn rows(&self) -> &[(String, ClassMetrics)] {
        &self.rows
    }

    /// Look up the metrics for one category.
    pub fn metrics(&self, category: &str) -> Option<&ClassMetrics> {
        self.rows
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, metrics)| metrics)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>9} {:>9} {:>9} {:>9}",
            "category", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (category, metrics) in &self.rows {
            writeln!(
                f,
                "{:<24} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                category, metrics.precision, metrics.recall, metrics.f1, metrics.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_metrics_perfect() {
        let metrics = binary_metrics(&[1, 0, 1, 0], &[1, 0, 1, 0]);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 1.0);
        assert_eq!(metrics.f1, 1.0);
        assert_eq!(metrics.support, 2);
    }

    #[test]
    fn test_binary_metrics_mixed() {
        // One true positive, one false positive, one false negative
        let metrics = binary_metrics(&[1, 0, 1, 0], &[1, 1, 0, 0]);
        assert!((metrics.precision - 0.5).abs() < 1e-12);
        assert!((metrics.recall - 0.5).abs() < 1e-12);
        assert!((metrics.f1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_division_yields_zero() {
        // No positives anywhere: precision/recall/F1 all defined as 0.0
        let metrics = binary_metrics(&[0, 0, 0], &[0, 0, 0]);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1, 0.0);
        assert_eq!(metrics.support, 0);
    }

    #[test]
    fn test_micro_f1_pools_counts() {
        let y_true = vec![vec![1, 0], vec![0, 1]];
        let y_pred = vec![vec![1, 0], vec![0, 0]];

        // Pooled counts: tp=1, fp=0, fn=1 -> precision 1.0, recall 0.5
        let score = micro_f1(&y_true, &y_pred);
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_micro_f1_empty_is_zero() {
        assert_eq!(micro_f1(&[], &[]), 0.0);
    }

    #[test]
    fn test_report_rows_and_lookup() {
        let categories = vec!["water".to_string(), "offer".to_string()];
        let y_true = vec![vec![1, 0], vec![0, 0]];
        let y_pred = vec![vec![1, 0], vec![0, 0]];

        let report = ClassificationReport::new(&categories, &y_true, &y_pred);
        assert_eq!(report.rows().len(), 2);
        assert_eq!(report.metrics("water").unwrap().f1, 1.0);
        // Degenerate category stays visible with zero support
        assert_eq!(report.metrics("offer").unwrap().support, 0);

        let rendered = report.to_string();
        assert!(rendered.contains("water"));
        assert!(rendered.contains("precision"));
    }
}
