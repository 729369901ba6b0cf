//! Regression tree fit to boosting gradients.
//!
//! Each boosting round fits one of these trees to the current gradient and
//! hessian statistics. Split quality is the Newton gain and leaf values are
//! the regularized Newton step, so the tree slots directly into logistic
//! boosting.

use serde::{Deserialize, Serialize};

use crate::error::{MaydayError, Result};

/// Parameters controlling a single tree fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum tree depth; depth 0 is a single leaf.
    pub max_depth: usize,
    /// Minimum number of samples required to attempt a split.
    pub min_samples_split: usize,
    /// L2 regularization added to the hessian sum in leaf values and gains.
    pub l2_regularization: f64,
}

/// A fitted regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    root: TreeNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Best split found for one node, if any.
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl RegressionTree {
    /// Fit a tree to per-sample gradients and hessians.
    pub fn fit(
        features: &[Vec<f64>],
        gradients: &[f64],
        hessians: &[f64],
        params: &TreeParams,
    ) -> Result<Self> {
        if features.len() != gradients.len() || gradients.len() != hessians.len() {
            return Err(MaydayError::model(
                "features, gradients, and hessians must have equal length",
            ));
        }
        if features.is_empty() {
            return Err(MaydayError::model("cannot fit a tree on zero samples"));
        }

        let indices: Vec<usize> = (0..features.len()).collect();
        let root = Self::build_node(features, gradients, hessians, &indices, 0, params);

        Ok(RegressionTree { root })
    }

    /// Predict the tree output for one feature vector.
    ///
    /// Features beyond the vector's length read as 0.0, so a shorter vector
    /// (e.g. from an empty vocabulary) routes deterministically.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    fn leaf_value(gradients: &[f64], hessians: &[f64], indices: &[usize], lambda: f64) -> f64 {
        let grad_sum: f64 = indices.iter().map(|&i| gradients[i]).sum();
        let hess_sum: f64 = indices.iter().map(|&i| hessians[i]).sum();
        grad_sum / (hess_sum + lambda)
    }

    fn build_node(
        features: &[Vec<f64>],
        gradients: &[f64],
        hessians: &[f64],
        indices: &[usize],
        depth: usize,
        params: &TreeParams,
    ) -> TreeNode {
        if depth >= params.max_depth || indices.len() < params.min_samples_split {
            return TreeNode::Leaf {
                value: Self::leaf_value(gradients, hessians, indices, params.l2_regularization),
            };
        }

        let Some(split) = Self::best_split(features, gradients, hessians, indices, params) else {
            return TreeNode::Leaf {
                value: Self::leaf_value(gradients, hessians, indices, params.l2_regularization),
            };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| features[i][split.feature] <= split.threshold);

        let left = Self::build_node(features, gradients, hessians, &left_indices, depth + 1, params);
        let right =
            Self::build_node(features, gradients, hessians, &right_indices, depth + 1, params);

        TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Exhaustive split search: every feature, thresholds at midpoints of
    /// adjacent distinct values. Features are scanned in index order and the
    /// comparison is strict, so ties resolve to the first candidate seen.
    fn best_split(
        features: &[Vec<f64>],
        gradients: &[f64],
        hessians: &[f64],
        indices: &[usize],
        params: &TreeParams,
    ) -> Option<SplitCandidate> {
        let n_features = features[indices[0]].len();
        let lambda = params.l2_regularization;

        let total_grad: f64 = indices.iter().map(|&i| gradients[i]).sum();
        let total_hess: f64 = indices.iter().map(|&i| hessians[i]).sum();
        let base_score = total_grad * total_grad / (total_hess + lambda);

        let mut best: Option<SplitCandidate> = None;

        for feature in 0..n_features {
            let mut ordered: Vec<usize> = indices.to_vec();
            ordered.sort_by(|&a, &b| {
                features[a][feature]
                    .partial_cmp(&features[b][feature])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut left_grad = 0.0;
            let mut left_hess = 0.0;

            for window in 0..ordered.len() - 1 {
                let i = ordered[window];
                left_grad += gradients[i];
                left_hess += hessians[i];

                let current = features[i][feature];
                let next = features[ordered[window + 1]][feature];
                if current == next {
                    continue;
                }

                let right_grad = total_grad - left_grad;
                let right_hess = total_hess - left_hess;
                let gain = left_grad * left_grad / (left_hess + lambda)
                    + right_grad * right_grad / (right_hess + lambda)
                    - base_score;

                if gain > 1e-12 && best.as_ref().is_none_or(|b| gain > b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: (current + next) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 3,
            min_samples_split: 2,
            l2_regularization: 1.0,
        }
    }

    #[test]
    fn test_single_leaf_when_no_split_helps() {
        // Identical gradients: no split can improve the Newton objective
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let gradients = vec![0.5, 0.5];
        let hessians = vec![0.25, 0.25];

        let tree = RegressionTree::fit(&features, &gradients, &hessians, &params()).unwrap();
        let a = tree.predict(&[1.0, 0.0]);
        let b = tree.predict(&[0.0, 1.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_separating_split() {
        // Feature 0 perfectly separates positive and negative gradients
        let features = vec![
            vec![1.0, 0.3],
            vec![0.9, 0.1],
            vec![0.0, 0.2],
            vec![0.1, 0.4],
        ];
        let gradients = vec![0.5, 0.5, -0.5, -0.5];
        let hessians = vec![0.25; 4];

        let tree = RegressionTree::fit(&features, &gradients, &hessians, &params()).unwrap();

        assert!(tree.predict(&[1.0, 0.0]) > 0.0);
        assert!(tree.predict(&[0.0, 0.0]) < 0.0);
    }

    #[test]
    fn test_depth_zero_is_constant() {
        let shallow = TreeParams {
            max_depth: 0,
            ..params()
        };
        let features = vec![vec![1.0], vec![0.0]];
        let gradients = vec![0.5, -0.5];
        let hessians = vec![0.25, 0.25];

        let tree = RegressionTree::fit(&features, &gradients, &hessians, &shallow).unwrap();
        assert_eq!(tree.predict(&[1.0]), tree.predict(&[0.0]));
    }

    #[test]
    fn test_zero_width_features() {
        // Empty vocabulary: every sample has a zero-length feature vector
        let features = vec![vec![], vec![]];
        let gradients = vec![-0.2, -0.2];
        let hessians = vec![0.2, 0.2];

        let tree = RegressionTree::fit(&features, &gradients, &hessians, &params()).unwrap();
        assert!(tree.predict(&[]) < 0.0);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let features = vec![vec![1.0]];
        assert!(RegressionTree::fit(&features, &[0.1, 0.2], &[0.1], &params()).is_err());
    }
}
