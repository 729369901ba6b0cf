//! Seeded data splitting: train/test holdout and k-fold cross-validation.
//!
//! Both splits shuffle with a seeded RNG, so a fixed seed gives identical
//! partitions across runs; this is the determinism contract of the search driver.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{MaydayError, Result};

/// Split `n_samples` indices into shuffled (train, test) index sets.
///
/// `test_size` is the fraction of samples held out, in `(0, 1)`.
pub fn train_test_split(
    n_samples: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(MaydayError::invalid_operation(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    if n_samples < 2 {
        return Err(MaydayError::invalid_operation(
            "need at least two samples to split",
        ));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_samples as f64) * test_size).round() as usize;
    let n_test = n_test.clamp(1, n_samples - 1);

    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok((train, test))
}

/// Seeded k-fold splitter.
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    seed: u64,
}

impl KFold {
    /// Create a k-fold splitter with at least two folds.
    pub fn new(n_splits: usize, seed: u64) -> Result<Self> {
        if n_splits < 2 {
            return Err(MaydayError::invalid_operation(
                "cross-validation requires at least two folds",
            ));
        }
        Ok(KFold { n_splits, seed })
    }

    /// Number of folds.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Produce the (train, test) index pairs, one per fold.
    ///
    /// Fold sizes differ by at most one; every index appears in exactly one
    /// test fold.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if n_samples < self.n_splits {
            return Err(MaydayError::invalid_operation(format!(
                "cannot split {n_samples} samples into {} folds",
                self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let base = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < remainder);
            folds.push(indices[start..start + size].to_vec());
            start += size;
        }

        Ok((0..self.n_splits)
            .map(|fold| {
                let test = folds[fold].clone();
                let train = folds
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != fold)
                    .flat_map(|(_, f)| f.iter().copied())
                    .collect();
                (train, test)
            })
            .collect())
    }
}
