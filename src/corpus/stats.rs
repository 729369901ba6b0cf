//! Descriptive aggregates over the loaded corpus for the dashboard.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::corpus::corpus::LabeledCorpus;

/// Positive/negative counts for one binary category column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub category: String,
    pub positive: usize,
    pub negative: usize,
}

/// Count positives and negatives for one category; `None` when the corpus
/// has no column of that name.
pub fn category_distribution(corpus: &LabeledCorpus, name: &str) -> Option<CategoryDistribution> {
    let column = corpus.label_column(name)?;
    let positive = column.iter().filter(|&&value| value == 1).count();
    Some(CategoryDistribution {
        category: name.to_string(),
        positive,
        negative: column.len() - positive,
    })
}

/// The `n` most frequent whitespace-separated tokens across raw messages.
///
/// This is a display aggregate over the raw text, deliberately not routed
/// through the classifier's normalizer. Ties break alphabetically so the
/// chart is stable across runs.
pub fn most_frequent_tokens(corpus: &LabeledCorpus, n: usize) -> Vec<(String, usize)> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for message in corpus.messages() {
        for token in message.split_whitespace() {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(token, count)| (token.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
