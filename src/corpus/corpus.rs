//! The in-memory labeled corpus.
//!
//! One immutable table: message strings plus a 0/1 label matrix over a fixed,
//! ordered category set. Loaded once at process start and never mutated.

use serde::{Deserialize, Serialize};

use crate::error::{MaydayError, Result};

/// An ordered collection of labeled messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledCorpus {
    messages: Vec<String>,
    categories: Vec<String>,
    /// One row per message, one 0/1 entry per category.
    labels: Vec<Vec<u8>>,
}

impl LabeledCorpus {
    /// Build a corpus from parts, validating shapes and label values.
    pub fn new(
        messages: Vec<String>,
        categories: Vec<String>,
        labels: Vec<Vec<u8>>,
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(MaydayError::corpus("corpus has no category columns"));
        }
        if messages.len() != labels.len() {
            return Err(MaydayError::corpus(format!(
                "{} messages but {} label rows",
                messages.len(),
                labels.len()
            )));
        }
        for (row_index, row) in labels.iter().enumerate() {
            if row.len() != categories.len() {
                return Err(MaydayError::corpus(format!(
                    "label row {} has {} entries, expected {}",
                    row_index,
                    row.len(),
                    categories.len()
                )));
            }
            if row.iter().any(|&value| value > 1) {
                return Err(MaydayError::corpus(format!(
                    "label row {row_index} contains a non-binary value"
                )));
            }
        }

        Ok(LabeledCorpus {
            messages,
            categories,
            labels,
        })
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the corpus holds zero messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The message strings, in load order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The ordered category label set.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The label matrix, one row per message.
    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    /// Index of a category by name.
    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == name)
    }

    /// The 0/1 label column for one category.
    pub fn label_column(&self, name: &str) -> Option<Vec<u8>> {
        let index = self.category_index(name)?;
        Some(self.labels.iter().map(|row| row[index]).collect())
    }

    /// Select a subset of the corpus by row indices.
    pub fn select(&self, indices: &[usize]) -> (Vec<String>, Vec<Vec<u8>>) {
        let messages = indices.iter().map(|&i| self.messages[i].clone()).collect();
        let labels = indices.iter().map(|&i| self.labels[i].clone()).collect();
        (messages, labels)
    }
}
