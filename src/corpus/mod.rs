//! The labeled message corpus: loading, validation, and aggregates.

pub mod corpus;
pub mod stats;
pub mod store;

pub use corpus::LabeledCorpus;
pub use stats::{CategoryDistribution, category_distribution, most_frequent_tokens};
pub use store::{CorpusConfig, load_corpus};
