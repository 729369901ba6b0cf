//! # Mayday
//!
//! A multi-label triage classifier for disaster-response messages.
//!
//! ## Features
//!
//! - Pure Rust text analysis pipeline (tokenization, stop words, lemmatization, stemming)
//! - TF-IDF feature extraction with an explicit, pinned configuration
//! - Per-category gradient-boosted classifiers trained jointly
//! - Grid search with k-fold cross-validation, parallelized across the grid
//! - Per-category evaluation reporting
//! - HTTP dashboard and inference service over a persisted pipeline artifact

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod ml;
pub mod web;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
