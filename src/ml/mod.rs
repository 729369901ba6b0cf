//! Training, evaluation, and inference for the multi-label message classifier.
//!
//! The pieces compose bottom-up: the [`vectorizer`] turns normalized token
//! sequences into TF-IDF feature vectors, [`tree`] and [`boost`] implement
//! per-category gradient-boosted binary classifiers, [`multilabel`] trains one
//! classifier per category, [`search`] drives hyperparameter selection by
//! cross-validated micro-F1, [`metrics`] computes the evaluation report, and
//! [`pipeline`] bundles the fitted pieces into one persistable artifact.

pub mod boost;
pub mod metrics;
pub mod multilabel;
pub mod pipeline;
pub mod search;
pub mod split;
pub mod tree;
pub mod vectorizer;

pub use boost::{BoostConfig, GradientBoostedClassifier};
pub use metrics::{ClassMetrics, ClassificationReport, micro_f1};
pub use multilabel::MultiLabelClassifier;
pub use pipeline::{AnalyzerKind, ClassificationPipeline, PipelineConfig, Prediction};
pub use search::{GridPoint, GridSearch, GridSearchOutcome, ParamGrid};
pub use split::{KFold, train_test_split};
pub use vectorizer::{TfIdfConfig, TfIdfVectorizer, VectorNorm};
