//! The trained classification pipeline and its persisted artifact.
//!
//! A [`ClassificationPipeline`] owns the fitted vectorizer and the
//! per-category classifiers as one unit, created once per training run and
//! read-only afterwards. The artifact also records which analyzer produced
//! the vocabulary, and `load` rebuilds exactly that analyzer, so training and
//! serving normalize messages identically by construction.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, MessageAnalyzer};
use crate::error::{MaydayError, Result};
use crate::ml::boost::BoostConfig;
use crate::ml::multilabel::MultiLabelClassifier;
use crate::ml::vectorizer::{TfIdfConfig, TfIdfVectorizer};

/// Identity of the analyzer baked into a pipeline artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyzerKind {
    /// The full message analyzer (tokenize, lowercase, alphabetic, stop,
    /// lemma, stem); training and serving share this one chain.
    Message,
}

impl AnalyzerKind {
    /// Construct the analyzer this identity names.
    pub fn build(&self) -> Box<dyn Analyzer> {
        match self {
            AnalyzerKind::Message => Box::new(MessageAnalyzer::new()),
        }
    }
}

/// Full configuration of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub analyzer: AnalyzerKind,
    pub tfidf: TfIdfConfig,
    pub boost: BoostConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            analyzer: AnalyzerKind::Message,
            tfidf: TfIdfConfig::default(),
            boost: BoostConfig::default(),
        }
    }
}

/// Per-category 0/1 labels predicted for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    labels: Vec<(String, u8)>,
}

impl Prediction {
    /// Ordered (category, label) pairs.
    pub fn labels(&self) -> &[(String, u8)] {
        &self.labels
    }

    /// Look up the label for one category.
    pub fn get(&self, category: &str) -> Option<u8> {
        self.labels
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, label)| *label)
    }

    /// Categories predicted positive.
    pub fn positive_categories(&self) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|(_, label)| *label == 1)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Serialized form of the pipeline: everything needed to reconstruct it.
#[derive(Serialize, Deserialize)]
struct PipelineArtifact {
    analyzer: AnalyzerKind,
    vectorizer: TfIdfVectorizer,
    classifier: MultiLabelClassifier,
}

/// The fitted vectorizer and per-category classifiers as one unit.
pub struct ClassificationPipeline {
    analyzer_kind: AnalyzerKind,
    analyzer: Box<dyn Analyzer>,
    vectorizer: TfIdfVectorizer,
    classifier: MultiLabelClassifier,
}

impl std::fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("analyzer", &self.analyzer_kind)
            .field("vocabulary_size", &self.vectorizer.vocabulary_size())
            .field("categories", &self.classifier.n_categories())
            .finish()
    }
}

impl ClassificationPipeline {
    /// Train a pipeline on raw messages and their label matrix.
    pub fn fit(
        config: &PipelineConfig,
        messages: &[String],
        categories: &[String],
        labels: &[Vec<u8>],
    ) -> Result<Self> {
        if messages.len() != labels.len() {
            return Err(MaydayError::model(
                "messages and label rows must have equal length",
            ));
        }

        let analyzer = config.analyzer.build();
        let documents = messages
            .iter()
            .map(|message| analyzer.normalize(message))
            .collect::<Result<Vec<_>>>()?;

        let mut vectorizer = TfIdfVectorizer::new(config.tfidf.clone());
        let features = vectorizer.fit_transform(&documents)?;
        let classifier = MultiLabelClassifier::fit(&config.boost, categories, &features, labels)?;

        Ok(ClassificationPipeline {
            analyzer_kind: config.analyzer,
            analyzer,
            vectorizer,
            classifier,
        })
    }

    /// Predict per-category labels for one message.
    ///
    /// Total over all inputs: an empty or unrecognizable message maps to the
    /// all-zero feature vector and receives the classifiers' default labels.
    pub fn predict(&self, message: &str) -> Result<Prediction> {
        let tokens = self.analyzer.normalize(message)?;
        let features = self.vectorizer.transform(&tokens)?;
        let labels = self.classifier.predict(&features);

        Ok(Prediction {
            labels: self
                .classifier
                .categories()
                .iter()
                .cloned()
                .zip(labels)
                .collect(),
        })
    }

    /// Predict label rows for a batch of messages.
    pub fn predict_batch(&self, messages: &[String]) -> Result<Vec<Vec<u8>>> {
        messages
            .iter()
            .map(|message| {
                let tokens = self.analyzer.normalize(message)?;
                let features = self.vectorizer.transform(&tokens)?;
                Ok(self.classifier.predict(&features))
            })
            .collect()
    }

    /// The ordered category label set.
    pub fn categories(&self) -> &[String] {
        self.classifier.categories()
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Serialize the pipeline to a file, overwriting any previous artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let artifact = PipelineArtifact {
            analyzer: self.analyzer_kind,
            vectorizer: self.vectorizer.clone(),
            classifier: self.classifier.clone(),
        };

        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), &artifact)?;
        Ok(())
    }

    /// Load a pipeline from a serialized artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let artifact: PipelineArtifact = bincode::deserialize_from(BufReader::new(file))?;

        Ok(ClassificationPipeline {
            analyzer_kind: artifact.analyzer,
            analyzer: artifact.analyzer.build(),
            vectorizer: artifact.vectorizer,
            classifier: artifact.classifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::boost::BoostConfig;

    fn training_data() -> (Vec<String>, Vec<String>, Vec<Vec<u8>>) {
        let messages: Vec<String> = [
            "we need water urgently",
            "please send drinking water",
            "water supply is gone",
            "children need food",
            "no food since monday",
            "send food rations please",
            "hello how are you",
            "thanks for the update",
            "weather report for today",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect();
        let categories = vec!["water".to_string(), "food".to_string()];
        let labels = vec![
            vec![1, 0],
            vec![1, 0],
            vec![1, 0],
            vec![0, 1],
            vec![0, 1],
            vec![0, 1],
            vec![0, 0],
            vec![0, 0],
            vec![0, 0],
        ];
        (messages, categories, labels)
    }

    fn quick_config() -> PipelineConfig {
        PipelineConfig {
            boost: BoostConfig {
                n_estimators: 30,
                learning_rate: 0.3,
                ..BoostConfig::default()
            },
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let (messages, categories, labels) = training_data();
        let pipeline =
            ClassificationPipeline::fit(&quick_config(), &messages, &categories, &labels).unwrap();

        let prediction = pipeline.predict("we need water urgently").unwrap();
        assert_eq!(prediction.get("water"), Some(1));
    }

    #[test]
    fn test_empty_message_predicts_defaults() {
        let (messages, categories, labels) = training_data();
        let pipeline =
            ClassificationPipeline::fit(&quick_config(), &messages, &categories, &labels).unwrap();

        let prediction = pipeline.predict("").unwrap();
        assert_eq!(prediction.labels().len(), 2);
        // No evidence in the features: the majority-negative prior wins
        assert_eq!(prediction.get("water"), Some(0));
        assert_eq!(prediction.get("food"), Some(0));
    }

    #[test]
    fn test_out_of_vocabulary_message_is_total() {
        let (messages, categories, labels) = training_data();
        let pipeline =
            ClassificationPipeline::fit(&quick_config(), &messages, &categories, &labels).unwrap();

        let prediction = pipeline.predict("xylophone quartz").unwrap();
        assert_eq!(prediction.labels().len(), 2);
    }

    #[test]
    fn test_round_trip_preserves_predictions() {
        let (messages, categories, labels) = training_data();
        let pipeline =
            ClassificationPipeline::fit(&quick_config(), &messages, &categories, &labels).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.bin");
        pipeline.save(&path).unwrap();

        let restored = ClassificationPipeline::load(&path).unwrap();
        assert_eq!(restored.categories(), pipeline.categories());

        for message in ["we need water urgently", "children need food", "", "hello"] {
            assert_eq!(
                pipeline.predict(message).unwrap(),
                restored.predict(message).unwrap()
            );
        }
    }

    #[test]
    fn test_positive_categories() {
        let (messages, categories, labels) = training_data();
        let pipeline =
            ClassificationPipeline::fit(&quick_config(), &messages, &categories, &labels).unwrap();

        let prediction = pipeline.predict("please send drinking water").unwrap();
        assert!(prediction.positive_categories().contains(&"water"));
    }
}
