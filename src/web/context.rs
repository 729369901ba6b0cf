//! Application context: everything a request handler may read.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::corpus::corpus::LabeledCorpus;
use crate::corpus::store::{CorpusConfig, load_corpus};
use crate::error::Result;
use crate::ml::pipeline::ClassificationPipeline;

/// Immutable application state, built once at process start.
pub struct AppContext {
    corpus: LabeledCorpus,
    pipeline: ClassificationPipeline,
}

impl AppContext {
    /// Assemble a context from already-loaded parts.
    pub fn new(corpus: LabeledCorpus, pipeline: ClassificationPipeline) -> Self {
        AppContext { corpus, pipeline }
    }

    /// Startup routine: load the corpus and the pipeline artifact.
    pub fn initialize(
        database: &Path,
        corpus_config: &CorpusConfig,
        model: &Path,
    ) -> Result<Arc<Self>> {
        let corpus = load_corpus(database, corpus_config)?;
        let pipeline = ClassificationPipeline::load(model)?;
        info!(
            categories = pipeline.categories().len(),
            vocabulary = pipeline.vocabulary_size(),
            "loaded classification pipeline"
        );

        Ok(Arc::new(AppContext::new(corpus, pipeline)))
    }

    /// The loaded corpus.
    pub fn corpus(&self) -> &LabeledCorpus {
        &self.corpus
    }

    /// The loaded classification pipeline.
    pub fn pipeline(&self) -> &ClassificationPipeline {
        &self.pipeline
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("corpus_rows", &self.corpus.len())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}
