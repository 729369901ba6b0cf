//! The message analyzer used for both training and serving.
//!
//! Chain: word tokenization, lowercasing, alphabetic filtering, English stop
//! word removal, noun lemmatization, Porter stemming. The training pipeline
//! and the inference service share this one analyzer; the persisted pipeline
//! records which analyzer produced its vocabulary, so a message can never be
//! normalized differently on the two sides.

use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::alphabetic::AlphabeticFilter;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::word::WordTokenizer;
use crate::error::Result;

/// Analyzer for disaster-response messages.
#[derive(Clone)]
pub struct MessageAnalyzer {
    inner: PipelineAnalyzer,
}

impl MessageAnalyzer {
    pub fn new() -> Self {
        let tokenizer = Arc::new(WordTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AlphabeticFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(LemmaFilter::new()))
            .add_filter(Arc::new(StemFilter::new()))
            .with_name("message".to_string());

        Self { inner: analyzer }
    }
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for MessageAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "message"
    }
}

impl Debug for MessageAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_analyzer() {
        let analyzer = MessageAnalyzer::new();

        let tokens = analyzer
            .normalize("We urgently need water and food supplies!")
            .unwrap();

        // Stop words removed, plurals lemmatized, stems applied
        assert_eq!(tokens, vec!["urgent", "need", "water", "food", "suppli"]);
    }

    #[test]
    fn test_non_alphabetic_dropped() {
        let analyzer = MessageAnalyzer::new();

        let tokens = analyzer.normalize("3 families at km42").unwrap();
        assert_eq!(tokens, vec!["famili"]);
    }

    #[test]
    fn test_empty_message_normalizes_to_empty() {
        let analyzer = MessageAnalyzer::new();

        assert!(analyzer.normalize("").unwrap().is_empty());
        assert!(analyzer.normalize("!!! ... 123").unwrap().is_empty());
    }

    #[test]
    fn test_deterministic() {
        let analyzer = MessageAnalyzer::new();
        let text = "Flooding reported near the eastern bridges";

        assert_eq!(
            analyzer.normalize(text).unwrap(),
            analyzer.normalize(text).unwrap()
        );
    }

    #[test]
    fn test_analyzer_name() {
        assert_eq!(MessageAnalyzer::new().name(), "message");
    }
}
