//! Word-boundary tokenizer.
//!
//! Splits text using Unicode word boundary rules (UAX #29), which gives the
//! same segmentation for a message at training time and at serving time,
//! including consistent handling of punctuation and contractions, the single
//! most important invariant of the normalizer.
//!
//! # Examples
//!
//! ```
//! use mayday::analysis::tokenizer::Tokenizer;
//! use mayday::analysis::tokenizer::word::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Need water, please!").unwrap().collect();
//!
//! // Punctuation and whitespace are filtered out
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "Need");
//! assert_eq!(tokens[1].text, "water");
//! assert_eq!(tokens[2].text, "please");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// Segments that contain no alphanumeric character (whitespace runs,
/// punctuation) are dropped; everything else becomes a token carrying its
/// byte offsets in the original text.
#[derive(Clone, Debug, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for (start_offset, word) in text.split_word_bound_indices() {
            if word.chars().any(|c| c.is_alphanumeric()) {
                let position = tokens.len();
                let end_offset = start_offset + word.len();
                tokens.push(Token::with_offsets(word, position, start_offset, end_offset));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello, world!").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
    }

    #[test]
    fn test_offsets() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("we need food").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, "food");
        assert_eq!(tokens[2].start_offset, 8);
        assert_eq!(tokens[2].end_offset, 12);
    }

    #[test]
    fn test_contractions_stay_whole() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("we can't reach town").unwrap().collect();

        // UAX #29 keeps the contraction as a single segment
        assert_eq!(tokens[1].text, "can't");
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("").unwrap().collect();
        assert!(tokens.is_empty());

        let tokens: Vec<Token> = tokenizer.tokenize("... !!! ---").unwrap().collect();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WordTokenizer::new().name(), "word");
    }
}
