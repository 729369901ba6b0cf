//! Alphabetic filter implementation.
//!
//! Removes tokens that are not entirely alphabetic: numbers, codes, and
//! tokens with embedded punctuation carry little signal for category
//! classification and would otherwise bloat the vocabulary.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Filter that removes tokens containing any non-alphabetic character.
#[derive(Clone, Debug, Default)]
pub struct AlphabeticFilter;

impl AlphabeticFilter {
    /// Create a new alphabetic filter.
    pub fn new() -> Self {
        AlphabeticFilter
    }
}

impl Filter for AlphabeticFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .filter(|token| !token.is_empty() && token.text.chars().all(char::is_alphabetic))
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphabetic"
    }
}
