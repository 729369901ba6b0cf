//! Noun lemmatization filter.
//!
//! Reduces plural nouns to their dictionary form before stemming: an
//! irregular-form dictionary first, then ordered suffix detachment rules.
//! This mirrors the WordNet-style noun morphology that classic NLP toolkits
//! apply by default, without carrying a full lexicon.
//!
//! # Examples
//!
//! ```
//! use mayday::analysis::token_filter::Filter;
//! use mayday::analysis::token_filter::lemma::LemmaFilter;
//! use mayday::analysis::token::Token;
//!
//! let filter = LemmaFilter::new();
//! let tokens = vec![Token::new("children", 0), Token::new("supplies", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "child");
//! assert_eq!(result[1].text, "supply");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Irregular noun forms that suffix rules cannot reach.
static IRREGULAR_NOUNS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lice", "louse"),
        ("oxen", "ox"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("loaves", "loaf"),
        ("shelves", "shelf"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("selves", "self"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("crises", "crisis"),
        ("analyses", "analysis"),
        ("diagnoses", "diagnosis"),
    ])
});

/// Suffix detachment rules tried in order; the first match wins.
///
/// Ordering matters because there is no lexicon to validate candidates
/// against: longer, more specific suffixes come first.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
];

/// Filter that reduces tokens to their noun lemma.
#[derive(Clone, Debug, Default)]
pub struct LemmaFilter;

impl LemmaFilter {
    /// Create a new lemma filter.
    pub fn new() -> Self {
        LemmaFilter
    }

    /// Lemmatize a single lowercased word.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = IRREGULAR_NOUNS.get(word) {
            return (*lemma).to_string();
        }

        for (suffix, replacement) in DETACHMENT_RULES {
            if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
                let stem = &word[..word.len() - suffix.len()];
                return format!("{stem}{replacement}");
            }
        }

        // Plain plural "s", guarded against words that end in "s" without
        // being plurals (glass, bus, crisis).
        if word.len() > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..word.len() - 1].to_string();
        }

        word.to_string()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .map(|token| {
                let lemma = self.lemmatize(&token.text);
                token.with_text(lemma)
            })
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irregular_nouns() {
        let filter = LemmaFilter::new();
        assert_eq!(filter.lemmatize("children"), "child");
        assert_eq!(filter.lemmatize("people"), "person");
        assert_eq!(filter.lemmatize("knives"), "knife");
    }

    #[test]
    fn test_suffix_rules() {
        let filter = LemmaFilter::new();
        assert_eq!(filter.lemmatize("supplies"), "supply");
        assert_eq!(filter.lemmatize("boxes"), "box");
        assert_eq!(filter.lemmatize("churches"), "church");
        assert_eq!(filter.lemmatize("crashes"), "crash");
        assert_eq!(filter.lemmatize("classes"), "class");
    }

    #[test]
    fn test_plain_plural() {
        let filter = LemmaFilter::new();
        assert_eq!(filter.lemmatize("waters"), "water");
        assert_eq!(filter.lemmatize("roads"), "road");
        assert_eq!(filter.lemmatize("houses"), "house");
    }

    #[test]
    fn test_non_plurals_untouched() {
        let filter = LemmaFilter::new();
        assert_eq!(filter.lemmatize("glass"), "glass");
        assert_eq!(filter.lemmatize("virus"), "virus");
        assert_eq!(filter.lemmatize("crisis"), "crisis");
        assert_eq!(filter.lemmatize("gas"), "gas");
        assert_eq!(filter.lemmatize("water"), "water");
    }

    #[test]
    fn test_filter_transforms_tokens() {
        let filter = LemmaFilter::new();
        let tokens = vec![Token::new("floods", 0), Token::new("men", 1)];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result[0].text, "flood");
        assert_eq!(result[1].text, "man");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LemmaFilter::new().name(), "lemma");
    }
}
