//! Embedder trait and the keyword heuristic implementation

use std::collections::HashSet;
use std::fmt::Debug;

use super::{Embedding, EMBEDDING_DIMENSIONS};

/// Trait for turning text into an embedding
///
/// Implementations must be deterministic and total: every string,
/// including the empty one, yields a valid embedding.
pub trait Embedder: Send + Sync + Debug {
    /// Embed the given text
    fn embed(&self, text: &str) -> Embedding;

    /// Get the embedder name
    fn name(&self) -> &'static str;
}

/// One dimension of the keyword heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordRule {
    /// Tokens that switch the dimension to its high magnitude
    pub keywords: &'static [&'static str],
    pub high: f64,
    pub low: f64,
}

impl KeywordRule {
    fn score(&self, tokens: &HashSet<String>) -> f64 {
        if self.keywords.iter().any(|k| tokens.contains(*k)) {
            self.high
        } else {
            self.low
        }
    }
}

const DEFAULT_RULES: [KeywordRule; EMBEDDING_DIMENSIONS] = [
    KeywordRule {
        keywords: &["pwa", "app"],
        high: 0.8,
        low: 0.3,
    },
    KeywordRule {
        keywords: &["cache", "semantic"],
        high: 0.85,
        low: 0.4,
    },
    KeywordRule {
        keywords: &["vector", "search"],
        high: 0.75,
        low: 0.35,
    },
    KeywordRule {
        keywords: &["design", "glass"],
        high: 0.7,
        low: 0.45,
    },
];

/// Keyword-presence embedder
///
/// Lowercases the input, splits it on whitespace and tests each
/// dimension's keyword set against the resulting tokens. Punctuation is
/// kept, so "pwa?" does not match "pwa".
#[derive(Debug, Clone)]
pub struct KeywordEmbedder {
    rules: [KeywordRule; EMBEDDING_DIMENSIONS],
}

impl Default for KeywordEmbedder {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }
}

impl KeywordEmbedder {
    /// Create an embedder with the default keyword rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an embedder with custom rules
    pub fn with_rules(rules: [KeywordRule; EMBEDDING_DIMENSIONS]) -> Self {
        Self { rules }
    }

    /// Get the rules in dimension order
    pub fn rules(&self) -> &[KeywordRule; EMBEDDING_DIMENSIONS] {
        &self.rules
    }

    fn tokenize(text: &str) -> HashSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Embedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> Embedding {
        let tokens = Self::tokenize(text);
        Embedding::new(self.rules.map(|rule| rule.score(&tokens)))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_all_low() {
        let embedder = KeywordEmbedder::new();

        let embedding = embedder.embed("");

        assert_eq!(embedding.values(), &[0.3, 0.4, 0.35, 0.45]);
    }

    #[test]
    fn test_keywords_switch_dimensions_high() {
        let embedder = KeywordEmbedder::new();

        assert_eq!(
            embedder.embed("pwa best practices").values(),
            &[0.8, 0.4, 0.35, 0.45]
        );
        assert_eq!(
            embedder.embed("semantic vector search").values(),
            &[0.3, 0.85, 0.75, 0.45]
        );
        assert_eq!(
            embedder.embed("glass design for my app").values(),
            &[0.8, 0.4, 0.35, 0.7]
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let embedder = KeywordEmbedder::new();

        assert_eq!(embedder.embed("Semantic CACHE"), embedder.embed("semantic cache"));
    }

    #[test]
    fn test_punctuation_prevents_match() {
        let embedder = KeywordEmbedder::new();

        let embedding = embedder.embed("how to build a pwa?");

        assert_eq!(embedding.values()[0], 0.3);
    }

    #[test]
    fn test_irregular_whitespace() {
        let embedder = KeywordEmbedder::new();

        let embedding = embedder.embed("  vector\t\tsearch\n");

        assert_eq!(embedding.values(), &[0.3, 0.4, 0.75, 0.45]);
    }

    #[test]
    fn test_custom_rules() {
        let rule = KeywordRule {
            keywords: &["rust"],
            high: 1.0,
            low: 0.0,
        };
        let embedder = KeywordEmbedder::with_rules([rule; EMBEDDING_DIMENSIONS]);

        assert_eq!(embedder.embed("rust").values(), &[1.0; EMBEDDING_DIMENSIONS]);
        assert_eq!(embedder.embed("go").norm(), 0.0);
    }
}
