use crate::tokenizer::{max_frequency, term_frequencies, tokenize};
use std::collections::BTreeMap;

/// A document as ingested: raw text plus the token data derived from it once.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Where the content came from, e.g. the path of the source file.
    pub location: Option<String>,
    tokens: Vec<String>,
    term_freq: BTreeMap<String, u32>,
}

impl Document {
    pub fn new(id: String, title: String, content: String, location: Option<String>) -> Self {
        let tokens = tokenize(&content);
        let term_freq = term_frequencies(&tokens);
        Self { id, title, content, location, tokens, term_freq }
    }

    pub fn tokens(&self) -> &[String] { &self.tokens }

    pub fn term_frequencies(&self) -> &BTreeMap<String, u32> { &self.term_freq }

    pub fn token_count(&self) -> usize { self.tokens.len() }

    /// Count of the most frequent term (1 for a document without tokens).
    pub fn max_frequency(&self) -> u32 { max_frequency(&self.term_freq) }
}
