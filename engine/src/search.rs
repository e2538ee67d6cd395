use crate::document::Document;
use crate::index::BuiltIndex;
use crate::tokenizer::{term_frequencies, tokenize};
use crate::vector::{cosine_similarity, TermVector};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
    pub title: String,
}

/// Query-side view of a built index. Obtainable only from [`crate::Index::searcher`],
/// so it always matches the documents it was built from.
#[derive(Clone, Copy)]
pub struct Searcher<'a> {
    documents: &'a [Document],
    slots: &'a HashMap<String, usize>,
    built: &'a BuiltIndex,
}

impl<'a> Searcher<'a> {
    pub(crate) fn new(
        documents: &'a [Document],
        slots: &'a HashMap<String, usize>,
        built: &'a BuiltIndex,
    ) -> Self {
        Self { documents, slots, built }
    }

    pub fn idf(&self, term: &str) -> Option<f64> { self.built.idf.get(term).copied() }

    pub fn document_vector(&self, id: &str) -> Option<&'a TermVector> {
        self.slots.get(id).map(|&slot| &self.built.vectors[slot])
    }

    /// Sparse query vector; out-of-vocabulary terms are dropped.
    pub fn query_vector(&self, query: &str) -> TermVector {
        let tokens = tokenize(query);
        TermVector::weighted(&term_frequencies(&tokens), |t| self.idf(t))
    }

    /// Top `top_k` documents with a strictly positive cosine similarity, best
    /// first. Equal scores keep insertion order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query_vector = self.query_vector(query);
        if query_vector.is_empty() {
            tracing::debug!(query, "no query terms in vocabulary");
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .built
            .vectors
            .iter()
            .enumerate()
            .map(|(slot, doc_vector)| (slot, cosine_similarity(&query_vector, doc_vector)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        tracing::debug!(query, total_hits = scored.len(), top_k, "search");

        scored
            .into_iter()
            .take(top_k)
            .map(|(slot, score)| {
                let doc = &self.documents[slot];
                SearchHit { doc_id: doc.id.clone(), score, title: doc.title.clone() }
            })
            .collect()
    }
}
