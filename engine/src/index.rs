use crate::document::Document;
use crate::search::{SearchHit, Searcher};
use crate::vector::TermVector;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// IDF table and per-document vectors computed from one snapshot of the collection.
#[derive(Debug)]
pub(crate) struct BuiltIndex {
    pub(crate) idf: HashMap<String, f64>,
    /// Parallel to `Index::documents`.
    pub(crate) vectors: Vec<TermVector>,
}

#[derive(Debug, Default)]
enum IndexState {
    #[default]
    Unbuilt,
    Built(BuiltIndex),
}

/// Outcome of [`Index::build_index`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildStatus {
    Built { documents: usize, terms: usize },
    /// The collection was empty; nothing was indexed.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub document_count: usize,
    pub vocabulary_size: usize,
    pub is_indexed: bool,
    pub average_token_count: f64,
}

/// In-memory TF-IDF index.
///
/// Documents are append-only and kept in insertion order; re-adding an id
/// replaces that document in place. Any addition drops the built vectors, and
/// the next search rebuilds them.
#[derive(Debug, Default)]
pub struct Index {
    documents: Vec<Document>,
    slots: HashMap<String, usize>,
    vocabulary: HashSet<String>,
    state: IndexState,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    pub fn add_document(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        location: Option<String>,
    ) {
        let doc = Document::new(id.into(), title.into(), content.into(), location);
        // Terms of a replaced document stay in the vocabulary.
        self.vocabulary.extend(doc.term_frequencies().keys().cloned());
        match self.slots.get(&doc.id) {
            Some(&slot) => {
                tracing::debug!(id = %doc.id, tokens = doc.token_count(), "replaced document");
                self.documents[slot] = doc;
            }
            None => {
                tracing::debug!(id = %doc.id, tokens = doc.token_count(), "added document");
                self.slots.insert(doc.id.clone(), self.documents.len());
                self.documents.push(doc);
            }
        }
        self.state = IndexState::Unbuilt;
    }

    /// Recompute IDF scores and document vectors from the current collection.
    pub fn build_index(&mut self) -> BuildStatus {
        if self.documents.is_empty() {
            tracing::warn!("no documents to index");
            return BuildStatus::Empty;
        }

        let n = self.documents.len() as f64;
        let mut df: HashMap<&str, u32> = HashMap::new();
        for doc in &self.documents {
            for term in doc.term_frequencies().keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        // Smoothed IDF; negative for terms found in most documents, and kept that way.
        let idf: HashMap<String, f64> = self
            .vocabulary
            .iter()
            .map(|term| {
                let df_t = df.get(term.as_str()).copied().unwrap_or(0);
                (term.clone(), (n / (1.0 + f64::from(df_t))).ln())
            })
            .collect();

        let vectors: Vec<TermVector> = self
            .documents
            .iter()
            .map(|doc| TermVector::weighted(doc.term_frequencies(), |t| idf.get(t).copied()))
            .collect();

        let status = BuildStatus::Built { documents: self.documents.len(), terms: idf.len() };
        tracing::info!(num_docs = self.documents.len(), num_terms = idf.len(), "index built");
        self.state = IndexState::Built(BuiltIndex { idf, vectors });
        status
    }

    /// Rank documents against `query`, building the index first if needed.
    pub fn search(&mut self, query: &str, top_k: usize) -> Vec<SearchHit> {
        if !self.is_indexed() {
            let _ = self.build_index();
        }
        self.searcher().map(|s| s.search(query, top_k)).unwrap_or_default()
    }

    /// Read-only view over the built index; `None` until a build has succeeded
    /// since the last addition.
    pub fn searcher(&self) -> Option<Searcher<'_>> {
        match &self.state {
            IndexState::Built(built) => Some(Searcher::new(&self.documents, &self.slots, built)),
            IndexState::Unbuilt => None,
        }
    }

    pub fn is_indexed(&self) -> bool { matches!(self.state, IndexState::Built(_)) }

    pub fn get_document(&self, id: &str) -> Option<&Document> {
        self.slots.get(id).map(|&slot| &self.documents[slot])
    }

    pub fn get_document_content(&self, id: &str) -> Option<&str> {
        self.get_document(id).map(|doc| doc.content.as_str())
    }

    /// Documents in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ { self.documents.iter() }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn vocabulary_size(&self) -> usize { self.vocabulary.len() }

    pub fn contains_term(&self, term: &str) -> bool { self.vocabulary.contains(term) }

    pub fn get_statistics(&self) -> Statistics {
        let average_token_count = if self.documents.is_empty() {
            0.0
        } else {
            let total: usize = self.documents.iter().map(Document::token_count).sum();
            total as f64 / self.documents.len() as f64
        };
        Statistics {
            document_count: self.documents.len(),
            vocabulary_size: self.vocabulary.len(),
            is_indexed: self.is_indexed(),
            average_token_count,
        }
    }
}
