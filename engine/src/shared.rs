use crate::index::{BuildStatus, Index, Statistics};
use crate::search::SearchHit;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to an [`Index`] shared between threads.
///
/// Writers (`add_document`, `build_index`) take the write lock. Searches run
/// under the read lock while the index is built; only the on-demand rebuild
/// after an addition takes the write lock.
#[derive(Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<Index>>,
}

impl SharedIndex {
    pub fn new(index: Index) -> Self {
        Self { inner: Arc::new(RwLock::new(index)) }
    }

    pub fn add_document(&self, id: String, title: String, content: String, location: Option<String>) {
        self.inner.write().add_document(id, title, content, location);
    }

    pub fn build_index(&self) -> BuildStatus { self.inner.write().build_index() }

    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        self.search_with(query, top_k, |_, hits| hits)
    }

    /// Search and hand the hits to `render` together with the index they were
    /// ranked against. Both happen under one lock guard, so a writer cannot
    /// replace or add documents between ranking and rendering.
    pub fn search_with<R>(&self, query: &str, top_k: usize, render: impl FnOnce(&Index, Vec<SearchHit>) -> R) -> R {
        {
            let index = self.inner.read();
            if let Some(searcher) = index.searcher() {
                let hits = searcher.search(query, top_k);
                return render(&index, hits);
            }
        }
        // Another writer may have built in between; Index::search only rebuilds if still needed.
        let mut index = self.inner.write();
        let hits = index.search(query, top_k);
        render(&index, hits)
    }

    pub fn statistics(&self) -> Statistics { self.inner.read().get_statistics() }

    pub fn document_content(&self, id: &str) -> Option<String> {
        self.inner.read().get_document_content(id).map(str::to_string)
    }

    /// Run `f` with read access to the index.
    pub fn with_index<R>(&self, f: impl FnOnce(&Index) -> R) -> R {
        let index = self.inner.read();
        f(&index)
    }
}

impl From<Index> for SharedIndex {
    fn from(index: Index) -> Self { Self::new(index) }
}
