//! In-memory TF-IDF search: tokenization, smoothed IDF, per-document weight
//! vectors and cosine-similarity ranking.

pub mod document;
pub mod index;
pub mod loader;
pub mod search;
pub mod shared;
pub mod tokenizer;
pub mod vector;

pub use document::Document;
pub use index::{BuildStatus, Index, Statistics};
pub use search::{SearchHit, Searcher};
pub use shared::SharedIndex;
pub use vector::{cosine_similarity, TermVector};
