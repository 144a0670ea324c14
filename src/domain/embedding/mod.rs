//! Embedding domain models and traits
//!
//! Query text is mapped onto a small fixed-length feature vector and
//! compared with cosine similarity.

mod embedder;
mod vector;

pub use embedder::{Embedder, KeywordEmbedder, KeywordRule};
pub use vector::{cosine_similarity, Embedding, EMBEDDING_DIMENSIONS};
