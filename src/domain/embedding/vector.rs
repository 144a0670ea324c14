//! Fixed-length embedding vector and similarity scoring

use serde::{Deserialize, Serialize};

/// Number of dimensions every embedding carries
pub const EMBEDDING_DIMENSIONS: usize = 4;

/// A heuristic feature vector for a piece of text
///
/// The length is part of the type, so two embeddings are always comparable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding([f64; EMBEDDING_DIMENSIONS]);

impl Embedding {
    /// Create an embedding from raw values
    pub const fn new(values: [f64; EMBEDDING_DIMENSIONS]) -> Self {
        Self(values)
    }

    /// Get the raw values
    pub fn values(&self) -> &[f64; EMBEDDING_DIMENSIONS] {
        &self.0
    }

    /// Euclidean norm of the vector
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Calculate cosine similarity with another embedding
    pub fn cosine_similarity(&self, other: &Embedding) -> f64 {
        cosine_similarity(self, other)
    }
}

impl From<[f64; EMBEDDING_DIMENSIONS]> for Embedding {
    fn from(values: [f64; EMBEDDING_DIMENSIONS]) -> Self {
        Self(values)
    }
}

/// Calculate cosine similarity between two embeddings
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> f64 {
    let dot_product: f64 = a.0.iter().zip(b.0.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
