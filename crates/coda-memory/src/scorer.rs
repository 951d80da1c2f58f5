//! Retrieval scoring - cosine similarity blended with importance.

use crate::config::RetrievalConfig;

/// Weights for the blended score.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Base weight applied to similarity (default 0.7)
    pub similarity: f32,
    /// Extra weight scaled by importance (default 0.3)
    pub importance: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 0.7,
            importance: 0.3,
        }
    }
}

impl From<&RetrievalConfig> for ScoringWeights {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            similarity: config.similarity_weight,
            importance: config.importance_weight,
        }
    }
}

/// Blend similarity with importance.
///
/// Similarity stays the primary key: importance only scales it, so an
/// unrelated memory cannot outrank a related one by importance alone.
pub fn blended_score(weights: &ScoringWeights, similarity: f32, importance: f32) -> f32 {
    similarity * (weights.similarity + weights.importance * importance)
}

/// Cosine similarity in [-1, 1]; 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}
