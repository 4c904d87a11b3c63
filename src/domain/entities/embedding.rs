use serde::{Deserialize, Serialize};

/// Fixed-dimension vector for one chunk or query text.
///
/// Scores are compared with cosine similarity, the distance the store's
/// collections are created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(vec: Vec<f32>) -> Self {
        Self(vec)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Cosine similarity with `other`. Mismatched dimensions and zero
    /// vectors score 0.0 rather than erroring; such pairs can only come
    /// from misconfigured embedders and must not rank above real hits.
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.0.len() != other.0.len() || self.0.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let a = Embedding::new(vec![0.6, 0.8]);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![0.0, 1.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn test_mismatched_and_zero_vectors_score_zero() {
        let a = Embedding::new(vec![1.0, 2.0]);
        let longer = Embedding::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.cosine_similarity(&longer), 0.0);

        let zero = Embedding::new(vec![0.0, 0.0]);
        assert_eq!(a.cosine_similarity(&zero), 0.0);
    }
}
