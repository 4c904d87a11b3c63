use async_trait::async_trait;

use crate::domain::{ports::Embedder, DomainError, Embedding};

/// Deterministic, offline embedder: hashes word tokens into a fixed number
/// of buckets and L2-normalizes the result. Texts sharing vocabulary land
/// close together under cosine similarity, which is enough for tests and
/// local runs without an embedding provider.
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "embedding dimension must be positive");
        Self { dimension }
    }

    fn encode_one(&self, text: &str) -> Embedding {
        let mut vec = vec![0.0f32; self.dimension];
        for token in text.split_whitespace() {
            let token: String = token
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(|c| c.to_lowercase())
                .collect();
            if token.is_empty() {
                continue;
            }
            let mut hash: u64 = 0xcbf29ce484222325;
            for byte in token.bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x100000001b3);
            }
            vec[(hash % self.dimension as u64) as usize] += 1.0;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vec {
                *x /= norm;
            }
        }
        Embedding::new(vec)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn encode(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Err(DomainError::validation("cannot embed an empty text batch"));
        }
        Ok(texts.iter().map(|text| self.encode_one(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deterministic_and_normalized() {
        let embedder = StubEmbedder::new(16);
        let a = embedder.encode(&["mutable sequence"]).await.unwrap();
        let b = embedder.encode(&["mutable sequence"]).await.unwrap();

        assert_eq!(a[0].as_slice(), b[0].as_slice());
        let norm: f32 = a[0].as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_scores_higher() {
        let embedder = StubEmbedder::new(32);
        let vecs = embedder
            .encode(&[
                "lists are mutable sequences",
                "mutable sequences support slicing",
                "garbage collection internals",
            ])
            .await
            .unwrap();

        let related = vecs[0].cosine_similarity(&vecs[1]);
        let unrelated = vecs[0].cosine_similarity(&vecs[2]);
        assert!(related > unrelated);
    }

    #[test]
    #[should_panic(expected = "dimension must be positive")]
    fn test_zero_dimension_rejected() {
        StubEmbedder::new(0);
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let embedder = StubEmbedder::new(8);
        assert!(matches!(
            embedder.encode(&[]).await,
            Err(DomainError::Validation(_))
        ));
    }
}
