use crate::domain::{errors::DomainError, Embedding};
use async_trait::async_trait;

/// Maps text to fixed-dimension vectors. Implementations are expected to
/// return L2-normalized vectors when paired with cosine distance.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds a batch of texts in a single model invocation. The output
    /// length always equals the input length; an empty batch is rejected
    /// with a validation error before any network call.
    async fn encode(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError>;

    /// Output dimension, stable for the lifetime of the model configuration.
    fn dimension(&self) -> usize;
}
