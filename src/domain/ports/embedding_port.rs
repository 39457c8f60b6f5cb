use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Document,
    Query,
}

/// Maps texts to fixed-dimension vectors. Output order matches input order,
/// one vector per text.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Length of every vector this provider returns. Fixed for the process.
    fn dimension(&self) -> usize;

    /// Name for logging
    fn name(&self) -> &str;
}
