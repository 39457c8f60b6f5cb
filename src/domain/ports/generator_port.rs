use crate::domain::error::DomainError;

/// External language model that turns a prompt into an answer.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Name for logging
    fn name(&self) -> &str;
}
