use crate::domain::error::DomainError;
use crate::domain::ports::generator_port::AnswerGenerator;

/// Stands in when no language model is configured. Every call fails, so the
/// caller still gets the retrieved context plus an explanatory reply.
pub struct NoopGenerator;

#[async_trait::async_trait]
impl AnswerGenerator for NoopGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::GenerationFailure(
            "no answer generator configured".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "none"
    }
}
