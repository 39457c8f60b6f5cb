use crate::application::retrieve::RetrieveUseCase;
use crate::domain::error::DomainError;
use crate::domain::ports::generator_port::AnswerGenerator;
use crate::domain::values::top_k::TopK;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub messages: Vec<String>,
    pub context_used: Vec<String>,
    pub reply: String,
}

#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Nothing has been ingested yet.
    NoDocuments,
    Answered(Answer),
}

pub struct AnswerUseCase {
    retrieve: RetrieveUseCase,
    generator: Arc<dyn AnswerGenerator>,
    timeout: Duration,
}

impl AnswerUseCase {
    pub fn new(retrieve: RetrieveUseCase, generator: Arc<dyn AnswerGenerator>, timeout: Duration) -> Self {
        Self {
            retrieve,
            generator,
            timeout,
        }
    }

    /// Retrieve context for the joined `messages` and ask the generator.
    /// Generator failures end up in `reply`; only retrieval errors propagate.
    pub async fn execute(&self, messages: Vec<String>, top_k: TopK) -> Result<QueryOutcome, DomainError> {
        if self.retrieve.is_empty().await {
            return Ok(QueryOutcome::NoDocuments);
        }

        let combined_query = messages.join("\n");
        let hits = self.retrieve.execute(&combined_query, top_k).await?;
        let context_used: Vec<String> = hits.into_iter().map(|h| h.text).collect();

        let prompt = build_prompt(&context_used, &combined_query);
        let reply = match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{} call failed: {e}", self.generator.name());
                e.to_string()
            }
        };

        Ok(QueryOutcome::Answered(Answer {
            messages,
            context_used,
            reply,
        }))
    }

    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::GenerationFailure(format!(
                "no answer within {:?}",
                self.timeout
            ))),
        }
    }
}

pub fn build_prompt(context: &[String], query: &str) -> String {
    format!(
        "You are a helpful AI assistant specialized in answering user questions from the provided context.\n\
         \n\
         Context:\n\
         {}\n\
         \n\
         User Query:\n\
         {query}\n\
         \n\
         Provide a concise, accurate answer using ONLY the context above when possible. \
         If the context doesn't contain the answer, say you don't have enough information \
         and suggest what to do next.\n",
        context.join("\n\n")
    )
}
