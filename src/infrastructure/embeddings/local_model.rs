//! Local sentence-transformer embeddings through `fastembed` (ONNX runtime).
//!
//! The model is loaded once in [`FastEmbedProvider::new`]; a load failure is
//! fatal to startup because the model fixes the index dimension.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub struct FastEmbedProvider {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedProvider {
    pub fn new(model_name: &str, cache_dir: Option<PathBuf>) -> Result<Self, DomainError> {
        let (model, dimension) = Self::resolve_model(model_name)?;
        let mut options = InitOptions::new(model).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        tracing::info!("loading embedding model {model_name}");
        let embedding = TextEmbedding::try_new(options).map_err(|e| {
            DomainError::Configuration(format!(
                "Failed to load embedding model {model_name}: {e}"
            ))
        })?;

        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            model_name: model_name.to_string(),
            dimension,
        })
    }

    fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize), DomainError> {
        let normalized = name
            .trim_start_matches("sentence-transformers/")
            .trim_start_matches("BAAI/")
            .to_lowercase();
        match normalized.as_str() {
            "all-minilm-l6-v2" | "allminilml6v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
            "all-minilm-l12-v2" | "allminilml12v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
            "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
            "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
            "bge-large-en-v1.5" => Ok((EmbeddingModel::BGELargeENV15, 1024)),
            _ => Err(DomainError::Configuration(format!(
                "Unsupported local embedding model: {name}"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|_| {
                DomainError::Embedding("embedding model lock poisoned".to_string())
            })?;
            model
                .embed(texts, None)
                .map_err(|e| DomainError::Embedding(format!("Failed to generate embeddings: {e}")))
        })
        .await
        .map_err(|e| DomainError::Embedding(format!("embedding task failed: {e}")))?
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference_model() {
        let (_, dim) = FastEmbedProvider::resolve_model("all-MiniLM-L6-v2").unwrap();
        assert_eq!(dim, 384);
        let (_, dim) =
            FastEmbedProvider::resolve_model("sentence-transformers/all-MiniLM-L6-v2").unwrap();
        assert_eq!(dim, 384);
    }

    #[test]
    fn test_unknown_model_is_configuration_error() {
        let err = FastEmbedProvider::resolve_model("not-a-model").err().unwrap();
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
