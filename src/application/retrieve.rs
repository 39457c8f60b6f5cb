use crate::application::embed_batches::embed_in_batches;
use crate::application::SharedStore;
use crate::domain::entities::chunk::{Chunk, RetrievedChunk};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::values::top_k::TopK;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct RetrieveUseCase {
    store: SharedStore,
    embedder: Arc<dyn EmbeddingProvider>,
    embed_timeout: Duration,
}

impl RetrieveUseCase {
    pub fn new(store: SharedStore, embedder: Arc<dyn EmbeddingProvider>, embed_timeout: Duration) -> Self {
        Self {
            store,
            embedder,
            embed_timeout,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Nearest chunks to `query`, closest first. An empty index yields an
    /// empty list without calling the embedder.
    pub async fn execute(&self, query: &str, top_k: TopK) -> Result<Vec<RetrievedChunk>, DomainError> {
        if self.is_empty().await {
            return Ok(Vec::new());
        }

        let vector = embed_in_batches(
            self.embedder.as_ref(),
            &[query.to_string()],
            InputType::Query,
            1,
            self.embed_timeout,
        )
        .await?
        .pop()
        .ok_or_else(|| DomainError::Embedding("no vector for query".to_string()))?;

        let store = self.store.read().await;
        store.search(&vector, top_k.value())
    }

    pub async fn chunk(&self, row_id: usize) -> Result<Chunk, DomainError> {
        self.store.read().await.chunk(row_id)
    }
}
