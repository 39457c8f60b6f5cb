use crate::application::embed_batches::embed_in_batches;
use crate::application::SharedStore;
use crate::domain::chunker::chunk_text;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::domain::ports::text_extractor::TextExtractor;
use crate::domain::values::chunk_size::ChunkSize;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestResult {
    pub chunks_added: usize,
    pub index_size: usize,
    /// False when the snapshot write failed. The chunks are searchable
    /// but will not survive a restart.
    pub persisted: bool,
}

pub struct IngestUseCase {
    store: SharedStore,
    embedder: Arc<dyn EmbeddingProvider>,
    extractor: Arc<dyn TextExtractor>,
    snapshots: Arc<dyn SnapshotStore>,
    chunk_size: ChunkSize,
    batch_size: usize,
    embed_timeout: Duration,
}

impl IngestUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: SharedStore,
        embedder: Arc<dyn EmbeddingProvider>,
        extractor: Arc<dyn TextExtractor>,
        snapshots: Arc<dyn SnapshotStore>,
        chunk_size: ChunkSize,
        batch_size: usize,
        embed_timeout: Duration,
    ) -> Self {
        Self {
            store,
            embedder,
            extractor,
            snapshots,
            chunk_size,
            batch_size,
            embed_timeout,
        }
    }

    pub fn supports(&self, file_name: &str) -> bool {
        self.extractor.supports(file_name)
    }

    /// Extract, then ingest, an uploaded document.
    pub async fn ingest_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<IngestResult, DomainError> {
        if !self.supports(file_name) {
            return Err(DomainError::UnsupportedDocument(
                "Only PDF uploads are supported".to_string(),
            ));
        }

        let extractor = Arc::clone(&self.extractor);
        let text = match tokio::task::spawn_blocking(move || extractor.extract_text(&bytes)).await {
            Ok(text) => text?,
            Err(e) => {
                tracing::warn!("text extraction task failed for {file_name}: {e}");
                String::new()
            }
        };
        if text.trim().is_empty() {
            return Err(DomainError::EmptyDocument(format!(
                "No text extracted from {file_name}"
            )));
        }

        self.execute(&text).await
    }

    /// Chunk, embed, append and persist `raw_text`.
    ///
    /// Embedding runs before the write lock is taken; the append and the
    /// snapshot write happen under it, so readers never observe a
    /// half-applied batch.
    pub async fn execute(&self, raw_text: &str) -> Result<IngestResult, DomainError> {
        let chunks = chunk_text(raw_text, self.chunk_size);
        if chunks.is_empty() {
            return Err(DomainError::EmptyDocument(
                "Document produced 0 chunks".to_string(),
            ));
        }

        let vectors = embed_in_batches(
            self.embedder.as_ref(),
            &chunks,
            InputType::Document,
            self.batch_size,
            self.embed_timeout,
        )
        .await?;

        let mut store = self.store.write().await;
        let rows = store.append(chunks, vectors)?;

        let persisted = match blocking(|| self.snapshots.save(&store)) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    "{e}; {} chunks are held in memory only and will be lost on restart",
                    rows.len()
                );
                false
            }
        };

        tracing::info!(
            "ingested {} chunks (rows {}..{}), index size {}",
            rows.len(),
            rows.start,
            rows.end,
            store.index_size()
        );

        Ok(IngestResult {
            chunks_added: rows.len(),
            index_size: store.index_size(),
            persisted,
        })
    }
}

/// Run file I/O that must stay under the caller's lock without stalling the
/// other tasks on this worker. The current-thread runtime cannot hand its
/// worker off, so there the closure simply runs inline.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current().map(|h| h.runtime_flavor()) {
        Ok(tokio::runtime::RuntimeFlavor::MultiThread) => tokio::task::block_in_place(f),
        _ => f(),
    }
}
