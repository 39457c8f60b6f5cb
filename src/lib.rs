//! Retrieval-augmented question answering over uploaded documents.
//!
//! Documents are split into fixed-size chunks, embedded, and stored in an
//! exact L2 index alongside their text. Queries retrieve the nearest chunks
//! and hand them to a language model as context.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;

use crate::application::answer::{AnswerUseCase, QueryOutcome};
use crate::application::health::{Health, HealthUseCase};
use crate::application::ingest::{IngestResult, IngestUseCase};
use crate::application::retrieve::RetrieveUseCase;
use crate::application::SharedStore;
use crate::config::{Settings, DEFAULT_EMBEDDING_MODEL, DEFAULT_HASHING_DIMENSION};
use crate::domain::entities::chunk::{Chunk, RetrievedChunk};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::generator_port::AnswerGenerator;
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::domain::ports::text_extractor::TextExtractor;
use crate::domain::store::retrieval_store::RetrievalStore;
use crate::domain::values::backend::{EmbeddingBackend, GeneratorBackend};
use crate::domain::values::top_k::TopK;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::local_model::FastEmbedProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::extraction::pdf::PdfTextExtractor;
use crate::infrastructure::generation::gemini::GeminiGenerator;
use crate::infrastructure::generation::noop::NoopGenerator;
use crate::infrastructure::persistence::document_archive::DocumentArchive;
use crate::infrastructure::persistence::snapshot::FileSnapshotStore;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct LegalEase {
    ingest_uc: IngestUseCase,
    retrieve_uc: RetrieveUseCase,
    answer_uc: AnswerUseCase,
    health_uc: HealthUseCase,
    archive: Option<DocumentArchive>,
}

impl LegalEase {
    /// Build the production wiring described by `settings`. Fails if the
    /// embedding model cannot be loaded or a required key is missing.
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let emb = &settings.embedding;
        let embedder: Arc<dyn EmbeddingProvider> = match emb.backend {
            EmbeddingBackend::FastEmbed => Arc::new(FastEmbedProvider::new(
                emb.model.as_deref().unwrap_or(DEFAULT_EMBEDDING_MODEL),
                emb.cache_dir.clone(),
            )?),
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
                emb.api_key.clone(),
                emb.model.clone(),
                emb.base_url.clone(),
                emb.dimension,
            )?),
            EmbeddingBackend::Hashing => Arc::new(HashingProvider::new(
                emb.dimension.unwrap_or(DEFAULT_HASHING_DIMENSION),
            )),
        };

        let gen = &settings.generator;
        let generator: Arc<dyn AnswerGenerator> = match gen.backend {
            GeneratorBackend::Gemini => {
                let key = gen.api_key.clone().ok_or_else(|| {
                    DomainError::Configuration(
                        "GEMINI_API_KEY is missing; set it or use LEGALEASE_GENERATOR=none".into(),
                    )
                })?;
                Arc::new(GeminiGenerator::new(key, gen.model.clone(), gen.base_url.clone()))
            }
            GeneratorBackend::None => Arc::new(NoopGenerator),
        };

        let snapshots = Arc::new(FileSnapshotStore::new(
            settings.index_path(),
            settings.chunks_path(),
        ));

        let app = Self::with_providers(
            settings,
            embedder,
            generator,
            Arc::new(PdfTextExtractor),
            snapshots,
        )?;
        Ok(app.with_archive(DocumentArchive::new(settings.docs_dir.clone())))
    }

    /// Wire explicit adapters. Loads the snapshot once; a snapshot built with
    /// a different embedding dimension refuses to start.
    pub fn with_providers(
        settings: &Settings,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerGenerator>,
        extractor: Arc<dyn TextExtractor>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Result<Self, DomainError> {
        let dimension = embedder.dimension();
        if dimension == 0 {
            return Err(DomainError::Configuration(format!(
                "embedding provider {} reports dimension 0",
                embedder.name()
            )));
        }

        let store = match snapshots.load()? {
            Some(store) if store.dimension() == dimension => store,
            Some(store) if store.is_empty() => {
                tracing::warn!(
                    "discarding empty snapshot of dimension {} for provider dimension {dimension}",
                    store.dimension()
                );
                RetrievalStore::new(dimension)
            }
            Some(store) => {
                return Err(DomainError::DimensionMismatch {
                    expected: dimension,
                    actual: store.dimension(),
                })
            }
            None => RetrievalStore::new(dimension),
        };
        tracing::info!(
            "embedding with {} (dimension {dimension}), generating with {}",
            embedder.name(),
            generator.name()
        );

        let store: SharedStore = Arc::new(RwLock::new(store));
        let emb = &settings.embedding;
        let retrieve_uc = RetrieveUseCase::new(store.clone(), embedder.clone(), emb.timeout);

        Ok(Self {
            ingest_uc: IngestUseCase::new(
                store.clone(),
                embedder,
                extractor,
                snapshots,
                settings.chunk_size,
                emb.batch_size,
                emb.timeout,
            ),
            answer_uc: AnswerUseCase::new(retrieve_uc.clone(), generator, settings.generator.timeout),
            retrieve_uc,
            health_uc: HealthUseCase::new(store),
            archive: None,
        })
    }

    /// Keep a copy of every accepted upload.
    pub fn with_archive(mut self, archive: DocumentArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub async fn ingest_text(&self, raw_text: &str) -> Result<IngestResult, DomainError> {
        self.ingest_uc.execute(raw_text).await
    }

    pub async fn ingest_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<IngestResult, DomainError> {
        if let Some(archive) = self.archive.as_ref().filter(|_| self.ingest_uc.supports(file_name)) {
            match archive.store(file_name, &bytes) {
                Ok(path) => tracing::info!("saved upload to {}", path.display()),
                Err(e) => tracing::warn!("could not archive upload {file_name}: {e}"),
            }
        }
        self.ingest_uc.ingest_document(file_name, bytes).await
    }

    pub async fn retrieve(&self, query: &str, top_k: Option<i64>) -> Result<Vec<String>, DomainError> {
        let hits = self.search(query, top_k).await?;
        Ok(hits.into_iter().map(|h| h.text).collect())
    }

    pub async fn search(
        &self,
        query: &str,
        top_k: Option<i64>,
    ) -> Result<Vec<RetrievedChunk>, DomainError> {
        self.retrieve_uc.execute(query, TopK::clamped(top_k)).await
    }

    pub async fn ask(
        &self,
        messages: Vec<String>,
        top_k: Option<i64>,
    ) -> Result<QueryOutcome, DomainError> {
        self.answer_uc.execute(messages, TopK::clamped(top_k)).await
    }

    pub async fn chunk(&self, row_id: usize) -> Result<Chunk, DomainError> {
        self.retrieve_uc.chunk(row_id).await
    }

    pub async fn health(&self) -> Health {
        self.health_uc.execute().await
    }
}
