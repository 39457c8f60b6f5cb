//! Shared test helpers.
#![allow(dead_code)]

use legalease::config::Settings;
use legalease::domain::error::DomainError;
use legalease::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use legalease::domain::ports::generator_port::AnswerGenerator;
use legalease::domain::ports::snapshot_store::SnapshotStore;
use legalease::domain::ports::text_extractor::TextExtractor;
use legalease::domain::store::retrieval_store::RetrievalStore;
use legalease::domain::values::backend::GeneratorBackend;
use legalease::infrastructure::embeddings::hashing::HashingProvider;
use legalease::infrastructure::persistence::document_archive::DocumentArchive;
use legalease::infrastructure::persistence::snapshot::FileSnapshotStore;
use legalease::LegalEase;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const DIM: usize = 256;

/// Generator that records prompts and answers from a script.
pub struct FakeGenerator {
    reply: Result<String, String>,
    delay: Option<Duration>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn answering(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            reply: Ok("too late".to_string()),
            delay: Some(delay),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone().map_err(DomainError::GenerationFailure)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Treats `.pdf` uploads as UTF-8 text.
pub struct FakeExtractor;

impl TextExtractor for FakeExtractor {
    fn supports(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(".pdf")
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String, DomainError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Never loads anything and refuses every save.
pub struct FailingSnapshots;

impl SnapshotStore for FailingSnapshots {
    fn load(&self) -> Result<Option<RetrievalStore>, DomainError> {
        Ok(None)
    }

    fn save(&self, _store: &RetrievalStore) -> Result<(), DomainError> {
        Err(DomainError::PersistenceFailure("disk full".to_string()))
    }
}

/// Declares one dimension, returns another.
pub struct LyingEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for LyingEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|_| vec![0.5; DIM / 2]).collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn name(&self) -> &str {
        "lying"
    }
}

pub fn settings(dir: &TempDir) -> Settings {
    let mut s = Settings::default();
    s.data_dir = dir.path().join("data");
    s.docs_dir = dir.path().join("docs");
    s.embedding.dimension = Some(DIM);
    s.embedding.batch_size = 4;
    s.generator.backend = GeneratorBackend::None;
    s.generator.timeout = Duration::from_millis(200);
    s
}

pub fn snapshots(dir: &TempDir) -> Arc<FileSnapshotStore> {
    let s = settings(dir);
    Arc::new(FileSnapshotStore::new(s.index_path(), s.chunks_path()))
}

pub fn build(
    dir: &TempDir,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn AnswerGenerator>,
    snapshots: Arc<dyn SnapshotStore>,
) -> Result<LegalEase, DomainError> {
    let s = settings(dir);
    let app = LegalEase::with_providers(&s, embedder, generator, Arc::new(FakeExtractor), snapshots)?;
    Ok(app.with_archive(DocumentArchive::new(s.docs_dir.clone())))
}

pub fn setup(dir: &TempDir) -> LegalEase {
    setup_with_generator(dir, Arc::new(FakeGenerator::answering("stub answer")))
}

pub fn setup_with_generator(dir: &TempDir, generator: Arc<dyn AnswerGenerator>) -> LegalEase {
    build(dir, Arc::new(HashingProvider::new(DIM)), generator, snapshots(dir)).unwrap()
}

/// A document whose chunks (at the default size) have disjoint vocabularies.
pub fn distinct_document(chunks: usize) -> String {
    (0..chunks)
        .map(|i| {
            let words: String = (0..60).map(|w| format!("t{i}w{w} ")).collect();
            let mut chunk: String = words.chars().take(500).collect();
            while chunk.chars().count() < 500 {
                chunk.push(' ');
            }
            chunk
        })
        .collect()
}
