mod common;

use common::*;
use legalease::domain::error::DomainError;
use legalease::domain::values::backend::EmbeddingBackend;
use legalease::LegalEase;
use tempfile::TempDir;

#[tokio::test]
async fn test_unknown_remote_model_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    let mut s = settings(&dir);
    s.embedding.backend = EmbeddingBackend::OpenAi;
    s.embedding.model = Some("mxbai-embed-large".to_string());
    s.embedding.dimension = None;

    let err = LegalEase::new(&s).err().unwrap();
    assert!(matches!(err, DomainError::Configuration(_)));
    assert!(!s.index_path().exists());
}

#[tokio::test]
async fn test_remote_model_with_explicit_dimension_starts() {
    let dir = TempDir::new().unwrap();
    let mut s = settings(&dir);
    s.embedding.backend = EmbeddingBackend::OpenAi;
    s.embedding.model = Some("mxbai-embed-large".to_string());
    s.embedding.dimension = Some(1024);

    let app = LegalEase::new(&s).unwrap();
    let health = app.health().await;
    assert_eq!(health.index_size, 0);
}

#[tokio::test]
async fn test_hashing_backend_uses_configured_dimension() {
    let dir = TempDir::new().unwrap();
    let mut s = settings(&dir);
    s.embedding.backend = EmbeddingBackend::Hashing;

    let app = LegalEase::new(&s).unwrap();
    app.ingest_text("Clause one.").await.unwrap();
    let raw = std::fs::read(s.index_path()).unwrap();
    let dimension = u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]) as usize;
    assert_eq!(dimension, DIM);
}
