pub mod answer;
pub mod embed_batches;
pub mod health;
pub mod ingest;
pub mod retrieve;

use crate::domain::store::retrieval_store::RetrievalStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The single index + corpus shared by every use case. Ingestion takes the
/// write half; health and retrieval take the read half.
pub type SharedStore = Arc<RwLock<RetrievalStore>>;
