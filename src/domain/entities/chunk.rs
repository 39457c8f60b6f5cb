use serde::{Deserialize, Serialize};

/// A stored fragment of document text. `id` is its row in both the vector
/// index and the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: usize,
    pub text: String,
}

/// A chunk returned by a similarity search, with its squared L2 distance to
/// the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    pub id: usize,
    pub text: String,
    pub distance: f32,
}
