//! Vector index and chunk corpus kept in lockstep.
//!
//! Row `i` of the index is the embedding of corpus entry `i`. The only way
//! to grow the store is [`RetrievalStore::append`], which validates the
//! whole batch before mutating either side.

use crate::domain::entities::chunk::{Chunk, RetrievedChunk};
use crate::domain::error::DomainError;
use crate::domain::store::corpus::Corpus;
use crate::domain::store::flat_index::FlatL2Index;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct RetrievalStore {
    index: FlatL2Index,
    corpus: Corpus,
}

impl RetrievalStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            index: FlatL2Index::new(dimension),
            corpus: Corpus::new(),
        }
    }

    /// Join an index and a corpus loaded from elsewhere. Their row counts
    /// must agree.
    pub fn from_parts(index: FlatL2Index, corpus: Corpus) -> Result<Self, DomainError> {
        if index.size() != corpus.size() {
            return Err(DomainError::PersistenceFailure(format!(
                "index holds {} vectors but corpus holds {} chunks",
                index.size(),
                corpus.size()
            )));
        }
        Ok(Self { index, corpus })
    }

    pub fn append(
        &mut self,
        texts: Vec<String>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Range<usize>, DomainError> {
        if texts.len() != vectors.len() {
            return Err(DomainError::Embedding(format!(
                "{} vectors for {} chunks",
                vectors.len(),
                texts.len()
            )));
        }
        let rows = self.index.add(&vectors)?;
        self.corpus.append(texts);
        debug_assert_eq!(self.index.size(), self.corpus.size());
        Ok(rows)
    }

    /// Nearest chunks to `query`, closest first. Hits whose row has no
    /// corpus entry are logged and skipped.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<RetrievedChunk>, DomainError> {
        let hits = self.index.search(query, k)?;
        let mut chunks = Vec::with_capacity(hits.len());
        for hit in hits {
            match self.corpus.get(hit.row_id) {
                Ok(text) => chunks.push(RetrievedChunk {
                    id: hit.row_id,
                    text: text.to_string(),
                    distance: hit.distance,
                }),
                Err(e) => tracing::warn!("dropping search hit: {e}"),
            }
        }
        Ok(chunks)
    }

    pub fn chunk(&self, row_id: usize) -> Result<Chunk, DomainError> {
        let text = self.corpus.get(row_id)?;
        Ok(Chunk {
            id: row_id,
            text: text.to_string(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn index_size(&self) -> usize {
        self.index.size()
    }

    pub fn chunks_stored(&self) -> usize {
        self.corpus.size()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}
