//! Exact (brute-force) nearest-neighbour index over squared L2 distance.
//!
//! Vectors are stored row-major in one contiguous buffer. Rows are
//! append-only and numbered by insertion order.

use crate::domain::error::DomainError;
use std::cmp::Ordering;
use std::ops::Range;

/// One search result: row id and squared L2 distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub row_id: usize,
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    /// Rebuild from a row-major buffer, e.g. a loaded snapshot.
    pub fn from_raw(dimension: usize, data: Vec<f32>) -> Result<Self, DomainError> {
        if dimension == 0 || data.len() % dimension != 0 {
            return Err(DomainError::DimensionMismatch {
                expected: dimension,
                actual: data.len(),
            });
        }
        Ok(Self { dimension, data })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn size(&self) -> usize {
        if self.dimension == 0 {
            return 0;
        }
        self.data.len() / self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_raw(&self) -> &[f32] {
        &self.data
    }

    /// Keep only the first `rows` rows.
    pub fn truncate(&mut self, rows: usize) {
        self.data.truncate(rows * self.dimension);
    }

    /// Check every vector before touching the buffer. Returns the rows that
    /// `add` would assign.
    pub fn validate(&self, vectors: &[Vec<f32>]) -> Result<Range<usize>, DomainError> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }
        let start = self.size();
        Ok(start..start + vectors.len())
    }

    /// Append vectors in order. All-or-nothing: a single bad vector rejects
    /// the whole batch.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<Range<usize>, DomainError> {
        let rows = self.validate(vectors)?;
        self.data.reserve(vectors.len() * self.dimension);
        for v in vectors {
            self.data.extend_from_slice(v);
        }
        Ok(rows)
    }

    /// Up to `k` nearest rows, ascending by distance. Ties keep insertion
    /// order. Empty index or `k == 0` yields no hits.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, DomainError> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(row_id, row)| SearchHit {
                row_id,
                distance: squared_l2(query, row),
            })
            .collect();

        let by_distance = |a: &SearchHit, b: &SearchHit| -> Ordering {
            a.distance
                .total_cmp(&b.distance)
                .then(a.row_id.cmp(&b.row_id))
        };
        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, by_distance);
            hits.truncate(k);
        }
        hits.sort_by(by_distance);
        Ok(hits)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
