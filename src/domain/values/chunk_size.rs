use serde::Serialize;
use std::fmt;

/// Characters per chunk. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub const DEFAULT: usize = 500;

    pub fn new(value: usize) -> Result<Self, String> {
        if value == 0 {
            return Err("Chunk size must be at least 1 character".to_string());
        }
        Ok(ChunkSize(value))
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        ChunkSize(Self::DEFAULT)
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
