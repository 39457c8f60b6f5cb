pub mod embeddings;
pub mod extraction;
pub mod generation;
pub mod persistence;
