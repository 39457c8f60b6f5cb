pub mod backend;
pub mod chunk_size;
pub mod top_k;
