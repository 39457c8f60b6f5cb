pub mod embedding_port;
pub mod generator_port;
pub mod snapshot_store;
pub mod text_extractor;
