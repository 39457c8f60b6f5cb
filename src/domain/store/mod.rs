pub mod corpus;
pub mod flat_index;
pub mod retrieval_store;
