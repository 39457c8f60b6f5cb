pub mod hashing;
pub mod local_model;
pub mod openai;
