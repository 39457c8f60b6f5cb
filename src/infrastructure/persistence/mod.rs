pub mod document_archive;
pub mod snapshot;
