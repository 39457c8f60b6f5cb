use crate::domain::error::DomainError;

/// Pulls plain text out of an uploaded document.
pub trait TextExtractor: Send + Sync {
    /// Whether this extractor handles files with the given name.
    fn supports(&self, file_name: &str) -> bool;

    /// Extracted text. Unreadable documents yield an empty string rather than
    /// an error, so callers treat them as empty.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, DomainError>;
}
