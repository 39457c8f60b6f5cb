use crate::domain::error::DomainError;
use crate::domain::ports::text_extractor::TextExtractor;

/// Text layer extraction for PDF uploads. Scanned (image-only) PDFs come back
/// empty.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn supports(&self, file_name: &str) -> bool {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String, DomainError> {
        // pdf-extract panics on some malformed inputs
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                tracing::warn!("PDF text extraction failed: {e}");
                Ok(String::new())
            }
            Err(_) => {
                tracing::warn!("PDF text extraction panicked");
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_pdf_only() {
        let pdf = PdfTextExtractor;
        assert!(pdf.supports("lease.pdf"));
        assert!(pdf.supports("NDA.PDF"));
        assert!(!pdf.supports("notes.txt"));
        assert!(!pdf.supports("pdf"));
    }

    #[test]
    fn test_garbage_bytes_extract_to_empty() {
        let text = PdfTextExtractor.extract_text(b"definitely not a pdf").unwrap();
        assert!(text.is_empty());
    }
}
