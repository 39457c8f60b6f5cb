use crate::domain::error::DomainError;

/// Append-only chunk texts, indexed by row id.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    texts: Vec<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_texts(texts: Vec<String>) -> Self {
        Self { texts }
    }

    pub fn append(&mut self, texts: Vec<String>) {
        self.texts.extend(texts);
    }

    pub fn get(&self, row_id: usize) -> Result<&str, DomainError> {
        self.texts
            .get(row_id)
            .map(String::as_str)
            .ok_or(DomainError::OutOfRange {
                row_id,
                size: self.texts.len(),
            })
    }

    pub fn size(&self) -> usize {
        self.texts.len()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }
}
