use crate::domain::error::DomainError;
use std::path::{Path, PathBuf};

/// Keeps a copy of every accepted upload.
pub struct DocumentArchive {
    root: PathBuf,
}

impl DocumentArchive {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Write `bytes` under the archive root. Only the final path component
    /// of `file_name` is used, so client-supplied paths cannot escape the
    /// root.
    pub fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| DomainError::InvalidInput(format!("bad file name: {file_name:?}")))?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| DomainError::PersistenceFailure(format!("{}: {e}", self.root.display())))?;
        let path = self.root.join(name);
        std::fs::write(&path, bytes)
            .map_err(|e| DomainError::PersistenceFailure(format!("{}: {e}", path.display())))?;
        Ok(path)
    }
}
