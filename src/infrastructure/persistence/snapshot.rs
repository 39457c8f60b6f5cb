//! On-disk snapshot: a binary vector file plus a JSON list of chunk texts.
//!
//! `vector_index.bin` layout, all little-endian:
//! magic `LEVX` | u32 version | u32 dimension | u64 rows | rows * dimension f32

use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::domain::store::corpus::Corpus;
use crate::domain::store::flat_index::FlatL2Index;
use crate::domain::store::retrieval_store::RetrievalStore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"LEVX";
const FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 4 + 8;

pub struct FileSnapshotStore {
    index_path: PathBuf,
    chunks_path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(index_path: PathBuf, chunks_path: PathBuf) -> Self {
        Self {
            index_path,
            chunks_path,
        }
    }

    fn read_index(&self) -> Result<FlatL2Index, String> {
        let bytes = fs::read(&self.index_path).map_err(|e| e.to_string())?;
        decode_index(&bytes)
    }

    fn read_corpus(&self) -> Result<Corpus, String> {
        let raw = fs::read_to_string(&self.chunks_path).map_err(|e| e.to_string())?;
        let texts: Vec<String> = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
        Ok(Corpus::from_texts(texts))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<RetrievalStore>, DomainError> {
        let has_index = self.index_path.exists();
        let has_chunks = self.chunks_path.exists();

        match (has_index, has_chunks) {
            (false, false) => {
                tracing::info!("no snapshot in place, starting with an empty index");
                return Ok(None);
            }
            (true, false) | (false, true) => {
                let missing = if has_index { &self.chunks_path } else { &self.index_path };
                tracing::warn!(
                    "snapshot incomplete ({} missing), starting with an empty index",
                    missing.display()
                );
                return Ok(None);
            }
            (true, true) => {}
        }

        let mut index = match self.read_index() {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(
                    "failed to load {}: {e}; starting with an empty index",
                    self.index_path.display()
                );
                return Ok(None);
            }
        };
        let corpus = match self.read_corpus() {
            Ok(corpus) => corpus,
            Err(e) => {
                tracing::warn!(
                    "failed to load {}: {e}; starting with an empty index",
                    self.chunks_path.display()
                );
                return Ok(None);
            }
        };

        // The index is renamed into place first, so a save cut short leaves
        // a longer index next to the previous corpus. Both are append-only,
        // which makes the corpus length a safe cut.
        if index.size() > corpus.size() {
            tracing::warn!(
                "index holds {} vectors but only {} chunks were saved; dropping the unsaved tail",
                index.size(),
                corpus.size()
            );
            index.truncate(corpus.size());
        }

        match RetrievalStore::from_parts(index, corpus) {
            Ok(store) => {
                tracing::info!(
                    "loaded {} chunks (dimension {}) from {}",
                    store.chunks_stored(),
                    store.dimension(),
                    self.index_path.display()
                );
                Ok(Some(store))
            }
            Err(e) => {
                tracing::warn!("snapshot inconsistent: {e}; starting with an empty index");
                Ok(None)
            }
        }
    }

    fn save(&self, store: &RetrievalStore) -> Result<(), DomainError> {
        let index_bytes = encode_index(store.index());
        let chunks_json = serde_json::to_vec_pretty(store.corpus().texts())
            .map_err(|e| DomainError::PersistenceFailure(format!("encode chunks: {e}")))?;

        let index_tmp = tmp_path(&self.index_path);
        let chunks_tmp = tmp_path(&self.chunks_path);
        write_synced(&index_tmp, &index_bytes)?;
        write_synced(&chunks_tmp, &chunks_json)?;

        fs::rename(&index_tmp, &self.index_path).map_err(|e| {
            DomainError::PersistenceFailure(format!("{}: {e}", self.index_path.display()))
        })?;
        fs::rename(&chunks_tmp, &self.chunks_path).map_err(|e| {
            DomainError::PersistenceFailure(format!("{}: {e}", self.chunks_path.display()))
        })?;

        tracing::info!("saved index and {} chunks", store.chunks_stored());
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    let fail = |e: std::io::Error| DomainError::PersistenceFailure(format!("{}: {e}", path.display()));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(fail)?;
    }
    let mut file = fs::File::create(path).map_err(fail)?;
    file.write_all(bytes).map_err(fail)?;
    file.sync_all().map_err(fail)
}

pub fn encode_index(index: &FlatL2Index) -> Vec<u8> {
    let raw = index.as_raw();
    let mut out = Vec::with_capacity(HEADER_LEN + raw.len() * 4);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&(index.dimension() as u32).to_le_bytes());
    out.extend_from_slice(&(index.size() as u64).to_le_bytes());
    out.extend(raw.iter().flat_map(|f| f.to_le_bytes()));
    out
}

pub fn decode_index(bytes: &[u8]) -> Result<FlatL2Index, String> {
    if bytes.len() < HEADER_LEN {
        return Err("index file truncated".into());
    }
    if &bytes[0..4] != MAGIC {
        return Err("not a vector index file".into());
    }
    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != FORMAT_VERSION {
        return Err(format!("unsupported index format version {version}"));
    }
    let dimension = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let mut rows_bytes = [0u8; 8];
    rows_bytes.copy_from_slice(&bytes[12..20]);
    let rows = u64::from_le_bytes(rows_bytes) as usize;

    let body = &bytes[HEADER_LEN..];
    let expected = rows
        .checked_mul(dimension)
        .and_then(|n| n.checked_mul(4))
        .ok_or("index header overflows")?;
    if body.len() != expected {
        return Err(format!(
            "index body is {} bytes, header promises {expected}",
            body.len()
        ));
    }

    let data = body
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    FlatL2Index::from_raw(dimension, data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSnapshotStore {
        FileSnapshotStore::new(
            dir.path().join("vector_index.bin"),
            dir.path().join("chunks.json"),
        )
    }

    fn sample() -> RetrievalStore {
        let mut store = RetrievalStore::new(3);
        store
            .append(
                vec!["première clause".into(), "second clause".into()],
                vec![vec![0.1, 0.2, 0.3], vec![-1.0, 0.0, 2.5]],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let snapshots = store_in(&dir);
        snapshots.save(&sample()).unwrap();

        let loaded = snapshots.load().unwrap().unwrap();
        assert_eq!(loaded.dimension(), 3);
        assert_eq!(loaded.index_size(), 2);
        assert_eq!(loaded.chunk(0).unwrap().text, "première clause");
        assert_eq!(loaded.index().as_raw(), sample().index().as_raw());
        assert!(!dir.path().join("vector_index.bin.tmp").exists());
    }

    #[test]
    fn test_chunks_file_is_plain_json_list() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).save(&sample()).unwrap();
        let raw = fs::read_to_string(dir.path().join("chunks.json")).unwrap();
        let texts: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(texts, vec!["première clause", "second clause"]);
        assert!(raw.contains("première"));
    }

    #[test]
    fn test_neither_file_means_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn test_one_file_missing_means_empty() {
        let dir = TempDir::new().unwrap();
        let snapshots = store_in(&dir);
        snapshots.save(&sample()).unwrap();
        fs::remove_file(dir.path().join("chunks.json")).unwrap();
        assert!(snapshots.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_index_means_empty() {
        let dir = TempDir::new().unwrap();
        let snapshots = store_in(&dir);
        snapshots.save(&sample()).unwrap();
        fs::write(dir.path().join("vector_index.bin"), b"LEVXgarbage").unwrap();
        assert!(snapshots.load().unwrap().is_none());
    }

    #[test]
    fn test_more_chunks_than_vectors_means_empty() {
        let dir = TempDir::new().unwrap();
        let snapshots = store_in(&dir);
        snapshots.save(&sample()).unwrap();
        fs::write(dir.path().join("chunks.json"), r#"["a", "b", "c"]"#).unwrap();
        assert!(snapshots.load().unwrap().is_none());
    }

    #[test]
    fn test_interrupted_save_keeps_previous_rows() {
        let dir = TempDir::new().unwrap();
        let snapshots = store_in(&dir);
        let mut store = sample();
        snapshots.save(&store).unwrap();
        let old_chunks = fs::read(dir.path().join("chunks.json")).unwrap();

        store
            .append(vec!["third clause".into()], vec![vec![5.0, 5.0, 5.0]])
            .unwrap();
        snapshots.save(&store).unwrap();
        // new index on disk, chunks file from the save before
        fs::write(dir.path().join("chunks.json"), old_chunks).unwrap();

        let loaded = snapshots.load().unwrap().unwrap();
        assert_eq!(loaded.index_size(), 2);
        assert_eq!(loaded.chunks_stored(), 2);
        assert_eq!(loaded.chunk(1).unwrap().text, "second clause");
        assert_eq!(loaded.index().as_raw(), sample().index().as_raw());
    }

    #[test]
    fn test_decode_rejects_bad_headers() {
        let good = encode_index(sample().index());
        assert!(decode_index(&good).is_ok());
        assert!(decode_index(&good[..10]).is_err());

        let mut wrong_magic = good.clone();
        wrong_magic[0] = b'X';
        assert!(decode_index(&wrong_magic).is_err());

        let mut wrong_version = good.clone();
        wrong_version[4] = 9;
        assert!(decode_index(&wrong_version).is_err());

        assert!(decode_index(&good[..good.len() - 4]).is_err());
    }
}
