//! Runtime settings, read from the environment once at startup.

use crate::domain::error::DomainError;
use crate::domain::values::backend::{EmbeddingBackend, GeneratorBackend};
use crate::domain::values::chunk_size::ChunkSize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_HASHING_DIMENSION: usize = 384;

#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    /// Provider default when unset.
    pub model: Option<String>,
    pub api_key: String,
    pub base_url: Option<String>,
    /// Vector size for the hashing backend, and for OpenAI-compatible models
    /// outside the built-in table. The local model always knows its own.
    pub dimension: Option<usize>,
    /// Where the local model downloads its weights.
    pub cache_dir: Option<PathBuf>,
    pub batch_size: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub backend: GeneratorBackend,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Holds `vector_index.bin` and `chunks.json`.
    pub data_dir: PathBuf,
    /// Uploaded originals are archived here.
    pub docs_dir: PathBuf,
    pub bind: String,
    pub chunk_size: ChunkSize,
    pub embedding: EmbeddingSettings,
    pub generator: GeneratorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            docs_dir: PathBuf::from("data/docs"),
            bind: DEFAULT_BIND.to_string(),
            chunk_size: ChunkSize::default(),
            embedding: EmbeddingSettings {
                backend: EmbeddingBackend::FastEmbed,
                model: None,
                api_key: String::new(),
                base_url: None,
                dimension: None,
                cache_dir: None,
                batch_size: 32,
                timeout: Duration::from_secs(120),
            },
            generator: GeneratorSettings {
                backend: GeneratorBackend::Gemini,
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: None,
                timeout: Duration::from_secs(60),
            },
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source. Missing keys keep their
    /// defaults; malformed values are a configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut s = Settings::default();

        if let Some(dir) = get("LEGALEASE_DATA_DIR") {
            s.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("LEGALEASE_DOCS_DIR") {
            s.docs_dir = PathBuf::from(dir);
        }
        if let Some(bind) = get("LEGALEASE_BIND") {
            s.bind = bind;
        }
        if let Some(size) = get("LEGALEASE_CHUNK_SIZE") {
            let size: usize = parse("LEGALEASE_CHUNK_SIZE", &size)?;
            s.chunk_size = ChunkSize::new(size).map_err(DomainError::Configuration)?;
        }

        if let Some(backend) = get("LEGALEASE_EMBEDDING_PROVIDER") {
            s.embedding.backend = backend.parse().map_err(DomainError::Configuration)?;
        }
        s.embedding.model = get("LEGALEASE_EMBEDDING_MODEL");
        if let Some(key) = get("LEGALEASE_EMBEDDING_API_KEY") {
            s.embedding.api_key = key;
        }
        s.embedding.base_url = get("LEGALEASE_EMBEDDING_BASE_URL");
        if let Some(dim) = get("LEGALEASE_EMBEDDING_DIMENSION") {
            let dim: usize = parse("LEGALEASE_EMBEDDING_DIMENSION", &dim)?;
            if dim == 0 {
                return Err(DomainError::Configuration(
                    "LEGALEASE_EMBEDDING_DIMENSION must be positive".into(),
                ));
            }
            s.embedding.dimension = Some(dim);
        }
        s.embedding.cache_dir = get("LEGALEASE_MODEL_CACHE_DIR").map(PathBuf::from);
        if let Some(batch) = get("LEGALEASE_EMBED_BATCH_SIZE") {
            s.embedding.batch_size = parse::<usize>("LEGALEASE_EMBED_BATCH_SIZE", &batch)?.max(1);
        }
        if let Some(secs) = get("LEGALEASE_EMBED_TIMEOUT_SECS") {
            s.embedding.timeout = Duration::from_secs(parse("LEGALEASE_EMBED_TIMEOUT_SECS", &secs)?);
        }

        if let Some(backend) = get("LEGALEASE_GENERATOR") {
            s.generator.backend = backend.parse().map_err(DomainError::Configuration)?;
        }
        s.generator.api_key = get("GEMINI_API_KEY");
        if let Some(model) = get("GEMINI_MODEL") {
            s.generator.model = model;
        }
        s.generator.base_url = get("GEMINI_BASE_URL");
        if let Some(secs) = get("LEGALEASE_GENERATION_TIMEOUT_SECS") {
            s.generator.timeout =
                Duration::from_secs(parse("LEGALEASE_GENERATION_TIMEOUT_SECS", &secs)?);
        }

        Ok(s)
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("vector_index.bin")
    }

    pub fn chunks_path(&self) -> PathBuf {
        self.data_dir.join("chunks.json")
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, DomainError> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::Configuration(format!("{key}: cannot parse {value:?}")))
}
