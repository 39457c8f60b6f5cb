use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which embedding adapter backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local ONNX sentence-transformer model.
    FastEmbed,
    /// OpenAI-compatible `/v1/embeddings` HTTP API.
    OpenAi,
    /// Deterministic feature hashing, no model required.
    Hashing,
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::FastEmbed => write!(f, "fastembed"),
            EmbeddingBackend::OpenAi => write!(f, "openai"),
            EmbeddingBackend::Hashing => write!(f, "hashing"),
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fastembed" | "local" => Ok(EmbeddingBackend::FastEmbed),
            "openai" => Ok(EmbeddingBackend::OpenAi),
            "hashing" => Ok(EmbeddingBackend::Hashing),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

/// Which answer generator backs `/query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorBackend {
    Gemini,
    None,
}

impl fmt::Display for GeneratorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorBackend::Gemini => write!(f, "gemini"),
            GeneratorBackend::None => write!(f, "none"),
        }
    }
}

impl FromStr for GeneratorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(GeneratorBackend::Gemini),
            "none" | "noop" | "off" => Ok(GeneratorBackend::None),
            _ => Err(format!("Unknown generator: {s}")),
        }
    }
}
