use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use std::time::Duration;

/// Embed `texts` in fixed-size batches, each bounded by `timeout`. Output
/// order matches input order. Every vector is checked against the
/// provider's declared dimension.
pub async fn embed_in_batches(
    embedder: &dyn EmbeddingProvider,
    texts: &[String],
    input_type: InputType,
    batch_size: usize,
    timeout: Duration,
) -> Result<Vec<Vec<f32>>, DomainError> {
    let expected = embedder.dimension();
    let mut out = Vec::with_capacity(texts.len());

    for batch in texts.chunks(batch_size.max(1)) {
        let vectors = tokio::time::timeout(timeout, embedder.embed(batch, input_type))
            .await
            .map_err(|_| DomainError::Timeout(timeout.as_secs()))??;

        if vectors.len() != batch.len() {
            return Err(DomainError::Embedding(format!(
                "{} returned {} vectors for {} texts",
                embedder.name(),
                vectors.len(),
                batch.len()
            )));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(DomainError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }
        out.extend(vectors);
    }

    Ok(out)
}
