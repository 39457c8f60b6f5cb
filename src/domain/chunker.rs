//! Fixed-stride character chunking.
//!
//! Text is cut every `size` characters (Unicode scalar values, not bytes).
//! Each slice is trimmed and dropped if blank, but trimming never moves the
//! next slice boundary.

use crate::domain::values::chunk_size::ChunkSize;

/// Raw, untrimmed slices with their starting character offset.
pub fn chunk_spans(text: &str, size: ChunkSize) -> Vec<(usize, &str)> {
    let size = size.value();
    let starts: Vec<usize> = text
        .char_indices()
        .step_by(size)
        .map(|(byte, _)| byte)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            (i * size, &text[start..end])
        })
        .collect()
}

/// Split `text` into trimmed, non-empty chunks of at most `size` characters.
pub fn chunk_text(text: &str, size: ChunkSize) -> Vec<String> {
    chunk_spans(text, size)
        .into_iter()
        .map(|(_, slice)| slice.trim())
        .filter(|slice| !slice.is_empty())
        .map(str::to_string)
        .collect()
}
