//! Retrieval index adapter.
//!
//! The pipeline builds one index per document from the flattened chunks of
//! every section. Nothing downstream queries it yet; rewriting with retrieved
//! context is an extension point behind this trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::AppError;

/// Opaque handle to a built index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexHandle {
    /// SHA-256 over the chunk sequence; equal for indexes built from the same chunks.
    pub fingerprint: String,
    pub chunk_count: usize,
    #[serde(skip)]
    chunks: Arc<[String]>,
}

impl IndexHandle {
    #[allow(dead_code)]
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn build(&self, chunks: Vec<String>) -> Result<IndexHandle, AppError>;
}

/// In-process index that keeps chunks as an unordered bag of text.
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryIndex;

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn build(&self, chunks: Vec<String>) -> Result<IndexHandle, AppError> {
        Ok(IndexHandle {
            fingerprint: fingerprint(&chunks),
            chunk_count: chunks.len(),
            chunks: chunks.into(),
        })
    }
}

/// Length-prefixed so that `["ab"]` and `["a", "b"]` hash differently.
fn fingerprint(chunks: &[String]) -> String {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update((chunk.len() as u64).to_le_bytes());
        hasher.update(chunk.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<String> {
        vec!["Built a compiler".to_string(), "Rust, Go".to_string()]
    }

    #[tokio::test]
    async fn test_rebuild_is_idempotent() {
        let a = InMemoryIndex.build(sample()).await.unwrap();
        let b = InMemoryIndex.build(sample()).await.unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a.chunk_count, 2);
        assert_eq!(a.chunks(), b.chunks());
    }

    #[tokio::test]
    async fn test_different_chunks_differ() {
        let a = InMemoryIndex.build(sample()).await.unwrap();
        let b = InMemoryIndex.build(vec!["other".to_string()]).await.unwrap();
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[tokio::test]
    async fn test_empty_index() {
        let handle = InMemoryIndex.build(Vec::new()).await.unwrap();
        assert_eq!(handle.chunk_count, 0);
        assert!(handle.chunks().is_empty());
    }

    #[tokio::test]
    async fn test_fingerprint_is_stable_sha256() {
        let handle = InMemoryIndex.build(vec!["a".to_string()]).await.unwrap();
        assert_eq!(
            handle.fingerprint,
            "ae6121c88ba555f64c3d812123eb799d128015541f850c5e9bf1d54c08ad8481"
        );
    }

    #[tokio::test]
    async fn test_chunk_boundaries_change_fingerprint() {
        let joined = InMemoryIndex.build(vec!["ab".to_string()]).await.unwrap();
        let split = InMemoryIndex
            .build(vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_ne!(joined.fingerprint, split.fingerprint);
    }
}
