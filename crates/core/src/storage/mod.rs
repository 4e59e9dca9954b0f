//! Storage layer: one contiguous, aligned buffer holding every embedding.
//!
//! Embeddings are never stored as a vector of vectors; graph adjacency and
//! other metadata live outside this buffer.

/// Alignment-requested flat f32 buffer.
pub mod aligned;
/// Embedding store with external identifiers.
pub mod store;

pub use aligned::AlignedBuffer;
pub use store::EmbeddingStore;
