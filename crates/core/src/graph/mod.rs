//! Single-layer proximity graph for approximate nearest neighbor search.
//!
//! Embeddings live in the shared [`EmbeddingStore`]; the graph keeps one
//! adjacency list of internal indices per stored vector, separate from the
//! embedding buffer.
//!
//! Construction is incremental: each new vector is scored against every earlier
//! one, its best `min(M, idx)` become its forward adjacency, and it is appended
//! to each of those neighbors' lists only while that list holds fewer than `M`
//! entries. Queries walk the graph best-first from a fixed entry point with a
//! bounded candidate budget (ef). There is no hierarchy, no randomized level
//! assignment, and no neighbor pruning, so the result is deterministic for a
//! given insertion order but not guaranteed to be the true top-k.

/// Insertion: full-scan neighbor selection and capped back edges.
pub mod build;
/// Graph index configuration.
pub mod config;
/// Best-first query routing.
pub mod search;
/// Generation-stamped visited marks.
pub mod visited;

pub use config::GraphConfig;

use crate::distance::{DistanceKernel, Metric};
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::storage::EmbeddingStore;

/// Approximate nearest-neighbor index over a single-layer graph.
#[derive(Debug, Clone)]
pub struct ApproximateGraphIndex {
    config: GraphConfig,
    store: EmbeddingStore,
    kernel: DistanceKernel,
    /// Adjacency per internal index, holding internal indices (never external ids).
    neighbors: Vec<Vec<u32>>,
}

impl ApproximateGraphIndex {
    /// Creates an empty graph of `dim`-dimensional vectors.
    pub fn new(dim: usize, config: GraphConfig) -> Result<Self> {
        Self::with_kernel(dim, config, DistanceKernel::new(config.metric))
    }

    /// Creates an empty graph with default configuration (M=16, ef=64, entry 0).
    pub fn with_default_config(dim: usize, metric: Metric) -> Result<Self> {
        Self::new(dim, GraphConfig::default().metric(metric))
    }

    /// Creates an empty graph using an explicitly resolved kernel, which must
    /// implement the configured metric.
    pub fn with_kernel(dim: usize, config: GraphConfig, kernel: DistanceKernel) -> Result<Self> {
        config.validate()?;
        if kernel.metric() != config.metric {
            return Err(Error::invalid(format!(
                "kernel metric {} does not match configured metric {}",
                kernel.metric(),
                config.metric
            )));
        }
        Ok(Self {
            config,
            store: EmbeddingStore::new(dim)?,
            kernel,
            neighbors: Vec::new(),
        })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Underlying embedding store.
    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    pub fn kernel(&self) -> &DistanceKernel {
        &self.kernel
    }

    /// Adjacency of internal index `i`.
    pub fn neighbors(&self, i: usize) -> Result<&[u32]> {
        self.neighbors
            .get(i)
            .map(Vec::as_slice)
            .ok_or(Error::OutOfRange {
                index: i,
                len: self.neighbors.len(),
            })
    }
}

impl VectorIndex for ApproximateGraphIndex {
    fn dim(&self) -> usize {
        self.store.dim()
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn metric(&self) -> Metric {
        self.config.metric
    }

    fn add(&mut self, vectors: &[f32], ids: Option<&[u64]>) -> Result<()> {
        self.insert_batch(vectors, ids)
    }

    fn search_into(
        &self,
        query: &[f32],
        out_ids: &mut [u64],
        out_scores: &mut [f32],
    ) -> Result<()> {
        self.greedy_search(query, out_ids, out_scores)
    }
}
