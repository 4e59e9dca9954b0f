//! # vectorcore-core
//!
//! Embeddable in-memory nearest-neighbor engine: a contiguous, 32-byte-aligned
//! f32 embedding store, SIMD distance kernels with a scalar fallback, bounded
//! top-k selection, an exact brute-force index, and a single-layer proximity
//! graph for approximate search.
//!
//! Scores follow each metric's natural polarity: squared Euclidean distance is
//! returned ascending, inner-product similarity descending. Internally every
//! ranking uses a "badness" value where smaller is always better.
//!
//! ```
//! use vectorcore::{BruteForceIndex, Metric, VectorIndex};
//!
//! let mut index = BruteForceIndex::new(4, Metric::L2Squared)?;
//! index.add(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0], None)?;
//! let result = index.search(&[1.0, 0.0, 0.0, 0.0], 2)?;
//! assert_eq!(result.ids, vec![1, 0]);
//! assert_eq!(result.scores, vec![0.0, 1.0]);
//! # Ok::<(), vectorcore::Error>(())
//! ```

/// Global configuration constants: defaults, alignment, and sentinel values.
pub mod config;
/// Distance metrics and ISA-dispatched kernels.
pub mod distance;
/// Crate error type.
pub mod error;
/// Exact brute-force index.
pub mod flat;
/// Single-layer approximate graph index.
pub mod graph;
/// The `VectorIndex` trait shared by both indices.
pub mod index;
/// Top-k selection and result types.
pub mod search;
/// Aligned, append-only embedding storage.
pub mod storage;

pub use distance::{DistanceKernel, Isa, Metric};
pub use error::{Error, Result};
pub use flat::BruteForceIndex;
pub use graph::{ApproximateGraphIndex, GraphConfig};
pub use index::VectorIndex;
pub use search::{BatchSearchResult, Neighbor, SearchResult, TopK};
pub use storage::EmbeddingStore;
