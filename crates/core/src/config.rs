//! Global configuration constants for vectorcore.
//!
//! Tuning defaults and memory-layout parameters are defined here. Per-index
//! runtime configuration lives in [`crate::graph::GraphConfig`].

/// Default maximum forward adjacency size of a graph node.
///
/// Higher values give each inserted node more outgoing links at the cost of
/// memory and search work. Default: 16.
pub const DEFAULT_M: usize = 16;

/// Default search-time candidate budget (ef) of the graph index.
///
/// The effective budget of a query is `min(ef_search, corpus size)`.
pub const DEFAULT_EF_SEARCH: usize = 64;

/// Default entry point of graph routing: the first inserted vector.
pub const DEFAULT_ENTRY_POINT: u32 = 0;

/// Number of f32 elements processed per vectorized kernel step.
pub const LANE_WIDTH: usize = 8;

/// Byte alignment requested for the embedding buffer (one AVX2 register).
pub const STORE_ALIGNMENT: usize = 32;

/// Identifier written into result slots that have no real candidate.
pub const SENTINEL_ID: u64 = u64::MAX;

/// Score written into result slots that have no real candidate.
pub const SENTINEL_SCORE: f32 = f32::INFINITY;
