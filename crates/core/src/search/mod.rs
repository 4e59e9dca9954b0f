//! Search primitives: bounded top-k selection and ranked result types.

/// Bounded max-heap selection over badness.
pub mod topk;
/// Ranked results and sentinel padding.
pub mod types;

pub use topk::{select_by, TopK};
pub use types::{BatchSearchResult, Neighbor, SearchResult};
