//! Common interface of the exact and graph indices.

use crate::distance::Metric;
use crate::error::{Error, Result};
use crate::search::{BatchSearchResult, SearchResult};

/// An append-only vector index answering top-k queries.
///
/// All methods are synchronous and run to completion on the calling thread.
/// `&self` searches may run concurrently with each other; `add` needs
/// `&mut self`, so the borrow checker serializes it against every reader.
pub trait VectorIndex {
    /// Fixed vector dimension.
    fn dim(&self) -> usize;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metric(&self) -> Metric;

    /// Appends a row-major batch of vectors. `ids`, when given, must hold one
    /// identifier per row; otherwise ids continue sequentially from `len()`.
    /// An empty batch is a no-op. On error the index is left unchanged.
    fn add(&mut self, vectors: &[f32], ids: Option<&[u64]>) -> Result<()>;

    /// Ranks the index against `query`, writing `k = out_ids.len()` results.
    /// `k == 0` is a no-op; slots beyond the available results are padded.
    fn search_into(&self, query: &[f32], out_ids: &mut [u64], out_scores: &mut [f32])
        -> Result<()>;

    /// Top-`k` ids and scores for one query.
    fn search(&self, query: &[f32], k: usize) -> Result<SearchResult> {
        let mut result = SearchResult::padded(k);
        self.search_into(query, &mut result.ids, &mut result.scores)?;
        Ok(result)
    }

    /// Top-`k` for each row of a row-major batch of queries. Rows are
    /// searched independently.
    fn search_batch(&self, queries: &[f32], k: usize) -> Result<BatchSearchResult> {
        let dim = self.dim();
        if queries.len() % dim != 0 {
            return Err(Error::invalid(format!(
                "query batch of {} floats is not a multiple of dim {}",
                queries.len(),
                dim
            )));
        }
        let rows = queries.len() / dim;
        let mut result = BatchSearchResult::padded(rows, k);
        if k == 0 {
            return Ok(result);
        }
        for ((query, ids), scores) in queries
            .chunks_exact(dim)
            .zip(result.ids.chunks_exact_mut(k))
            .zip(result.scores.chunks_exact_mut(k))
        {
            self.search_into(query, ids, scores)?;
        }
        Ok(result)
    }
}

/// Shared argument checks of `search_into`.
pub(crate) fn check_search_args(
    dim: usize,
    query: &[f32],
    out_ids: &[u64],
    out_scores: &[f32],
) -> Result<()> {
    if query.len() != dim {
        return Err(Error::dimension_mismatch(dim, query.len()));
    }
    if out_ids.len() != out_scores.len() {
        return Err(Error::invalid(format!(
            "output buffers differ in length: {} ids, {} scores",
            out_ids.len(),
            out_scores.len()
        )));
    }
    Ok(())
}
