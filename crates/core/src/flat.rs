//! Exact brute-force index.
//!
//! Every query is scored against every stored vector and the best `k` are kept
//! with one [`TopK`](crate::search::TopK) selector. Cost is `O(len * dim)` per
//! query; this index is the ground truth the graph index's recall is measured
//! against.

use crate::distance::{DistanceKernel, Metric};
use crate::error::Result;
use crate::index::{check_search_args, VectorIndex};
use crate::search::select_by;
use crate::search::types::write_ranked;
use crate::storage::EmbeddingStore;

/// Exact nearest-neighbor index over a contiguous embedding store.
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    store: EmbeddingStore,
    kernel: DistanceKernel,
}

impl BruteForceIndex {
    /// Creates an empty index of `dim`-dimensional vectors under `metric`.
    pub fn new(dim: usize, metric: Metric) -> Result<Self> {
        Self::with_kernel(dim, DistanceKernel::new(metric))
    }

    /// Creates an empty index using an explicitly resolved kernel.
    pub fn with_kernel(dim: usize, kernel: DistanceKernel) -> Result<Self> {
        Ok(Self {
            store: EmbeddingStore::new(dim)?,
            kernel,
        })
    }

    /// Underlying embedding store.
    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    pub fn kernel(&self) -> &DistanceKernel {
        &self.kernel
    }
}

impl VectorIndex for BruteForceIndex {
    fn dim(&self) -> usize {
        self.store.dim()
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn metric(&self) -> Metric {
        self.kernel.metric()
    }

    fn add(&mut self, vectors: &[f32], ids: Option<&[u64]>) -> Result<()> {
        if vectors.is_empty() && ids.map_or(true, |ids| ids.is_empty()) {
            return Ok(());
        }
        self.store.append(vectors, ids)?;
        Ok(())
    }

    fn search_into(
        &self,
        query: &[f32],
        out_ids: &mut [u64],
        out_scores: &mut [f32],
    ) -> Result<()> {
        check_search_args(self.dim(), query, out_ids, out_scores)?;
        let k = out_ids.len();
        if k == 0 {
            return Ok(());
        }

        let kk = k.min(self.store.len());
        let ranked = select_by(kk, 0..self.store.len(), |&i| {
            self.kernel.badness(query, self.store.row(i))
        });
        let ids = self.store.ids();
        write_ranked(
            ranked.into_iter().map(|(badness, i)| (badness, ids[i])),
            self.metric(),
            out_ids,
            out_scores,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SENTINEL_ID;
    use crate::error::Error;

    fn three_basis_index(metric: Metric) -> BruteForceIndex {
        let mut index = BruteForceIndex::new(4, metric).unwrap();
        let data = [
            0.0, 0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0,
        ];
        index.add(&data, None).unwrap();
        index
    }

    #[test]
    fn test_l2_example_ranking() {
        let index = three_basis_index(Metric::L2Squared);
        let result = index.search(&[1.0, 0.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(result.ids, vec![1, 0]);
        assert_eq!(result.scores, vec![0.0, 1.0]);
    }

    #[test]
    fn test_inner_product_ranks_descending() {
        let mut index = BruteForceIndex::new(2, Metric::InnerProduct).unwrap();
        index
            .add(&[1.0, 0.0, 3.0, 0.0, 2.0, 0.0], Some(&[10, 30, 20]))
            .unwrap();
        let result = index.search(&[1.0, 0.0], 3).unwrap();
        assert_eq!(result.ids, vec![30, 20, 10]);
        assert_eq!(result.scores, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_k_larger_than_corpus_is_padded() {
        let index = three_basis_index(Metric::L2Squared);
        let result = index.search(&[0.0, 0.0, 0.0, 0.0], 5).unwrap();
        assert_eq!(result.ids[..3], [0, 1, 2]);
        assert_eq!(result.ids[3..], [SENTINEL_ID, SENTINEL_ID]);
        assert!(result.scores[3..].iter().all(|s| *s == f32::INFINITY));
    }

    #[test]
    fn test_zero_k_is_noop() {
        let index = three_basis_index(Metric::L2Squared);
        let result = index.search(&[0.0; 4], 0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_index_pads_everything() {
        let index = BruteForceIndex::new(3, Metric::L2Squared).unwrap();
        let result = index.search(&[0.0; 3], 2).unwrap();
        assert_eq!(result.ids, vec![SENTINEL_ID, SENTINEL_ID]);
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let index = three_basis_index(Metric::L2Squared);
        assert!(matches!(
            index.search(&[1.0, 0.0], 1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mismatched_output_buffers_rejected() {
        let index = three_basis_index(Metric::L2Squared);
        let mut ids = [0u64; 2];
        let mut scores = [0.0f32; 3];
        assert!(index.search_into(&[0.0; 4], &mut ids, &mut scores).is_err());
    }

    #[test]
    fn test_empty_add_is_noop_and_bad_ids_rejected() {
        let mut index = three_basis_index(Metric::L2Squared);
        index.add(&[], None).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.add(&[], Some(&[1])).is_err());
        assert!(index.add(&[1.0; 4], Some(&[1, 2])).is_err());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_sequential_ids_continue_after_explicit_ids() {
        let mut index = BruteForceIndex::new(1, Metric::L2Squared).unwrap();
        index.add(&[5.0], Some(&[100])).unwrap();
        index.add(&[6.0, 7.0], None).unwrap();
        assert_eq!(index.store().ids(), &[100, 1, 2]);
    }

    #[test]
    fn test_batch_matches_single_queries() {
        let index = three_basis_index(Metric::L2Squared);
        let queries = [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 0.9, 0.0, 0.0,
        ];
        let batch = index.search_batch(&queries, 2).unwrap();
        assert_eq!(batch.len(), 2);
        for (i, q) in queries.chunks_exact(4).enumerate() {
            let single = index.search(q, 2).unwrap();
            let (ids, scores) = batch.row(i);
            assert_eq!(ids, single.ids.as_slice());
            assert_eq!(scores, single.scores.as_slice());
        }
    }

    #[test]
    fn test_batch_rejects_ragged_queries() {
        let index = three_basis_index(Metric::L2Squared);
        assert!(index.search_batch(&[0.0; 5], 1).is_err());
    }
}
