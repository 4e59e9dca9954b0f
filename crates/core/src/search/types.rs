//! Ranked search result types.
//!
//! Results are two parallel sequences of length `k`: identifiers and natural
//! scores (ascending distance for squared Euclidean, descending similarity for
//! inner product). Slots without a real candidate hold [`SENTINEL_ID`] and
//! [`SENTINEL_SCORE`].

use crate::config::{SENTINEL_ID, SENTINEL_SCORE};
use crate::distance::Metric;

/// A single ranked hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// External identifier of the matched vector.
    pub id: u64,
    /// Natural score under the index metric.
    pub score: f32,
}

impl Neighbor {
    /// Returns `true` for a padding slot.
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID && self.score == SENTINEL_SCORE
    }
}

/// Top-k result of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub ids: Vec<u64>,
    pub scores: Vec<f32>,
}

impl SearchResult {
    /// A result of `k` padding slots, ready to be filled.
    pub fn padded(k: usize) -> Self {
        Self {
            ids: vec![SENTINEL_ID; k],
            scores: vec![SENTINEL_SCORE; k],
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Hits in rank order, padding included.
    pub fn hits(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.ids
            .iter()
            .zip(&self.scores)
            .map(|(&id, &score)| Neighbor { id, score })
    }

    /// Hits in rank order, padding excluded.
    pub fn real_hits(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.hits().filter(|n| !n.is_sentinel())
    }
}

/// Top-k results of a row-major batch of queries, `k` slots per query.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSearchResult {
    pub queries: usize,
    pub k: usize,
    pub ids: Vec<u64>,
    pub scores: Vec<f32>,
}

impl BatchSearchResult {
    pub fn padded(queries: usize, k: usize) -> Self {
        Self {
            queries,
            k,
            ids: vec![SENTINEL_ID; queries * k],
            scores: vec![SENTINEL_SCORE; queries * k],
        }
    }

    /// Number of queries.
    pub fn len(&self) -> usize {
        self.queries
    }

    pub fn is_empty(&self) -> bool {
        self.queries == 0
    }

    /// Ids and scores of query `i`.
    pub fn row(&self, i: usize) -> (&[u64], &[f32]) {
        let range = i * self.k..(i + 1) * self.k;
        (&self.ids[range.clone()], &self.scores[range])
    }
}

/// Writes `ranked` `(badness, id)` pairs (best first) into the output slots,
/// converting badness back to `metric`'s natural score, and pads the slots
/// left over with the sentinel convention.
pub(crate) fn write_ranked<I>(ranked: I, metric: Metric, out_ids: &mut [u64], out_scores: &mut [f32])
where
    I: IntoIterator<Item = (f32, u64)>,
{
    let mut written = 0;
    for ((badness, id), (slot_id, slot_score)) in ranked
        .into_iter()
        .zip(out_ids.iter_mut().zip(out_scores.iter_mut()))
    {
        *slot_id = id;
        *slot_score = metric.from_badness(badness);
        written += 1;
    }
    out_ids[written..].fill(SENTINEL_ID);
    out_scores[written..].fill(SENTINEL_SCORE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ranked_pads_remaining_slots() {
        let mut ids = [0u64; 4];
        let mut scores = [0.0f32; 4];
        write_ranked(
            vec![(0.0, 5), (1.5, 9)],
            Metric::L2Squared,
            &mut ids,
            &mut scores,
        );
        assert_eq!(ids, [5, 9, SENTINEL_ID, SENTINEL_ID]);
        assert_eq!(scores, [0.0, 1.5, f32::INFINITY, f32::INFINITY]);
    }

    #[test]
    fn test_write_ranked_restores_similarity_sign() {
        let mut ids = [0u64; 2];
        let mut scores = [0.0f32; 2];
        write_ranked(
            vec![(-3.0, 1), (-2.0, 2)],
            Metric::InnerProduct,
            &mut ids,
            &mut scores,
        );
        assert_eq!(scores, [3.0, 2.0]);
    }

    #[test]
    fn test_write_ranked_truncates_to_slots() {
        let mut ids = [0u64; 1];
        let mut scores = [0.0f32; 1];
        write_ranked(
            vec![(0.5, 1), (0.7, 2)],
            Metric::L2Squared,
            &mut ids,
            &mut scores,
        );
        assert_eq!(ids, [1]);
    }

    #[test]
    fn test_real_hits_skip_padding() {
        let mut result = SearchResult::padded(3);
        result.ids[0] = 4;
        result.scores[0] = 0.25;
        let hits: Vec<Neighbor> = result.real_hits().collect();
        assert_eq!(hits, vec![Neighbor { id: 4, score: 0.25 }]);
        assert_eq!(result.hits().count(), 3);
    }

    #[test]
    fn test_batch_rows() {
        let mut batch = BatchSearchResult::padded(2, 2);
        batch.ids[2] = 11;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.row(1).0, &[11, SENTINEL_ID]);
    }
}
