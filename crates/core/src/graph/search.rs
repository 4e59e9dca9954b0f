//! Best-first query routing over the graph.
//!
//! Starting from the configured entry point, the node with the lowest badness
//! on the frontier is popped and admitted to a best-set of capacity
//! `ef = min(ef_search, len)`; its unvisited neighbors are marked visited right
//! away (so no node is enqueued twice) and pushed to the frontier. The walk
//! stops when the frontier drains or the best-set is full. Recall depends
//! entirely on the connectivity built at insertion time.

use super::visited::VisitedMarks;
use super::ApproximateGraphIndex;
use crate::error::Result;
use crate::index::check_search_args;
use crate::search::types::write_ranked;
use crate::search::TopK;
use ordered_float::OrderedFloat;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

thread_local! {
    /// Per-thread visited marks, reused across queries on the same thread.
    static SEARCH_VISITED: RefCell<VisitedMarks> = RefCell::new(VisitedMarks::default());
}

/// A frontier entry. Ordered so that `BinaryHeap` pops the lowest badness
/// first, lower internal index on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    badness: OrderedFloat<f32>,
    node: u32,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .badness
            .cmp(&self.badness)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ApproximateGraphIndex {
    pub(super) fn greedy_search(
        &self,
        query: &[f32],
        out_ids: &mut [u64],
        out_scores: &mut [f32],
    ) -> Result<()> {
        check_search_args(self.store.dim(), query, out_ids, out_scores)?;
        if out_ids.is_empty() {
            return Ok(());
        }
        let metric = self.config.metric;
        if self.store.is_empty() {
            write_ranked(std::iter::empty(), metric, out_ids, out_scores);
            return Ok(());
        }

        let best = SEARCH_VISITED.with(|cell| self.route(query, &mut cell.borrow_mut()));
        let ids = self.store.ids();
        write_ranked(
            best.into_iter()
                .map(|(badness, node)| (badness, ids[node as usize])),
            metric,
            out_ids,
            out_scores,
        );
        Ok(())
    }

    /// Walks the graph and returns the best-set as `(badness, node)`, best first.
    fn route(&self, query: &[f32], visited: &mut VisitedMarks) -> Vec<(f32, u32)> {
        let len = self.store.len();
        let ef = self.config.ef_search.min(len);
        let entry = self.entry_node();
        visited.reset(len);

        let mut frontier = BinaryHeap::new();
        let mut best = TopK::new(ef);

        visited.mark(entry);
        frontier.push(Candidate {
            badness: OrderedFloat(self.badness_to(query, entry)),
            node: entry,
        });

        while !best.is_full() {
            let Some(current) = frontier.pop() else {
                break;
            };
            best.push(current.badness.0, current.node);

            for &nb in &self.neighbors[current.node as usize] {
                if visited.mark(nb) {
                    frontier.push(Candidate {
                        badness: OrderedFloat(self.badness_to(query, nb)),
                        node: nb,
                    });
                }
            }
        }

        best.into_sorted_vec()
    }

    /// Configured entry point, or node 0 if it has not been inserted yet.
    fn entry_node(&self) -> u32 {
        let entry = self.config.entry_point;
        if (entry as usize) < self.store.len() {
            entry
        } else {
            tracing::debug!(
                entry_point = entry,
                size = self.store.len(),
                "entry point not inserted yet, routing from node 0"
            );
            0
        }
    }

    #[inline]
    fn badness_to(&self, query: &[f32], node: u32) -> f32 {
        self.kernel.badness(query, self.store.row(node as usize))
    }
}
