//! Graph insertion.
//!
//! Each new node is scored against every existing node (there is no
//! hierarchical shortcut at insertion time, so building `n` nodes costs
//! `O(n² · dim)`). The best `min(M, idx)` become its forward adjacency. Back
//! edges go only to neighbors holding fewer than `M` entries and are never
//! pruned, so a node inserted once `M` earlier nodes exist starts with a full
//! list and never receives a back edge.

use super::ApproximateGraphIndex;
use crate::error::{Error, Result};
use crate::search::select_by;

impl ApproximateGraphIndex {
    /// Appends a row-major batch and links each new node in insertion order.
    /// All validation happens before the store or the graph is touched.
    pub(super) fn insert_batch(&mut self, vectors: &[f32], ids: Option<&[u64]>) -> Result<()> {
        if vectors.is_empty() && ids.map_or(true, |ids| ids.is_empty()) {
            return Ok(());
        }

        // Adjacency stores internal indices as u32.
        let rows = self.store.rows_in(vectors)?;
        let new_len = self.store.len() as u64 + rows as u64;
        if new_len > u64::from(u32::MAX) + 1 {
            return Err(Error::invalid(format!(
                "graph capacity exceeded: {new_len} nodes"
            )));
        }

        let added = self.store.append(vectors, ids)?;
        self.neighbors.reserve_exact(added.len());
        for idx in added {
            self.link_node(idx);
        }
        Ok(())
    }

    /// Links node `idx`, whose vector is already stored, to the graph.
    fn link_node(&mut self, idx: usize) {
        debug_assert_eq!(self.neighbors.len(), idx);
        if idx == 0 {
            self.neighbors.push(Vec::new());
            return;
        }

        let m = self.config.m;
        let vector = self.store.row(idx);
        let forward: Vec<u32> = select_by(m.min(idx), 0..idx as u32, |&j| {
            self.kernel.badness(vector, self.store.row(j as usize))
        })
        .into_iter()
        .map(|(_, j)| j)
        .collect();

        let mut back_edges = 0usize;
        for &nb in &forward {
            let adjacency = &mut self.neighbors[nb as usize];
            if adjacency.len() < m {
                adjacency.push(idx as u32);
                back_edges += 1;
            }
        }
        tracing::trace!(
            node = idx,
            forward = forward.len(),
            back_edges,
            "linked graph node"
        );
        self.neighbors.push(forward);
    }
}
