//! Generation-stamped visited marks for graph traversal.
//!
//! One stamp per node. Starting a new query bumps the generation instead of
//! zeroing the array; a full wipe only happens when the u16 counter wraps.

#[derive(Debug)]
pub struct VisitedMarks {
    stamps: Vec<u16>,
    generation: u16,
}

impl VisitedMarks {
    pub fn new(nodes: usize) -> Self {
        Self {
            stamps: vec![0u16; nodes],
            generation: 1,
        }
    }

    /// Prepares the marks for a traversal over `nodes` nodes, all unvisited.
    pub fn reset(&mut self, nodes: usize) {
        if nodes > self.stamps.len() {
            self.stamps.resize(nodes, 0);
        }
        if self.generation == u16::MAX {
            self.stamps.fill(0);
            self.generation = 1;
        } else {
            self.generation += 1;
        }
    }

    /// Marks `node` visited. Returns `true` if it was not visited before.
    #[inline]
    pub fn mark(&mut self, node: u32) -> bool {
        let stamp = &mut self.stamps[node as usize];
        if *stamp == self.generation {
            false
        } else {
            *stamp = self.generation;
            true
        }
    }

    #[inline]
    pub fn is_marked(&self, node: u32) -> bool {
        self.stamps
            .get(node as usize)
            .is_some_and(|&s| s == self.generation)
    }
}

impl Default for VisitedMarks {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_reset() {
        let mut marks = VisitedMarks::new(8);
        marks.reset(8);
        assert!(marks.mark(3));
        assert!(!marks.mark(3));
        assert!(marks.is_marked(3));

        marks.reset(8);
        assert!(!marks.is_marked(3));
        assert!(marks.mark(3));
    }

    #[test]
    fn test_reset_grows_to_corpus() {
        let mut marks = VisitedMarks::default();
        marks.reset(5);
        assert!(marks.mark(4));
    }

    #[test]
    fn test_generation_wraps_with_full_wipe() {
        let mut marks = VisitedMarks::new(4);
        while marks.generation != u16::MAX {
            marks.reset(4);
        }
        marks.mark(2);
        marks.reset(4);
        assert_eq!(marks.generation, 1);
        assert!(marks.mark(2));
    }
}
