//! Alignment-requested contiguous f32 buffer.
//!
//! Backed by a `Vec` of 32-byte-aligned lanes of [`LANE_WIDTH`] floats, viewed
//! as one flat `&[f32]`. The allocation therefore starts on a
//! [`STORE_ALIGNMENT`] boundary, and rows whose byte length is a multiple of 32
//! stay lane-aligned as well.

use crate::config::{LANE_WIDTH, STORE_ALIGNMENT};
use bytemuck::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C, align(32))]
struct Lane([f32; LANE_WIDTH]);

const _: () = assert!(std::mem::align_of::<Lane>() == STORE_ALIGNMENT);
const _: () = assert!(std::mem::size_of::<Lane>() == LANE_WIDTH * std::mem::size_of::<f32>());

/// Growable flat f32 buffer whose allocation is [`STORE_ALIGNMENT`]-aligned.
///
/// Growth reserves exactly what the incoming batch needs (no geometric
/// over-allocation), so bulk loads reallocate at most once per batch.
#[derive(Debug, Clone, Default)]
pub struct AlignedBuffer {
    lanes: Vec<Lane>,
    len: usize,
}

impl AlignedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer able to hold `floats` elements without reallocating.
    pub fn with_capacity(floats: usize) -> Self {
        Self {
            lanes: Vec::with_capacity(floats.div_ceil(LANE_WIDTH)),
            len: 0,
        }
    }

    /// Number of floats stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of floats the current allocation can hold.
    pub fn capacity(&self) -> usize {
        self.lanes.capacity() * LANE_WIDTH
    }

    /// All stored floats, back to back.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &bytemuck::cast_slice::<Lane, f32>(&self.lanes)[..self.len]
    }

    /// Appends `src` with a single copy, growing the allocation to the exact
    /// size required.
    pub fn extend_from_slice(&mut self, src: &[f32]) {
        let start = self.len;
        let end = start + src.len();
        let lanes_needed = end.div_ceil(LANE_WIDTH);
        if lanes_needed > self.lanes.capacity() {
            self.lanes.reserve_exact(lanes_needed - self.lanes.len());
        }
        if lanes_needed > self.lanes.len() {
            self.lanes.resize(lanes_needed, Lane::zeroed());
        }
        bytemuck::cast_slice_mut::<Lane, f32>(&mut self.lanes)[start..end].copy_from_slice(src);
        self.len = end;
    }
}
