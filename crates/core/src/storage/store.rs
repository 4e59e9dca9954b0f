//! Contiguous embedding store.
//!
//! All vectors live back to back in one [`AlignedBuffer`]: vector `i` occupies
//! floats `i * dim .. (i + 1) * dim`. A parallel `Vec<u64>` maps internal index
//! to the caller's external identifier. Internal index order is insertion order.

use crate::error::{Error, Result};
use crate::storage::aligned::AlignedBuffer;
use std::ops::Range;

/// Append-only store of fixed-dimension f32 vectors plus their external ids.
///
/// Views returned by [`view`](Self::view) borrow the store, so the compiler
/// rejects any [`append`](Self::append) while a view is alive: a view can never
/// observe the buffer being reallocated underneath it.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    dim: usize,
    data: AlignedBuffer,
    ids: Vec<u64>,
}

impl EmbeddingStore {
    /// Creates an empty store of `dim`-dimensional vectors.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::invalid("dim must be > 0"));
        }
        Ok(Self {
            dim,
            data: AlignedBuffer::new(),
            ids: Vec::new(),
        })
    }

    /// Creates an empty store pre-sized for `capacity` vectors.
    pub fn with_capacity(dim: usize, capacity: usize) -> Result<Self> {
        let mut store = Self::new(dim)?;
        store.data = AlignedBuffer::with_capacity(capacity * dim);
        store.ids.reserve_exact(capacity);
        Ok(store)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored vectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of rows in a row-major batch of `dim`-wide vectors.
    /// Fails if the batch is not a whole number of rows.
    pub fn rows_in(&self, batch: &[f32]) -> Result<usize> {
        if batch.len() % self.dim != 0 {
            return Err(Error::invalid(format!(
                "batch of {} floats is not a multiple of dim {}",
                batch.len(),
                self.dim
            )));
        }
        Ok(batch.len() / self.dim)
    }

    /// Appends `n = vectors.len() / dim` vectors from a row-major batch.
    ///
    /// With `ids`, the `n` identifiers are stored verbatim (duplicates are
    /// accepted). Without, ids `len()..len() + n` are assigned. Everything is
    /// validated before the store is touched, so a failed call leaves it
    /// unchanged. Returns the internal index range of the new vectors.
    pub fn append(&mut self, vectors: &[f32], ids: Option<&[u64]>) -> Result<Range<usize>> {
        let n = self.rows_in(vectors)?;
        if n == 0 {
            return Err(Error::invalid("append requires at least one vector"));
        }
        if let Some(ids) = ids {
            if ids.len() != n {
                return Err(Error::invalid(format!(
                    "ids length {} does not match vector count {}",
                    ids.len(),
                    n
                )));
            }
        }

        let start = self.len();
        self.data.extend_from_slice(vectors);
        self.ids.reserve_exact(n);
        match ids {
            Some(ids) => self.ids.extend_from_slice(ids),
            None => self.ids.extend((start..start + n).map(|i| i as u64)),
        }
        tracing::debug!(rows = n, size = self.len(), "appended vectors to store");
        Ok(start..start + n)
    }

    /// Read-only view of vector `i`.
    pub fn view(&self, i: usize) -> Result<&[f32]> {
        if i >= self.len() {
            return Err(Error::OutOfRange {
                index: i,
                len: self.len(),
            });
        }
        Ok(self.row(i))
    }

    /// External identifier of vector `i`.
    pub fn id(&self, i: usize) -> Result<u64> {
        self.ids.get(i).copied().ok_or(Error::OutOfRange {
            index: i,
            len: self.len(),
        })
    }

    /// All external identifiers, in internal index order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// The whole buffer: `len() * dim()` floats.
    pub fn as_flat(&self) -> &[f32] {
        self.data.as_slice()
    }

    /// Iterates over stored vectors in internal index order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.as_slice().chunks_exact(self.dim)
    }

    /// Unchecked-by-contract row access for callers iterating `0..len()`.
    #[inline]
    pub(crate) fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.data.as_slice()[start..start + self.dim]
    }
}
