//! Node Arena - chunked pool for elements and attributes
//!
//! Nodes live in fixed-capacity chunks chained in allocation order. A chunk
//! is a boxed slice that is never resized, so a node never moves once handed
//! out; growing the chain only moves the chunk boxes, not their contents.
//! Handles are plain `u32` indices: `chunk * capacity + slot`.
//!
//! There is no per-node free. Dropping the arena releases every chunk.

use std::ops::{Index, IndexMut};

use crate::config::DEFAULT_CHUNK_CAPACITY;

/// Handle type handed out by a [`NodeArena`]
pub trait ArenaId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

/// Arena allocation statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    /// Nodes handed out so far
    pub allocated: usize,
    /// Chunks in the chain
    pub chunk_count: usize,
    /// Total slots across all chunks
    pub capacity: usize,
}

struct Chunk<T> {
    slots: Box<[T]>,
    used: usize,
}

impl<T: Default> Chunk<T> {
    fn new(capacity: usize) -> Self {
        // Every slot starts in its "absent" state
        let slots: Box<[T]> = (0..capacity).map(|_| T::default()).collect();
        Chunk { slots, used: 0 }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.used == self.slots.len()
    }
}

pub struct NodeArena<T> {
    chunks: Vec<Chunk<T>>,
    chunk_capacity: usize,
    len: usize,
}

impl<T: Default> NodeArena<T> {
    pub fn new() -> Self {
        Self::with_chunk_capacity(DEFAULT_CHUNK_CAPACITY)
    }

    /// Create an arena whose chunks hold `capacity` nodes (at least one)
    pub fn with_chunk_capacity(capacity: usize) -> Self {
        NodeArena {
            chunks: Vec::new(),
            chunk_capacity: capacity.max(1),
            len: 0,
        }
    }

    /// Hand out the next free slot, starting a new chunk when the current one
    /// is exhausted.
    pub fn alloc<I: ArenaId>(&mut self) -> I {
        let needs_chunk = self.chunks.last().is_none_or(Chunk::is_full);
        if needs_chunk {
            if !self.chunks.is_empty() {
                tracing::trace!(
                    chunks = self.chunks.len() + 1,
                    capacity = self.chunk_capacity,
                    "arena chunk rollover"
                );
            }
            self.chunks.push(Chunk::new(self.chunk_capacity));
        }

        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        let slot = chunk.used;
        chunk.used += 1;
        self.len += 1;

        I::from_index(chunk_index * self.chunk_capacity + slot)
    }
}

impl<T> NodeArena<T> {
    #[inline]
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.len {
            return None;
        }
        Some((index / self.chunk_capacity, index % self.chunk_capacity))
    }

    #[inline]
    pub fn get<I: ArenaId>(&self, id: I) -> Option<&T> {
        let (chunk, slot) = self.locate(id.index())?;
        self.chunks.get(chunk).map(|c| &c.slots[slot])
    }

    #[inline]
    pub fn get_mut<I: ArenaId>(&mut self, id: I) -> Option<&mut T> {
        let (chunk, slot) = self.locate(id.index())?;
        self.chunks.get_mut(chunk).map(|c| &mut c.slots[slot])
    }

    /// Number of nodes handed out
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            allocated: self.len,
            chunk_count: self.chunks.len(),
            capacity: self.chunks.len() * self.chunk_capacity,
        }
    }
}

impl<T: Default> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles come from `alloc` on the same arena, so indexing panics only on a
/// handle from a different arena, like slice indexing out of bounds.
impl<T, I: ArenaId> Index<I> for NodeArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: I) -> &T {
        let index = id.index();
        match self.get(id) {
            Some(node) => node,
            None => panic!("arena handle {} out of bounds (len {})", index, self.len),
        }
    }
}

impl<T, I: ArenaId> IndexMut<I> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, id: I) -> &mut T {
        let index = id.index();
        let len = self.len;
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("arena handle {} out of bounds (len {})", index, len),
        }
    }
}
