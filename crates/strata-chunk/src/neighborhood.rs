use std::sync::Arc;

use hashbrown::HashMap;
use strata_blocks::types::Block;

use crate::buf::ChunkBuf;
use crate::coord::ChunkCoord;
use crate::view::{ChunkView, NeighborSampler};

/// Snapshot of loaded chunks that share one chunk size.
///
/// Cloning is cheap: buffers are reference counted, so a scheduler can hand a snapshot to
/// worker threads while the live world keeps editing its own copies.
#[derive(Clone, Debug)]
pub struct ChunkNeighborhood {
    sx: usize,
    sy: usize,
    sz: usize,
    chunks: HashMap<ChunkCoord, Arc<ChunkBuf>>,
}

impl ChunkNeighborhood {
    pub fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            sx,
            sy,
            sz,
            chunks: HashMap::new(),
        }
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.sx, self.sy, self.sz)
    }

    /// Adds or replaces a chunk. Buffers whose size differs from the neighborhood's are refused
    /// and handed back.
    pub fn insert(&mut self, buf: impl Into<Arc<ChunkBuf>>) -> Result<(), Arc<ChunkBuf>> {
        let buf = buf.into();
        if (buf.sx, buf.sy, buf.sz) != self.dims() {
            return Err(buf);
        }
        self.chunks.insert(buf.coord, buf);
        Ok(())
    }

    pub fn remove(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkBuf>> {
        self.chunks.remove(&coord)
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Arc<ChunkBuf>> {
        self.chunks.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Grid view of a loaded chunk that samples its neighbors from this snapshot.
    pub fn view(&self, coord: ChunkCoord) -> Option<ChunkView<'_>> {
        let buf = self.chunks.get(&coord)?;
        Some(ChunkView::new(buf.as_ref(), self))
    }
}

impl NeighborSampler for ChunkNeighborhood {
    #[inline]
    fn block_at_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        let coord = ChunkCoord::containing(wx, wy, wz, self.sx, self.sy, self.sz);
        self.chunks.get(&coord)?.get_world(wx, wy, wz)
    }
}
