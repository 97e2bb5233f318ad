use strata_blocks::types::{Block, BlockId, BlockState};

use crate::buf::ChunkBuf;
use crate::coord::ChunkCoord;

/// Resolves voxels that lie outside the chunk being meshed.
///
/// `None` means the position is not loaded; callers read it as air. Implementations must only
/// read already-loaded data and never trigger generation.
pub trait NeighborSampler: Sync {
    fn block_at_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block>;
}

/// Sampler for a chunk meshed in isolation: everything outside reads as air.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoNeighbors;

impl NeighborSampler for NoNeighbors {
    #[inline]
    fn block_at_world(&self, _wx: i32, _wy: i32, _wz: i32) -> Option<Block> {
        None
    }
}

impl<F> NeighborSampler for F
where
    F: Fn(i32, i32, i32) -> Option<Block> + Sync,
{
    #[inline]
    fn block_at_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        self(wx, wy, wz)
    }
}

/// Read-only view of one chunk plus whatever its sampler can see beyond it.
///
/// Coordinates are chunk-local and signed; anything outside `0..sx`, `0..sy`, `0..sz` is
/// converted to world space and handed to the sampler.
#[derive(Clone, Copy)]
pub struct ChunkView<'a> {
    buf: &'a ChunkBuf,
    sampler: &'a dyn NeighborSampler,
}

impl<'a> ChunkView<'a> {
    pub fn new(buf: &'a ChunkBuf, sampler: &'a dyn NeighborSampler) -> Self {
        Self { buf, sampler }
    }

    #[inline]
    pub fn buf(&self) -> &'a ChunkBuf {
        self.buf
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.buf.coord
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.buf.sx, self.buf.sy, self.buf.sz)
    }

    #[inline]
    pub fn origin(&self) -> (i32, i32, i32) {
        self.buf.origin()
    }

    #[inline]
    pub fn in_bounds(&self, lx: i32, ly: i32, lz: i32) -> bool {
        lx >= 0
            && ly >= 0
            && lz >= 0
            && (lx as usize) < self.buf.sx
            && (ly as usize) < self.buf.sy
            && (lz as usize) < self.buf.sz
    }

    #[inline]
    pub fn block(&self, lx: i32, ly: i32, lz: i32) -> Block {
        if self.in_bounds(lx, ly, lz) {
            return self.buf.get_local(lx as usize, ly as usize, lz as usize);
        }
        let (ox, oy, oz) = self.buf.origin();
        self.sampler
            .block_at_world(ox + lx, oy + ly, oz + lz)
            .unwrap_or(Block::AIR)
    }

    #[inline]
    pub fn id(&self, lx: i32, ly: i32, lz: i32) -> BlockId {
        self.block(lx, ly, lz).id
    }

    #[inline]
    pub fn meta(&self, lx: i32, ly: i32, lz: i32) -> BlockState {
        self.block(lx, ly, lz).state
    }

    #[inline]
    pub fn heights(&self) -> &'a [i32] {
        self.buf.heights()
    }

    /// Upper bound (exclusive) on local y holding anything but air.
    #[inline]
    pub fn y_limit(&self) -> usize {
        self.buf.y_limit()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_all_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_reads_go_through_the_sampler() {
        let mut buf = ChunkBuf::new_air(ChunkCoord::new(1, 0, -1), 4, 4, 4);
        buf.set_local(0, 0, 0, Block::new(3, 1));
        let probe = |wx: i32, wy: i32, wz: i32| {
            (wx == 3 && wy == 0 && wz == -4).then_some(Block::new(7, 2))
        };
        let view = ChunkView::new(&buf, &probe);
        assert_eq!(view.block(0, 0, 0), Block::new(3, 1));
        assert_eq!(view.id(-1, 0, 0), 7);
        assert_eq!(view.meta(-1, 0, 0), 2);
        assert_eq!(view.block(0, -1, 0), Block::AIR);
        assert_eq!(view.y_limit(), 1);

        let isolated = ChunkView::new(&buf, &NoNeighbors);
        assert_eq!(isolated.block(-1, 0, 0), Block::AIR);
    }
}
