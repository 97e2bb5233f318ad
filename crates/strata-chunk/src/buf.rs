use strata_blocks::types::Block;

use crate::coord::ChunkCoord;

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    /// Voxels indexed by [`ChunkBuf::idx`]. Writing here directly leaves the height map stale
    /// until [`ChunkBuf::recompute_heights`] runs; [`ChunkBuf::set_local`] keeps it current.
    pub blocks: Vec<Block>,
    // Highest non-air local y per (x, z) column, -1 when the column is empty
    heights: Vec<i32>,
}

impl ChunkBuf {
    pub fn new_air(coord: ChunkCoord, sx: usize, sy: usize, sz: usize) -> Self {
        ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: vec![Block::AIR; sx * sy * sz],
            heights: vec![-1; sx * sz],
        }
    }

    pub fn from_blocks_local(
        coord: ChunkCoord,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        let mut buf = ChunkBuf {
            coord,
            sx,
            sy,
            sz,
            blocks: b,
            heights: Vec::new(),
        };
        buf.recompute_heights();
        buf
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    /// Writes one voxel and keeps the column height current.
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block: Block) {
        let i = self.idx(x, y, z);
        self.blocks[i] = block;
        let col = z * self.sx + x;
        let h = self.heights[col];
        if !block.is_air() {
            if y as i32 > h {
                self.heights[col] = y as i32;
            }
        } else if y as i32 == h {
            self.heights[col] = self.column_height(x, z);
        }
    }

    pub fn recompute_heights(&mut self) {
        let mut heights = vec![-1; self.sx * self.sz];
        for z in 0..self.sz {
            for x in 0..self.sx {
                heights[z * self.sx + x] = self.column_height(x, z);
            }
        }
        self.heights = heights;
    }

    fn column_height(&self, x: usize, z: usize) -> i32 {
        (0..self.sy)
            .rev()
            .find(|&y| !self.get_local(x, y, z).is_air())
            .map_or(-1, |y| y as i32)
    }

    /// Column heights, row-major in `(z, x)`.
    #[inline]
    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    #[inline]
    pub fn height_at(&self, x: usize, z: usize) -> i32 {
        self.heights[z * self.sx + x]
    }

    /// One past the highest non-air local y in the chunk; 0 for an all-air chunk.
    pub fn y_limit(&self) -> usize {
        self.heights.iter().copied().max().map_or(0, |h| (h + 1) as usize)
    }

    #[inline]
    pub fn origin(&self) -> (i32, i32, i32) {
        self.coord.origin(self.sx, self.sy, self.sz)
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let (base_x, base_y, base_z) = self.origin();
        if wy < base_y || wy >= base_y + self.sy as i32 {
            return false;
        }
        wx >= base_x && wx < base_x + self.sx as i32 && wz >= base_z && wz < base_z + self.sz as i32
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let (base_x, base_y, base_z) = self.origin();
        let lx = (wx - base_x) as usize;
        let ly = (wy - base_y) as usize;
        let lz = (wz - base_z) as usize;
        Some(self.get_local(lx, ly, lz))
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.heights.iter().any(|&h| h >= 0)
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_local_tracks_column_heights() {
        let mut buf = ChunkBuf::new_air(ChunkCoord::new(0, 0, 0), 2, 8, 2);
        assert!(buf.is_all_air());
        assert_eq!(buf.y_limit(), 0);
        buf.set_local(1, 3, 0, Block::new(1, 0));
        buf.set_local(1, 5, 0, Block::new(1, 0));
        assert_eq!(buf.height_at(1, 0), 5);
        assert_eq!(buf.height_at(0, 0), -1);
        assert_eq!(buf.y_limit(), 6);
        buf.set_local(1, 5, 0, Block::AIR);
        assert_eq!(buf.height_at(1, 0), 3);
        buf.set_local(1, 3, 0, Block::AIR);
        assert_eq!(buf.height_at(1, 0), -1);
        assert!(buf.is_all_air());
    }
}
