use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// Chunk containing world voxel `(wx, wy, wz)` for chunks of the given size.
    #[inline]
    pub fn containing(wx: i32, wy: i32, wz: i32, sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            cx: wx.div_euclid(sx as i32),
            cy: wy.div_euclid(sy as i32),
            cz: wz.div_euclid(sz as i32),
        }
    }

    /// World position of local voxel `(0, 0, 0)`.
    #[inline]
    pub fn origin(self, sx: usize, sy: usize, sz: usize) -> (i32, i32, i32) {
        (
            self.cx * sx as i32,
            self.cy * sy as i32,
            self.cz * sz as i32,
        )
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containing_rounds_toward_negative_infinity() {
        assert_eq!(ChunkCoord::containing(-1, 0, 15, 16, 64, 16), ChunkCoord::new(-1, 0, 0));
        assert_eq!(ChunkCoord::containing(16, -1, -16, 16, 64, 16), ChunkCoord::new(1, -1, -1));
        assert_eq!(ChunkCoord::new(-2, 1, 3).origin(16, 64, 16), (-32, 64, 48));
    }
}
