use strata_blocks::meta::WaterState;
use strata_blocks::types::{Block, Shape};
use strata_blocks::{BlockRegistry, BlockType};
use strata_chunk::ChunkView;
use strata_geom::Vec3;

use crate::config::MeshConfig;
use crate::face::Face;

/// Everything a mesher pass reads: the grid, the registry and the options.
#[derive(Clone, Copy)]
pub(crate) struct MeshCtx<'a> {
    pub view: &'a ChunkView<'a>,
    pub reg: &'a BlockRegistry,
    pub cfg: &'a MeshConfig,
    pub sx: usize,
    pub sz: usize,
    /// Exclusive upper bound on local y worth scanning.
    pub y_end: usize,
    origin: (i32, i32, i32),
}

impl<'a> MeshCtx<'a> {
    pub fn new(view: &'a ChunkView<'a>, reg: &'a BlockRegistry, cfg: &'a MeshConfig) -> Self {
        let (sx, sy, sz) = view.dims();
        let y_end = if cfg.skip_empty_chunks {
            view.y_limit().min(sy)
        } else {
            sy
        };
        Self {
            view,
            reg,
            cfg,
            sx,
            sz,
            y_end,
            origin: view.origin(),
        }
    }

    #[inline]
    pub fn block(&self, x: i32, y: i32, z: i32) -> Block {
        self.view.block(x, y, z)
    }

    /// Type to mesh `b` with, or `None` for anything that renders as empty.
    #[inline]
    pub fn resolve(&self, b: Block) -> Option<&'a BlockType> {
        if b.is_air() {
            return None;
        }
        match self.reg.get(b.id) {
            Some(ty) if ty.shape == Shape::None => None,
            Some(ty) => Some(ty),
            None if self.cfg.unknown_as_opaque => Some(self.reg.unknown()),
            None => None,
        }
    }

    #[inline]
    pub fn ty_at(&self, x: i32, y: i32, z: i32) -> Option<&'a BlockType> {
        self.resolve(self.block(x, y, z))
    }

    /// Solid, opaque, full cube.
    #[inline]
    pub fn occludes(&self, x: i32, y: i32, z: i32) -> bool {
        self.ty_at(x, y, z).is_some_and(BlockType::is_occluder)
    }

    #[inline]
    pub fn water_at(&self, x: i32, y: i32, z: i32) -> Option<WaterState> {
        let b = self.block(x, y, z);
        match self.resolve(b) {
            Some(ty) if ty.shape == Shape::Water => Some(WaterState::decode(b.state)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_water(&self, x: i32, y: i32, z: i32) -> bool {
        self.water_at(x, y, z).is_some()
    }

    /// World-space position of local cell `(x, y, z)`.
    #[inline]
    pub fn world(&self, x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(
            self.origin.0 as f32 + x,
            self.origin.1 as f32 + y,
            self.origin.2 as f32 + z,
        )
    }

    /// True if any cell just beyond `face` of the local box `[x0, x0+w) x [y0, y0+h) x [z0, z0+d)`
    /// satisfies `pred`.
    pub fn face_any(
        &self,
        (x0, y0, z0): (i32, i32, i32),
        (w, h, d): (i32, i32, i32),
        face: Face,
        mut pred: impl FnMut(i32, i32, i32) -> bool,
    ) -> bool {
        let (xs, ys, zs) = match face {
            Face::PosX => (x0 + w..x0 + w + 1, y0..y0 + h, z0..z0 + d),
            Face::NegX => (x0 - 1..x0, y0..y0 + h, z0..z0 + d),
            Face::PosY => (x0..x0 + w, y0 + h..y0 + h + 1, z0..z0 + d),
            Face::NegY => (x0..x0 + w, y0 - 1..y0, z0..z0 + d),
            Face::PosZ => (x0..x0 + w, y0..y0 + h, z0 + d..z0 + d + 1),
            Face::NegZ => (x0..x0 + w, y0..y0 + h, z0 - 1..z0),
        };
        for y in ys {
            for z in zs.clone() {
                for x in xs.clone() {
                    if pred(x, y, z) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// A face of a solid box is visible when at least one cell beyond it does not occlude.
    #[inline]
    pub fn face_exposed(&self, min: (i32, i32, i32), size: (i32, i32, i32), face: Face) -> bool {
        self.face_any(min, size, face, |x, y, z| !self.occludes(x, y, z))
    }
}
