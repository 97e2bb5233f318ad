//! Water surfaces.
//!
//! Bulk regions are merged first: falling column bodies, interior source pools, then level
//! flowing water. Everything left is meshed per voxel from its corner heights as a base box
//! plus an optional sloped top. Voxels with water on all six sides produce nothing.

mod classify;
mod height;

pub use classify::{FLAT_EPSILON, WaterShape, classify};
pub use height::{CornerHeights, corner_heights, visual_height};

use std::collections::BTreeSet;

use strata_blocks::meta::WaterState;
use strata_blocks::types::{Block, BlockId};
use strata_blocks::BlockType;
use strata_geom::Vec3;

use crate::emit::PrimitiveSink;
use crate::face::Face;
use crate::greedy::greedy_rects;
use crate::primitive::{FaceSet, Primitive, PrimitiveKind};
use crate::util::MeshCtx;

#[derive(Copy, Clone, Debug)]
struct WaterCell {
    id: BlockId,
    state: WaterState,
    above: bool,
    height: f32,
    enclosed: bool,
}

impl WaterCell {
    // Voxels under water always fill their cell.
    #[inline]
    fn top(&self) -> f32 {
        if self.above { 1.0 } else { self.height }
    }
}

struct WaterGrid<'c, 'a> {
    ctx: &'c MeshCtx<'a>,
    cells: Vec<Option<WaterCell>>,
    consumed: Vec<bool>,
    sx: usize,
    sy: usize,
    sz: usize,
}

impl<'c, 'a> WaterGrid<'c, 'a> {
    fn new(ctx: &'c MeshCtx<'a>) -> Self {
        let (sx, sy, sz) = (ctx.sx, ctx.y_end, ctx.sz);
        let mut cells = Vec::with_capacity(sx * sy * sz);
        for y in 0..sy {
            for z in 0..sz {
                for x in 0..sx {
                    cells.push(sample(ctx, x as i32, y as i32, z as i32));
                }
            }
        }
        Self {
            ctx,
            consumed: vec![false; cells.len()],
            cells,
            sx,
            sy,
            sz,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    fn local(&self, x: usize, y: usize, z: usize) -> Option<WaterCell> {
        self.cells[self.idx(x, y, z)]
    }

    /// Any cell, resolving outside cells through the sampler.
    fn cell(&self, x: i32, y: i32, z: i32) -> Option<WaterCell> {
        let inside = x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.sx
            && (y as usize) < self.sy
            && (z as usize) < self.sz;
        if inside {
            self.local(x as usize, y as usize, z as usize)
        } else {
            sample(self.ctx, x, y, z)
        }
    }

    /// Unconsumed, visible water at a local cell.
    #[inline]
    fn open(&self, x: usize, y: usize, z: usize) -> Option<WaterCell> {
        let i = self.idx(x, y, z);
        self.cells[i].filter(|c| !c.enclosed && !self.consumed[i])
    }

    fn consume(&mut self, (x, y, z): (usize, usize, usize), (w, h, d): (usize, usize, usize)) {
        for yy in y..y + h {
            for zz in z..z + d {
                for xx in x..x + w {
                    let i = self.idx(xx, yy, zz);
                    self.consumed[i] = true;
                }
            }
        }
    }

    /// Whether `face` of the water voxel `me` at `(x, y, z)` should be drawn.
    fn face_visible(&self, me: &WaterCell, x: i32, y: i32, z: i32, face: Face) -> bool {
        let (dx, dy, dz) = face.delta();
        let (nx, ny, nz) = (x + dx, y + dy, z + dz);
        if self.ctx.occludes(nx, ny, nz) {
            return false;
        }
        let Some(n) = self.cell(nx, ny, nz) else {
            return true;
        };
        if !face.is_side() {
            return false;
        }
        let occluding = n.above && (me.state.falling || !n.state.falling) && n.height >= me.height;
        !occluding
    }

    /// Faces of a merged box: a face shows if any voxel along it would show that face.
    fn box_faces(
        &self,
        ty: &BlockType,
        (x, y, z): (usize, usize, usize),
        (w, h, d): (usize, usize, usize),
    ) -> FaceSet {
        FaceSet::from_fn(|face| {
            let (xs, ys, zs) = match face {
                Face::PosX => (x + w - 1..x + w, y..y + h, z..z + d),
                Face::NegX => (x..x + 1, y..y + h, z..z + d),
                Face::PosY => (x..x + w, y + h - 1..y + h, z..z + d),
                Face::NegY => (x..x + w, y..y + 1, z..z + d),
                Face::PosZ => (x..x + w, y..y + h, z + d - 1..z + d),
                Face::NegZ => (x..x + w, y..y + h, z..z + 1),
            };
            for yy in ys {
                for zz in zs.clone() {
                    for xx in xs.clone() {
                        let Some(me) = self.local(xx, yy, zz) else { continue };
                        if self.face_visible(&me, xx as i32, yy as i32, zz as i32, face) {
                            return Some(ty.texture_for_cached(face.role(), me.state.encode()));
                        }
                    }
                }
            }
            None
        })
    }

    fn corners(&self, me: &WaterCell, x: i32, y: i32, z: i32) -> CornerHeights {
        corner_heights(me.height, |dx, dz| {
            self.cell(x + dx, y, z + dz).map(|n| n.height)
        })
    }
}

fn sample(ctx: &MeshCtx, x: i32, y: i32, z: i32) -> Option<WaterCell> {
    let state = ctx.water_at(x, y, z)?;
    let above = ctx.is_water(x, y + 1, z);
    let enclosed = above
        && Face::ALL
            .iter()
            .filter(|f| **f != Face::PosY)
            .all(|f| {
                let (dx, dy, dz) = f.delta();
                ctx.is_water(x + dx, y + dy, z + dz)
            });
    Some(WaterCell {
        id: ctx.block(x, y, z).id,
        state,
        above,
        height: visual_height(state, above),
        enclosed,
    })
}

fn water_prim(
    ctx: &MeshCtx,
    ty: &BlockType,
    kind: PrimitiveKind,
    min: Vec3,
    size: Vec3,
    faces: FaceSet,
) -> Primitive {
    Primitive::new(kind, ctx.world(min.x, min.y, min.z), size, ty.id)
        .with_faces(faces)
        .with_color(ty.color)
}

pub(crate) fn mesh_water(ctx: &MeshCtx, out: &mut impl PrimitiveSink) {
    if ctx.y_end == 0 {
        return;
    }
    let mut grid = WaterGrid::new(ctx);
    if grid.cells.iter().all(Option::is_none) {
        return;
    }
    if !merge_falling_columns(&mut grid, out)
        || !merge_interior_sources(&mut grid, out)
        || !merge_flat_flowing(&mut grid, out)
    {
        return;
    }
    mesh_remaining(&grid, out);
}

fn water_type<'a>(ctx: &MeshCtx<'a>, id: BlockId) -> Option<&'a BlockType> {
    ctx.resolve(Block::new(id, 0))
}

// (a) full-height bodies of falling columns, merged across columns with the same y extent
fn merge_falling_columns(grid: &mut WaterGrid, out: &mut impl PrimitiveSink) -> bool {
    let (sx, sy, sz) = (grid.sx, grid.sy, grid.sz);
    let body = |g: &WaterGrid, x: usize, y: usize, z: usize| {
        g.open(x, y, z).filter(|c| c.state.falling && c.above)
    };
    // (y0, y1, id) runs per column
    let mut runs: Vec<Vec<(usize, usize, BlockId)>> = vec![Vec::new(); sx * sz];
    let mut extents = BTreeSet::new();
    for z in 0..sz {
        for x in 0..sx {
            let mut y = 0;
            while y < sy {
                let Some(c) = body(&*grid, x, y, z) else {
                    y += 1;
                    continue;
                };
                let y0 = y;
                while y < sy && body(&*grid, x, y, z).is_some_and(|n| n.id == c.id) {
                    y += 1;
                }
                runs[z * sx + x].push((y0, y, c.id));
                extents.insert((y0, y, c.id));
            }
        }
    }
    for (y0, y1, id) in extents {
        let Some(ty) = water_type(grid.ctx, id) else { continue };
        let mask: Vec<Option<()>> = runs
            .iter()
            .map(|col| col.contains(&(y0, y1, id)).then_some(()))
            .collect();
        let mut rects = Vec::new();
        greedy_rects(sx, sz, &mask, |x, z, w, d, ()| {
            rects.push((x, z, w, d));
            true
        });
        for (x, z, w, d) in rects {
            let (pos, size) = ((x, y0, z), (w, y1 - y0, d));
            let faces = grid.box_faces(ty, pos, size);
            grid.consume(pos, size);
            let prim = water_prim(
                grid.ctx,
                ty,
                PrimitiveKind::Box,
                Vec3::new(x as f32, y0 as f32, z as f32),
                Vec3::new(w as f32, (y1 - y0) as f32, d as f32),
                faces,
            );
            if !out.emit(prim) {
                return false;
            }
        }
    }
    true
}

// 2D merge of one layer's cells sharing a key into flat boxes of the given height.
fn merge_layers<K: Copy + Eq>(
    grid: &mut WaterGrid,
    out: &mut impl PrimitiveSink,
    key: impl Fn(&WaterGrid, usize, usize, usize) -> Option<(K, BlockId, f32)>,
) -> bool {
    let (sx, sy, sz) = (grid.sx, grid.sy, grid.sz);
    for y in 0..sy {
        let mut mask = Vec::with_capacity(sx * sz);
        for z in 0..sz {
            for x in 0..sx {
                mask.push(key(&*grid, x, y, z).map(|(k, id, h)| (k, id, h.to_bits())));
            }
        }
        let mut rects = Vec::new();
        greedy_rects(sx, sz, &mask, |x, z, w, d, k| {
            rects.push((x, z, w, d, k));
            true
        });
        for (x, z, w, d, (_, id, hbits)) in rects {
            let Some(ty) = water_type(grid.ctx, id) else { continue };
            let (pos, size) = ((x, y, z), (w, 1, d));
            let faces = grid.box_faces(ty, pos, size);
            grid.consume(pos, size);
            let prim = water_prim(
                grid.ctx,
                ty,
                PrimitiveKind::Box,
                Vec3::new(x as f32, y as f32, z as f32),
                Vec3::new(w as f32, f32::from_bits(hbits), d as f32),
                faces,
            );
            if !out.emit(prim) {
                return false;
            }
        }
    }
    true
}

// (b) sources whose four horizontal neighbors are sources too
fn merge_interior_sources(grid: &mut WaterGrid, out: &mut impl PrimitiveSink) -> bool {
    merge_layers(grid, out, |g, x, y, z| {
        let c = g.open(x, y, z)?;
        if !c.state.is_source() {
            return None;
        }
        let interior = Face::ALL.iter().filter(|f| f.is_side()).all(|f| {
            let (dx, _, dz) = f.delta();
            g.cell(x as i32 + dx, y as i32, z as i32 + dz)
                .is_some_and(|n| n.state.is_source())
        });
        interior.then_some((c.above, c.id, c.top()))
    })
}

// (c) level flowing water sharing depth, water-above state and surface height
fn merge_flat_flowing(grid: &mut WaterGrid, out: &mut impl PrimitiveSink) -> bool {
    merge_layers(grid, out, |g, x, y, z| {
        let c = g.open(x, y, z)?;
        if c.state.falling || c.state.depth == 0 {
            return None;
        }
        let WaterShape::Flat(level) = classify(&g.corners(&c, x as i32, y as i32, z as i32))
        else {
            return None;
        };
        let h = if c.above { 1.0 } else { level };
        Some(((c.state.depth, c.above, h.to_bits()), c.id, h))
    })
}

fn mesh_remaining(grid: &WaterGrid, out: &mut impl PrimitiveSink) {
    let ctx = grid.ctx;
    let allowance = ctx.cfg.water_slope_allowance;
    for y in 0..grid.sy {
        for z in 0..grid.sz {
            for x in 0..grid.sx {
                let Some(me) = grid.open(x, y, z) else { continue };
                let Some(ty) = water_type(ctx, me.id) else { continue };
                let (ix, iy, iz) = (x as i32, y as i32, z as i32);
                let shape = if me.above {
                    WaterShape::Flat(1.0)
                } else {
                    classify(&grid.corners(&me, ix, iy, iz))
                };
                let base_faces = |covered_top: bool| {
                    FaceSet::from_fn(|face| {
                        let shown = if face == Face::PosY && covered_top {
                            false
                        } else {
                            grid.face_visible(&me, ix, iy, iz, face)
                        };
                        shown.then(|| ty.texture_for_cached(face.role(), me.state.encode()))
                    })
                };
                let cell = Vec3::new(x as f32, y as f32, z as f32);
                let flat_box = |h: f32| {
                    water_prim(
                        ctx,
                        ty,
                        PrimitiveKind::Box,
                        cell,
                        Vec3::new(1.0, h, 1.0),
                        base_faces(false),
                    )
                };
                let (level_box, tops): (Option<Primitive>, Vec<PrimitiveKind>) = match shape {
                    WaterShape::Flat(h) => (Some(flat_box(h)), Vec::new()),
                    WaterShape::Saddle => (Some(flat_box(me.height)), Vec::new()),
                    WaterShape::Slope { down } => (None, vec![PrimitiveKind::Wedge { down }]),
                    WaterShape::Convex { peak } => (None, vec![PrimitiveKind::CornerWedge { peak }]),
                    WaterShape::Concave { low } => {
                        let (a, b) = low.cardinals();
                        (
                            None,
                            vec![
                                PrimitiveKind::Wedge { down: a },
                                PrimitiveKind::Wedge { down: b },
                            ],
                        )
                    }
                };
                if let Some(p) = level_box {
                    if !out.emit(p) {
                        return;
                    }
                    continue;
                }

                let peak = grid.corners(&me, ix, iy, iz).max();
                let base_top = me.height - allowance;
                let top_from = base_top.max(0.0);
                if base_top > 0.0 {
                    let base = water_prim(
                        ctx,
                        ty,
                        PrimitiveKind::Box,
                        cell,
                        Vec3::new(1.0, base_top, 1.0),
                        base_faces(true),
                    );
                    if !out.emit(base) {
                        return;
                    }
                }
                let top_faces = FaceSet::from_fn(|face| {
                    let shown = match face {
                        Face::NegY => base_top <= 0.0 && grid.face_visible(&me, ix, iy, iz, face),
                        _ => grid.face_visible(&me, ix, iy, iz, face),
                    };
                    shown.then(|| ty.texture_for_cached(face.role(), me.state.encode()))
                });
                for kind in tops {
                    let facing = match kind {
                        PrimitiveKind::Wedge { down } => down,
                        _ => Default::default(),
                    };
                    let piece = water_prim(
                        ctx,
                        ty,
                        kind,
                        Vec3::new(cell.x, cell.y + top_from, cell.z),
                        Vec3::new(1.0, peak - top_from, 1.0),
                        top_faces,
                    )
                    .with_facing(facing);
                    if !out.emit(piece) {
                        return;
                    }
                }
            }
        }
    }
}
