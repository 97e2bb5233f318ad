//! Greedy box merging for full-cube blocks.
//!
//! Runs grow along X, then the whole run along Z, then the rectangle along Y. Cells merge when
//! they share a block id and, for oriented types, the same rotation. A merged box is emitted only
//! if at least one face has a non-occluding cell beyond it somewhere across its whole area.

use strata_blocks::meta;
use strata_blocks::types::{Block, BlockId, Shape};
use strata_geom::Vec3;

use crate::emit::PrimitiveSink;
use crate::face::Face;
use crate::primitive::{FaceSet, Primitive, PrimitiveKind};
use crate::util::MeshCtx;

#[derive(Copy, Clone, PartialEq, Eq)]
struct MergeKey {
    id: BlockId,
    rotation: u8,
}

fn merge_key(ctx: &MeshCtx, b: Block) -> Option<MergeKey> {
    let ty = ctx.resolve(b)?;
    if !ty.shape.is_full_cube() {
        return None;
    }
    let rotation = if ty.shape.is_orientable() {
        meta::facing(b.state).bits()
    } else {
        0
    };
    Some(MergeKey { id: b.id, rotation })
}

pub(crate) fn mesh_solids(ctx: &MeshCtx, out: &mut impl PrimitiveSink) {
    let (sx, sz, sy) = (ctx.sx, ctx.sz, ctx.y_end);
    if sy == 0 {
        return;
    }
    let at = |x: usize, y: usize, z: usize| (y * sz + z) * sx + x;
    let mut keys: Vec<Option<MergeKey>> = Vec::with_capacity(sx * sy * sz);
    for y in 0..sy {
        for z in 0..sz {
            for x in 0..sx {
                keys.push(merge_key(ctx, ctx.block(x as i32, y as i32, z as i32)));
            }
        }
    }
    let mut visited = vec![false; keys.len()];

    for y in 0..sy {
        for z in 0..sz {
            for x in 0..sx {
                let i = at(x, y, z);
                let Some(key) = keys[i] else { continue };
                if visited[i] {
                    continue;
                }
                let open = |xx: usize, yy: usize, zz: usize| {
                    let j = at(xx, yy, zz);
                    keys[j] == Some(key) && !visited[j]
                };
                let mut w = 1;
                while x + w < sx && open(x + w, y, z) {
                    w += 1;
                }
                let mut d = 1;
                while z + d < sz && (x..x + w).all(|xx| open(xx, y, z + d)) {
                    d += 1;
                }
                let mut h = 1;
                while y + h < sy
                    && (z..z + d).all(|zz| (x..x + w).all(|xx| open(xx, y + h, zz)))
                {
                    h += 1;
                }
                for yy in y..y + h {
                    for zz in z..z + d {
                        for xx in x..x + w {
                            visited[at(xx, yy, zz)] = true;
                        }
                    }
                }

                let block = ctx.block(x as i32, y as i32, z as i32);
                let Some(ty) = ctx.resolve(block) else { continue };
                let min = (x as i32, y as i32, z as i32);
                let size = (w as i32, h as i32, d as i32);
                let faces = FaceSet::from_fn(|face: Face| {
                    ctx.face_exposed(min, size, face)
                        .then(|| ty.texture_for_cached(face.role(), block.state))
                });
                if !faces.any_visible() {
                    continue;
                }
                let prim = Primitive::new(
                    PrimitiveKind::Box,
                    ctx.world(x as f32, y as f32, z as f32),
                    Vec3::new(w as f32, h as f32, d as f32),
                    block.id,
                )
                .with_facing(if ty.shape == Shape::Oriented {
                    meta::facing(block.state)
                } else {
                    Default::default()
                })
                .with_faces(faces)
                .with_collision(ty.solid)
                .with_color(ty.color);
                if !out.emit(prim) {
                    return;
                }
            }
        }
    }
}
