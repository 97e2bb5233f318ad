use strata_blocks::meta;
use strata_blocks::types::{BlockId, Shape};
use strata_geom::Vec3;

use crate::emit::PrimitiveSink;
use crate::face::Face;
use crate::primitive::{FaceSet, Primitive, PrimitiveKind};
use crate::util::MeshCtx;

// Slabs merge with slabs of the same id and half.
fn slab_key(ctx: &MeshCtx, x: i32, y: i32, z: i32) -> Option<(BlockId, bool)> {
    let b = ctx.block(x, y, z);
    let ty = ctx.resolve(b)?;
    (ty.shape == Shape::Slab).then(|| (b.id, meta::vertical(b.state)))
}

/// Half-height boxes; a run is grown along +X, or along +Z when it cannot grow along X.
pub(crate) fn mesh_slabs(ctx: &MeshCtx, out: &mut impl PrimitiveSink) {
    let (sx, sz) = (ctx.sx, ctx.sz);
    for y in 0..ctx.y_end {
        let mut keys = Vec::with_capacity(sx * sz);
        for z in 0..sz {
            for x in 0..sx {
                keys.push(slab_key(ctx, x as i32, y as i32, z as i32));
            }
        }
        let mut used = vec![false; sx * sz];
        for z in 0..sz {
            for x in 0..sx {
                let i = z * sx + x;
                let Some(key) = keys[i] else { continue };
                if used[i] {
                    continue;
                }
                let open = |xx: usize, zz: usize| {
                    let j = zz * sx + xx;
                    keys[j] == Some(key) && !used[j]
                };
                let mut w = 1;
                while x + w < sx && open(x + w, z) {
                    w += 1;
                }
                let mut d = 1;
                if w == 1 {
                    while z + d < sz && open(x, z + d) {
                        d += 1;
                    }
                }
                for zz in z..z + d {
                    for xx in x..x + w {
                        used[zz * sx + xx] = true;
                    }
                }
                if !emit_slab(ctx, out, (x as i32, y as i32, z as i32), (w as i32, d as i32), key) {
                    return;
                }
            }
        }
    }
}

fn emit_slab(
    ctx: &MeshCtx,
    out: &mut impl PrimitiveSink,
    (x, y, z): (i32, i32, i32),
    (w, d): (i32, i32),
    (id, top): (BlockId, bool),
) -> bool {
    let b = ctx.block(x, y, z);
    let Some(ty) = ctx.resolve(b) else {
        return true;
    };
    // The face in the middle of the cell is never covered by a neighbor.
    let open_face = if top { Face::NegY } else { Face::PosY };
    let faces = FaceSet::from_fn(|face| {
        let visible = face == open_face || ctx.face_exposed((x, y, z), (w, 1, d), face);
        visible.then(|| ty.texture_for_cached(face.role(), b.state))
    });
    let y0 = if top { 0.5 } else { 0.0 };
    let prim = Primitive::new(
        PrimitiveKind::Box,
        ctx.world(x as f32, y as f32 + y0, z as f32),
        Vec3::new(w as f32, 0.5, d as f32),
        id,
    )
    .with_faces(faces)
    .with_collision(ty.solid)
    .with_color(ty.color);
    out.emit(prim)
}
