use strata_blocks::types::{FaceRole, Shape};
use strata_geom::Vec3;

use crate::emit::PrimitiveSink;
use crate::primitive::{FaceSet, Primitive, PrimitiveKind};
use crate::util::MeshCtx;

/// One billboard per plant cell. The texture follows the `half` property, so the two cells of a
/// tall plant can differ.
pub(crate) fn mesh_cross(ctx: &MeshCtx, out: &mut impl PrimitiveSink) {
    for y in 0..ctx.y_end as i32 {
        for z in 0..ctx.sz as i32 {
            for x in 0..ctx.sx as i32 {
                let b = ctx.block(x, y, z);
                let Some(ty) = ctx.resolve(b) else { continue };
                if ty.shape != Shape::Cross {
                    continue;
                }
                let tex = ty.texture_for_cached(FaceRole::Side, b.state);
                let prim = Primitive::new(
                    PrimitiveKind::CrossBillboard,
                    ctx.world(x as f32, y as f32, z as f32),
                    Vec3::ONE,
                    b.id,
                )
                .with_faces(FaceSet::from_fn(|_| Some(tex)))
                .with_color(ty.color);
                if !out.emit(prim) {
                    return;
                }
            }
        }
    }
}
