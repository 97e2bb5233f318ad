//! Stairs: a half-height base plus one or two half-height steps, never merged across cells.

use strata_blocks::meta::{self, Facing, StairShape};
use strata_blocks::types::Shape;
use strata_blocks::BlockType;
use strata_geom::Vec3;

use crate::emit::PrimitiveSink;
use crate::face::Face;
use crate::primitive::{FaceSet, Primitive, PrimitiveKind, StairPart};
use crate::util::MeshCtx;

/// Axis-aligned rectangle on a cell's unit footprint, `(x0, z0, x1, z1)`.
pub type FootRect = (f32, f32, f32, f32);

/// Facing and upside-down flag of a stair neighbor, if the cell holds a stair.
pub(crate) fn stair_at(ctx: &MeshCtx, x: i32, y: i32, z: i32) -> Option<(Facing, bool)> {
    let b = ctx.block(x, y, z);
    let ty = ctx.resolve(b)?;
    (ty.shape == Shape::Stairs).then(|| (meta::facing(b.state), meta::vertical(b.state)))
}

/// Corner shape of the stair at `(x, y, z)` derived from its front and back neighbors.
///
/// A perpendicular stair in front makes an outer corner and one behind makes an inner corner,
/// unless that neighbor is itself continued by a stair with our orientation on the far side.
pub fn derive_shape(
    facing: Facing,
    upside_down: bool,
    neighbor: impl Fn(i32, i32) -> Option<(Facing, bool)>,
) -> StairShape {
    let same = |dx: i32, dz: i32| neighbor(dx, dz) == Some((facing, upside_down));
    let side = |nf: Facing| nf == facing.rotate_ccw();

    let (fx, fz) = facing.delta();
    if let Some((nf, nup)) = neighbor(fx, fz) {
        let (ndx, ndz) = nf.delta();
        if nup == upside_down && nf.is_perpendicular(facing) && !same(-ndx, -ndz) {
            return if side(nf) {
                StairShape::OuterLeft
            } else {
                StairShape::OuterRight
            };
        }
    }
    if let Some((nf, nup)) = neighbor(-fx, -fz) {
        let (ndx, ndz) = nf.delta();
        if nup == upside_down && nf.is_perpendicular(facing) && !same(ndx, ndz) {
            return if side(nf) {
                StairShape::InnerLeft
            } else {
                StairShape::InnerRight
            };
        }
    }
    StairShape::Straight
}

/// Step rectangles for a north-facing stair; the tall side is towards -Z.
fn canonical_steps(shape: StairShape) -> ([FootRect; 2], usize) {
    const FRONT: FootRect = (0.0, 0.0, 1.0, 0.5);
    match shape {
        StairShape::Straight => ([FRONT, FRONT], 1),
        StairShape::OuterLeft => ([(0.0, 0.0, 0.5, 0.5), FRONT], 1),
        StairShape::OuterRight => ([(0.5, 0.0, 1.0, 0.5), FRONT], 1),
        StairShape::InnerLeft => ([FRONT, (0.0, 0.5, 0.5, 1.0)], 2),
        StairShape::InnerRight => ([FRONT, (0.5, 0.5, 1.0, 1.0)], 2),
    }
}

/// Rotates a footprint rectangle about the cell centre from the north frame to `facing`.
pub fn rotate_rect(r: FootRect, facing: Facing) -> FootRect {
    let rot = |u: f32, v: f32| -> (f32, f32) {
        let (a, b) = (u - 0.5, v - 0.5);
        let (ra, rb) = match facing {
            Facing::North => (a, b),
            Facing::East => (-b, a),
            Facing::South => (-a, -b),
            Facing::West => (b, -a),
        };
        (ra + 0.5, rb + 0.5)
    };
    let (ax, az) = rot(r.0, r.1);
    let (bx, bz) = rot(r.2, r.3);
    (ax.min(bx), az.min(bz), ax.max(bx), az.max(bz))
}

/// Footprints of the step pieces of a stair.
pub fn step_rects(facing: Facing, shape: StairShape) -> Vec<FootRect> {
    let (rects, n) = canonical_steps(shape);
    rects[..n].iter().map(|&r| rotate_rect(r, facing)).collect()
}

pub(crate) fn mesh_stairs(ctx: &MeshCtx, out: &mut impl PrimitiveSink) {
    for y in 0..ctx.y_end as i32 {
        for z in 0..ctx.sz as i32 {
            for x in 0..ctx.sx as i32 {
                let b = ctx.block(x, y, z);
                let Some(ty) = ctx.resolve(b) else { continue };
                if ty.shape != Shape::Stairs {
                    continue;
                }
                let facing = meta::facing(b.state);
                let upside_down = meta::vertical(b.state);
                let shape = meta::stored_stair_shape(b.state).unwrap_or_else(|| {
                    derive_shape(facing, upside_down, |dx, dz| {
                        stair_at(ctx, x + dx, y, z + dz)
                    })
                });
                if !emit_stair(ctx, out, ty, b.state, (x, y, z), facing, upside_down, shape) {
                    return;
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_stair(
    ctx: &MeshCtx,
    out: &mut impl PrimitiveSink,
    ty: &BlockType,
    state: u8,
    (x, y, z): (i32, i32, i32),
    facing: Facing,
    upside_down: bool,
    shape: StairShape,
) -> bool {
    let (base_y, step_y) = if upside_down { (0.5, 0.0) } else { (0.0, 0.5) };
    let tex = |face: Face| Some(ty.texture_for_cached(face.role(), state));
    let boundary_hidden = |face: Face| {
        let (dx, dy, dz) = face.delta();
        ctx.occludes(x + dx, y + dy, z + dz)
    };

    // Base: every face but the one against the step half lies on the cell boundary.
    let inner = if upside_down { Face::NegY } else { Face::PosY };
    let base_faces = FaceSet::from_fn(|face| {
        if face != inner && boundary_hidden(face) {
            None
        } else {
            tex(face)
        }
    });
    let base = Primitive::new(
        PrimitiveKind::Stair(StairPart::Base),
        ctx.world(x as f32, y as f32 + base_y, z as f32),
        Vec3::new(1.0, 0.5, 1.0),
        ctx.block(x, y, z).id,
    )
    .with_facing(facing)
    .with_faces(base_faces)
    .with_collision(ty.solid)
    .with_color(ty.color);
    if !out.emit(base) {
        return false;
    }

    for (x0, z0, x1, z1) in step_rects(facing, shape) {
        let on_edge = |face: Face| match face {
            Face::NegX => x0 <= 0.0,
            Face::PosX => x1 >= 1.0,
            Face::NegZ => z0 <= 0.0,
            Face::PosZ => z1 >= 1.0,
            // outer vertical face of the step half
            Face::PosY => !upside_down,
            Face::NegY => upside_down,
        };
        let faces = FaceSet::from_fn(|face| {
            if face == inner.opposite() {
                // sits on the base
                None
            } else if on_edge(face) && boundary_hidden(face) {
                None
            } else {
                tex(face)
            }
        });
        let step = Primitive::new(
            PrimitiveKind::Stair(StairPart::Step),
            ctx.world(x as f32 + x0, y as f32 + step_y, z as f32 + z0),
            Vec3::new(x1 - x0, 0.5, z1 - z0),
            ctx.block(x, y, z).id,
        )
        .with_facing(facing)
        .with_faces(faces)
        .with_collision(ty.solid)
        .with_color(ty.color);
        if !out.emit(step) {
            return false;
        }
    }
    true
}
