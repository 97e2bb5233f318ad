//! Fences: one post per cell, widened towards its connections, plus rail pairs. Runs of
//! connected fences share a single rail pair spanning from the first post to the last;
//! half-length stubs reach out to attached cubes and to fences across the chunk border.

use strata_blocks::meta::Facing;
use strata_blocks::types::{BlockId, FaceRole, Shape};
use strata_blocks::BlockType;
use strata_geom::Vec3;

use crate::emit::PrimitiveSink;
use crate::primitive::{FaceSet, FencePart, Primitive, PrimitiveKind};
use crate::util::MeshCtx;

const POST_MIN: f32 = 0.375;
const POST_WIDTH: f32 = 0.25;
const RAIL_THICKNESS: f32 = 0.125;
const RAIL_HEIGHT: f32 = 0.1875;
const UPPER_RAIL_Y: f32 = 0.75;
const LOWER_RAIL_Y: f32 = 0.375;

/// What a fence attaches to on one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Connection {
    None,
    Fence,
    /// Full opaque cube that is not interactive.
    Cube,
}

pub(crate) fn connection(ctx: &MeshCtx, x: i32, y: i32, z: i32) -> Connection {
    match ctx.ty_at(x, y, z) {
        Some(ty) if ty.shape == Shape::Fence => Connection::Fence,
        Some(ty) if ty.connects_fences() => Connection::Cube,
        _ => Connection::None,
    }
}

/// Connections of the fence at `(x, y, z)` towards north, east, south and west.
pub(crate) fn connections(ctx: &MeshCtx, x: i32, y: i32, z: i32) -> [Connection; 4] {
    Facing::ALL.map(|f| {
        let (dx, dz) = f.delta();
        connection(ctx, x + dx, y, z + dz)
    })
}

/// Post footprint `(x0, z0, x1, z1)` within the cell: the centre column widened to the cell edge
/// on every connected side, covering the in-cell part of each rail band.
pub(crate) fn post_footprint(conns: [Connection; 4]) -> (f32, f32, f32, f32) {
    let reach = |f: Facing| conns[f as usize] != Connection::None;
    let (lo, hi) = (POST_MIN, POST_MIN + POST_WIDTH);
    (
        if reach(Facing::West) { 0.0 } else { lo },
        if reach(Facing::North) { 0.0 } else { lo },
        if reach(Facing::East) { 1.0 } else { hi },
        if reach(Facing::South) { 1.0 } else { hi },
    )
}

#[derive(Copy, Clone)]
enum Axis {
    X,
    Z,
}

pub(crate) fn mesh_fences(ctx: &MeshCtx, out: &mut impl PrimitiveSink) {
    let is_local_fence = |x: i32, y: i32, z: i32| {
        ctx.view.in_bounds(x, y, z) && connection(ctx, x, y, z) == Connection::Fence
    };
    for y in 0..ctx.y_end as i32 {
        for z in 0..ctx.sz as i32 {
            for x in 0..ctx.sx as i32 {
                let b = ctx.block(x, y, z);
                let Some(ty) = ctx.resolve(b) else { continue };
                if ty.shape != Shape::Fence {
                    continue;
                }
                let tex = ty.texture_for_cached(FaceRole::Side, b.state);
                let faces = FaceSet::from_fn(|_| Some(tex));
                let conns = connections(ctx, x, y, z);
                let (x0, z0, x1, z1) = post_footprint(conns);
                let post = Primitive::new(
                    PrimitiveKind::Fence(FencePart::Post),
                    ctx.world(x as f32 + x0, y as f32, z as f32 + z0),
                    Vec3::new(x1 - x0, 1.0, z1 - z0),
                    b.id,
                )
                .with_faces(faces)
                .with_collision(ty.solid)
                .with_color(ty.color);
                if !out.emit(post) {
                    return;
                }

                // Rails are owned by the first cell of a run along each axis.
                for (axis, back, front) in [
                    (Axis::X, Facing::West, Facing::East),
                    (Axis::Z, Facing::North, Facing::South),
                ] {
                    let (bx, bz) = back.delta();
                    if is_local_fence(x + bx, y, z + bz) {
                        continue;
                    }
                    let (fx, fz) = front.delta();
                    let mut len = 1;
                    while is_local_fence(x + fx * len, y, z + fz * len) {
                        len += 1;
                    }
                    let last = (x + fx * (len - 1), z + fz * (len - 1));
                    let last_front = connection(ctx, last.0 + fx, y, last.1 + fz);
                    let mut spans: Vec<(f32, f32)> = Vec::with_capacity(3);
                    if conns[back as usize] != Connection::None {
                        spans.push((0.0, 0.5));
                    }
                    if len >= 2 {
                        spans.push((0.5, len as f32 - 0.5));
                    }
                    if last_front != Connection::None {
                        spans.push((len as f32 - 0.5, len as f32));
                    }
                    for (s0, s1) in spans {
                        if !emit_rail_pair(ctx, out, ty, b.id, (x, y, z), axis, s0, s1, faces) {
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_rail_pair(
    ctx: &MeshCtx,
    out: &mut impl PrimitiveSink,
    ty: &BlockType,
    id: BlockId,
    (x, y, z): (i32, i32, i32),
    axis: Axis,
    s0: f32,
    s1: f32,
    faces: FaceSet,
) -> bool {
    let across = 0.5 - RAIL_THICKNESS * 0.5;
    for (part, ry) in [
        (FencePart::UpperRail, UPPER_RAIL_Y),
        (FencePart::LowerRail, LOWER_RAIL_Y),
    ] {
        let (min, size, facing) = match axis {
            Axis::X => (
                ctx.world(x as f32 + s0, y as f32 + ry, z as f32 + across),
                Vec3::new(s1 - s0, RAIL_HEIGHT, RAIL_THICKNESS),
                Facing::East,
            ),
            Axis::Z => (
                ctx.world(x as f32 + across, y as f32 + ry, z as f32 + s0),
                Vec3::new(RAIL_THICKNESS, RAIL_HEIGHT, s1 - s0),
                Facing::South,
            ),
        };
        let rail = Primitive::new(PrimitiveKind::Fence(part), min, size, id)
            .with_facing(facing)
            .with_faces(faces)
            .with_color(ty.color);
        if !out.emit(rail) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_post_is_the_centre_column() {
        assert_eq!(post_footprint([Connection::None; 4]), (0.375, 0.375, 0.625, 0.625));
    }

    #[test]
    fn post_widens_towards_each_connection() {
        // north, east, south, west
        let east_cube = [Connection::None, Connection::Cube, Connection::None, Connection::None];
        assert_eq!(post_footprint(east_cube), (0.375, 0.375, 1.0, 0.625));
        let corner = [Connection::Fence, Connection::None, Connection::None, Connection::Fence];
        assert_eq!(post_footprint(corner), (0.0, 0.0, 0.625, 0.625));
        let cross = [Connection::Fence, Connection::Cube, Connection::Fence, Connection::Cube];
        assert_eq!(post_footprint(cross), (0.0, 0.0, 1.0, 1.0));
    }
}
