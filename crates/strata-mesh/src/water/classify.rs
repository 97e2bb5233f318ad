use strata_blocks::meta::Facing;

use super::height::CornerHeights;
use crate::primitive::Corner;

/// Corner heights closer than this count as equal.
pub const FLAT_EPSILON: f32 = 1e-3;

/// Surface shape of a water voxel derived from its corner heights.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WaterShape {
    /// All corners level at the given height.
    Flat(f32),
    /// Two adjacent corners high; the surface descends towards `down`.
    Slope { down: Facing },
    /// One corner high.
    Convex { peak: Corner },
    /// Three corners high, one valley corner.
    Concave { low: Corner },
    /// Two diagonal corners high. Rendered flat at the voxel's own height.
    Saddle,
}

pub fn classify(c: &CornerHeights) -> WaterShape {
    let (max, min) = (c.max(), c.min());
    if max - min < FLAT_EPSILON {
        return WaterShape::Flat(max);
    }
    let mid = (max + min) * 0.5;
    let high = Corner::ALL.map(|k| c.get(k) > mid);
    let highs: Vec<Corner> = Corner::ALL
        .into_iter()
        .zip(high)
        .filter_map(|(k, h)| h.then_some(k))
        .collect();
    let lows: Vec<Corner> = Corner::ALL
        .into_iter()
        .zip(high)
        .filter_map(|(k, h)| (!h).then_some(k))
        .collect();
    match (highs.as_slice(), lows.as_slice()) {
        ([peak], _) => WaterShape::Convex { peak: *peak },
        (_, [low]) => WaterShape::Concave { low: *low },
        (_, [a, b]) => match shared_edge(*a, *b) {
            Some(down) => WaterShape::Slope { down },
            None => WaterShape::Saddle,
        },
        _ => WaterShape::Saddle,
    }
}

// Cardinal edge two corners lie on, or None for diagonal pairs.
fn shared_edge(a: Corner, b: Corner) -> Option<Facing> {
    let (a0, a1) = a.cardinals();
    let (b0, b1) = b.cardinals();
    if a0 == b0 {
        Some(a0)
    } else if a1 == b1 {
        Some(a1)
    } else {
        None
    }
}
