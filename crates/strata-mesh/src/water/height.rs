use strata_blocks::meta::WaterState;

use crate::primitive::Corner;

/// Visual surface height of a water voxel, in blocks.
///
/// Sources and falling water with water above are full height. The top of a falling column takes
/// the height of the source feeding it, and flowing water drops by an eighth per level.
pub fn visual_height(w: WaterState, water_above: bool) -> f32 {
    if w.falling {
        if water_above || w.source_depth == 0 {
            1.0
        } else {
            1.0 - w.source_depth as f32 / 8.0
        }
    } else if w.depth == 0 {
        1.0
    } else {
        1.0 - w.depth.min(7) as f32 / 8.0
    }
}

/// Surface heights at the four top corners of a water voxel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CornerHeights {
    pub ne: f32,
    pub nw: f32,
    pub se: f32,
    pub sw: f32,
}

impl CornerHeights {
    pub fn flat(h: f32) -> Self {
        Self {
            ne: h,
            nw: h,
            se: h,
            sw: h,
        }
    }

    #[inline]
    pub fn get(&self, c: Corner) -> f32 {
        match c {
            Corner::NorthEast => self.ne,
            Corner::NorthWest => self.nw,
            Corner::SouthEast => self.se,
            Corner::SouthWest => self.sw,
        }
    }

    pub fn max(&self) -> f32 {
        self.ne.max(self.nw).max(self.se).max(self.sw)
    }

    pub fn min(&self) -> f32 {
        self.ne.min(self.nw).min(self.se).min(self.sw)
    }
}

/// Each corner takes the highest of the voxel itself, the two cardinal neighbors touching that
/// corner and the diagonal neighbor. `neighbor(dx, dz)` yields the height of a water neighbor or
/// `None` for anything else, which leaves the corner unaffected.
pub fn corner_heights(own: f32, neighbor: impl Fn(i32, i32) -> Option<f32>) -> CornerHeights {
    let corner = |c: Corner| {
        let (a, b) = c.cardinals();
        let (ax, az) = a.delta();
        let (bx, bz) = b.delta();
        [(ax, az), (bx, bz), (ax + bx, az + bz)]
            .into_iter()
            .filter_map(|(dx, dz)| neighbor(dx, dz))
            .fold(own, f32::max)
    };
    CornerHeights {
        ne: corner(Corner::NorthEast),
        nw: corner(Corner::NorthWest),
        se: corner(Corner::SouthEast),
        sw: corner(Corner::SouthWest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_follow_state() {
        assert_eq!(visual_height(WaterState::SOURCE, false), 1.0);
        assert_eq!(visual_height(WaterState::flowing(4), false), 0.5);
        assert_eq!(visual_height(WaterState::flowing(7), true), 0.125);
        assert_eq!(visual_height(WaterState::falling(2), true), 1.0);
        assert_eq!(visual_height(WaterState::falling(2), false), 0.75);
        assert_eq!(visual_height(WaterState::falling(0), false), 1.0);
    }

    #[test]
    fn corners_take_the_max_of_their_neighbors() {
        // Only a higher neighbor to the south.
        let c = corner_heights(0.5, |dx, dz| ((dx, dz) == (0, 1)).then_some(0.75));
        assert_eq!(c.se, 0.75);
        assert_eq!(c.sw, 0.75);
        assert_eq!(c.ne, 0.5);
        assert_eq!(c.nw, 0.5);
        // A lower neighbor never pulls a corner down.
        let c = corner_heights(0.5, |_, _| Some(0.25));
        assert_eq!(c, CornerHeights::flat(0.5));
        // Diagonal only touches one corner.
        let c = corner_heights(0.25, |dx, dz| ((dx, dz) == (1, -1)).then_some(1.0));
        assert_eq!(c.ne, 1.0);
        assert_eq!(c.min(), 0.25);
    }
}
