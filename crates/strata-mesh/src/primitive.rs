//! Output primitives handed to the renderer and physics.

use strata_blocks::meta::Facing;
use strata_blocks::types::{BlockId, TextureId};
use strata_geom::{Aabb, SNAP_STEP, Vec3};

use crate::face::Face;

/// Corner of a cell's top surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthEast,
        Corner::NorthWest,
        Corner::SouthEast,
        Corner::SouthWest,
    ];

    /// The two cardinal directions meeting at this corner, north/south first.
    #[inline]
    pub fn cardinals(self) -> (Facing, Facing) {
        match self {
            Corner::NorthEast => (Facing::North, Facing::East),
            Corner::NorthWest => (Facing::North, Facing::West),
            Corner::SouthEast => (Facing::South, Facing::East),
            Corner::SouthWest => (Facing::South, Facing::West),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StairPart {
    /// Half-height slab over the whole footprint.
    Base,
    /// Half-height step; one per straight/outer stair, two for inner corners.
    Step,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FencePart {
    Post,
    UpperRail,
    LowerRail,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Box,
    /// Ramp whose top surface descends towards `down`.
    Wedge { down: Facing },
    /// Pyramid-like top rising to a single `peak` corner.
    CornerWedge { peak: Corner },
    Stair(StairPart),
    Fence(FencePart),
    /// Two crossed double-sided quads at 45 degrees spanning the box.
    CrossBillboard,
}

/// Per-face visibility; `Some` carries the texture of a face that should be drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceSet {
    faces: [Option<TextureId>; 6],
}

impl FaceSet {
    pub const NONE: FaceSet = FaceSet { faces: [None; 6] };

    #[inline]
    pub fn get(&self, face: Face) -> Option<TextureId> {
        self.faces[face.index()]
    }

    #[inline]
    pub fn set(&mut self, face: Face, tex: Option<TextureId>) {
        self.faces[face.index()] = tex;
    }

    #[inline]
    pub fn is_visible(&self, face: Face) -> bool {
        self.faces[face.index()].is_some()
    }

    pub fn visible_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    #[inline]
    pub fn any_visible(&self) -> bool {
        self.faces.iter().any(Option::is_some)
    }

    /// Builds a set from a per-face chooser.
    pub fn from_fn(mut f: impl FnMut(Face) -> Option<TextureId>) -> FaceSet {
        let mut set = FaceSet::NONE;
        for face in Face::ALL {
            set.set(face, f(face));
        }
        set
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// World-space minimum corner.
    pub min: Vec3,
    pub size: Vec3,
    pub facing: Facing,
    pub faces: FaceSet,
    pub collision: bool,
    pub color: [u8; 4],
    pub block: BlockId,
}

impl Primitive {
    /// Creates a primitive with `min` and `size` quantized to [`SNAP_STEP`].
    pub fn new(kind: PrimitiveKind, min: Vec3, size: Vec3, block: BlockId) -> Self {
        Primitive {
            kind,
            min: min.snapped(SNAP_STEP),
            size: size.snapped(SNAP_STEP),
            facing: Facing::North,
            faces: FaceSet::NONE,
            collision: false,
            color: [255, 255, 255, 255],
            block,
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_faces(mut self, faces: FaceSet) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_collision(mut self, collision: bool) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.min + self.size
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_min_size(self.min, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snaps_position_and_size() {
        let p = Primitive::new(
            PrimitiveKind::Box,
            Vec3::new(1.0001, 2.49, -0.0003),
            Vec3::new(0.874_99, 1.0, 0.1251),
            1,
        );
        assert_eq!(p.min, Vec3::new(1.0, 2.5, 0.0));
        assert_eq!(p.size, Vec3::new(0.875, 1.0, 0.125));
        assert!(!p.faces.any_visible());
    }

    #[test]
    fn face_set_counts() {
        let mut set = FaceSet::from_fn(|f| (f == Face::PosY).then_some(TextureId(3)));
        assert_eq!(set.visible_count(), 1);
        assert_eq!(set.get(Face::PosY), Some(TextureId(3)));
        set.set(Face::NegX, Some(TextureId(1)));
        assert!(set.is_visible(Face::NegX));
        assert_eq!(set.visible_count(), 2);
    }

    #[test]
    fn corner_cardinals_are_perpendicular() {
        for c in Corner::ALL {
            let (a, b) = c.cardinals();
            assert!(a.is_perpendicular(b));
            assert!(matches!(a, Facing::North | Facing::South));
        }
    }
}
