//! Bit layout of the per-voxel metadata byte.
//!
//! The meaning of the byte depends on the shape of the block type:
//!
//! - cube/oriented: bits 0-1 facing
//! - slab: bit 2 top half
//! - stairs: bits 0-1 facing, bit 2 upside-down, bits 3-5 corner shape
//! - cross: bit 2 upper half
//! - water: bits 0-2 depth, bit 3 falling, bits 4-6 source depth of the column top
//!
//! Every accessor masks its bits, so any byte decodes to a valid value.

use crate::types::BlockState;

const FACING_MASK: u8 = 0b0000_0011;
const VERTICAL_BIT: u8 = 0b0000_0100;
const STAIR_SHAPE_SHIFT: u8 = 3;
const STAIR_SHAPE_MASK: u8 = 0b0011_1000;

const WATER_DEPTH_MASK: u8 = 0b0000_0111;
const WATER_FALLING_BIT: u8 = 0b0000_1000;
const WATER_SOURCE_SHIFT: u8 = 4;
const WATER_SOURCE_MASK: u8 = 0b0111_0000;

/// Cardinal direction on the horizontal plane. North is -Z, East is +X.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    #[inline]
    pub fn from_bits(bits: u8) -> Facing {
        match bits & FACING_MASK {
            0 => Facing::North,
            1 => Facing::East,
            2 => Facing::South,
            _ => Facing::West,
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Unit step `(dx, dz)` towards this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Facing {
        Facing::from_bits(self.bits() + 2)
    }

    /// Counter-clockwise quarter turn seen from above (North -> West).
    #[inline]
    pub fn rotate_ccw(self) -> Facing {
        Facing::from_bits(self.bits() + 3)
    }

    #[inline]
    pub fn is_perpendicular(self, other: Facing) -> bool {
        (self.bits() ^ other.bits()) & 1 == 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }
}

/// Corner classification of a stair block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StairShape {
    Straight,
    InnerLeft,
    InnerRight,
    OuterLeft,
    OuterRight,
}

impl StairShape {
    /// Decodes the stored 3-bit code. `0` and the unused codes 6 and 7 mean "derive".
    pub fn from_code(code: u8) -> Option<StairShape> {
        match code {
            1 => Some(StairShape::Straight),
            2 => Some(StairShape::InnerLeft),
            3 => Some(StairShape::InnerRight),
            4 => Some(StairShape::OuterLeft),
            5 => Some(StairShape::OuterRight),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            StairShape::Straight => 1,
            StairShape::InnerLeft => 2,
            StairShape::InnerRight => 3,
            StairShape::OuterLeft => 4,
            StairShape::OuterRight => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StairShape::Straight => "straight",
            StairShape::InnerLeft => "inner_left",
            StairShape::InnerRight => "inner_right",
            StairShape::OuterLeft => "outer_left",
            StairShape::OuterRight => "outer_right",
        }
    }
}

#[inline]
pub fn facing(state: BlockState) -> Facing {
    Facing::from_bits(state)
}

/// Slab top half, upside-down stairs, or upper half of a tall plant.
#[inline]
pub fn vertical(state: BlockState) -> bool {
    state & VERTICAL_BIT != 0
}

#[inline]
pub fn stored_stair_shape(state: BlockState) -> Option<StairShape> {
    StairShape::from_code((state & STAIR_SHAPE_MASK) >> STAIR_SHAPE_SHIFT)
}

/// Packs an oriented/stair/slab/cross state. `rotation` is reduced modulo 4.
pub fn pack(rotation: u8, vertical: bool, stair: Option<StairShape>) -> BlockState {
    let mut s = rotation & FACING_MASK;
    if vertical {
        s |= VERTICAL_BIT;
    }
    if let Some(shape) = stair {
        s |= shape.code() << STAIR_SHAPE_SHIFT;
    }
    s
}

/// Decoded water metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct WaterState {
    /// 0 is a source block, 1-7 flowing levels.
    pub depth: u8,
    pub falling: bool,
    /// Depth of the source that feeds a falling column; shapes the column's top voxel.
    pub source_depth: u8,
}

impl WaterState {
    pub const SOURCE: WaterState = WaterState {
        depth: 0,
        falling: false,
        source_depth: 0,
    };

    pub fn flowing(depth: u32) -> WaterState {
        WaterState {
            depth: depth.min(7) as u8,
            ..WaterState::SOURCE
        }
    }

    pub fn falling(source_depth: u32) -> WaterState {
        WaterState {
            depth: 0,
            falling: true,
            source_depth: source_depth.min(7) as u8,
        }
    }

    #[inline]
    pub fn decode(state: BlockState) -> WaterState {
        WaterState {
            depth: state & WATER_DEPTH_MASK,
            falling: state & WATER_FALLING_BIT != 0,
            source_depth: (state & WATER_SOURCE_MASK) >> WATER_SOURCE_SHIFT,
        }
    }

    #[inline]
    pub fn encode(self) -> BlockState {
        let mut s = self.depth.min(7);
        if self.falling {
            s |= WATER_FALLING_BIT;
        }
        s | (self.source_depth.min(7) << WATER_SOURCE_SHIFT)
    }

    #[inline]
    pub fn is_source(self) -> bool {
        self.depth == 0 && !self.falling
    }
}
