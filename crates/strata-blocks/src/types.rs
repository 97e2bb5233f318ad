use serde::{Deserialize, Serialize};

pub type BlockId = u16;
/// Per-voxel metadata byte; see [`crate::meta`] for the layout.
pub type BlockState = u8;

// Compact voxel representation: type id plus its metadata byte
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId, state: BlockState) -> Self {
        Self { id, state }
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.id == 0
    }
}

/// Index into the texture catalog. `TextureId(0)` is the reserved "no texture" sentinel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct TextureId(pub u16);

// Used by box-like shapes to resolve which texture to apply
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    All,
    Top,
    Bottom,
    Side,
}

/// Shape family of a block type. Exactly one per type, which keeps the cross/stair/slab/fence
/// flags mutually exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Cube,
    /// Full cube whose rotation bits matter for texturing (logs, furnaces).
    Oriented,
    Slab,
    Stairs,
    Fence,
    Cross,
    Water,
    /// Nothing to mesh (air, markers).
    None,
}

impl Shape {
    #[inline]
    pub fn is_full_cube(self) -> bool {
        matches!(self, Shape::Cube | Shape::Oriented)
    }

    #[inline]
    pub fn is_orientable(self) -> bool {
        matches!(self, Shape::Oriented | Shape::Stairs)
    }

    pub fn from_key(key: &str) -> Option<Shape> {
        Some(match key {
            "cube" => Shape::Cube,
            "oriented" | "axis_cube" => Shape::Oriented,
            "slab" => Shape::Slab,
            "stairs" => Shape::Stairs,
            "fence" => Shape::Fence,
            "cross" => Shape::Cross,
            "water" => Shape::Water,
            "none" => Shape::None,
            _ => return None,
        })
    }
}
