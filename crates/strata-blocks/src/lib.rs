//! Block types, metadata layout, texture catalog and registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod meta;
pub mod registry;
pub mod texture;
pub mod types;

pub use meta::{Facing, StairShape, WaterState};
pub use registry::{BlockRegistry, BlockType};
pub use texture::TextureCatalog;
pub use types::{Block, BlockId, BlockState, FaceRole, Shape, TextureId};
