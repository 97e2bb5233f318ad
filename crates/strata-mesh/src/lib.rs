//! Chunk mesh compaction: turns a voxel grid into a short list of boxes, wedges and shape
//! assemblies for the renderer and physics.
#![forbid(unsafe_code)]

pub mod build;
pub mod config;
pub mod emit;
pub mod face;
mod greedy;
pub mod primitive;
pub mod shapes;
mod solid;
mod util;
pub mod water;

pub use build::{ChunkPrimitives, MeshStats, PassStats, build_chunk_primitives, mesh_chunks_parallel};
pub use config::MeshConfig;
pub use emit::{BudgetController, PrimitiveSink};
pub use face::Face;
pub use primitive::{Corner, FaceSet, FencePart, Primitive, PrimitiveKind, StairPart};
pub use water::{CornerHeights, WaterShape, classify, corner_heights, visual_height};
