//! Chunk buffers, neighbor sampling and the read-only grid view the meshers consume.
#![forbid(unsafe_code)]

mod buf;
mod coord;
mod neighborhood;
mod view;

pub use buf::ChunkBuf;
pub use coord::ChunkCoord;
pub use neighborhood::ChunkNeighborhood;
pub use view::{ChunkView, NeighborSampler, NoNeighbors};
