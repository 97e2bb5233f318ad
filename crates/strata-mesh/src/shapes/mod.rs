//! Meshers for the non-cube block shapes.

pub mod cross;
pub mod fence;
pub mod slab;
pub mod stairs;

pub use fence::Connection;
pub use stairs::{derive_shape as derive_stair_shape, step_rects};
