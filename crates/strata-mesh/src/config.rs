use std::error::Error;

use serde::Deserialize;

/// Mesher options. Every field has a default, so a partial TOML table is valid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Hard cap on primitives per chunk across all passes.
    pub max_primitives_per_chunk: usize,
    /// Use the chunk's height map to skip empty chunks and the air above the highest column.
    pub skip_empty_chunks: bool,
    /// Height taken off a water voxel's base box when a sloped top piece sits on it.
    pub water_slope_allowance: f32,
    /// Mesh ids the registry does not know as opaque cubes instead of skipping them.
    pub unknown_as_opaque: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_primitives_per_chunk: 500,
            skip_empty_chunks: true,
            water_slope_allowance: 0.125,
            unknown_as_opaque: true,
        }
    }
}

impl MeshConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MeshConfig = toml::from_str(s)?;
        Ok(cfg.sanitized())
    }

    /// Clamps out-of-range values instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        if !self.water_slope_allowance.is_finite() {
            self.water_slope_allowance = 0.125;
        }
        self.water_slope_allowance = self.water_slope_allowance.clamp(0.0, 1.0);
        self
    }
}
