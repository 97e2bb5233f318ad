//! Hand-built demo chunks for the `mesh` command.

use std::error::Error;

use clap::ValueEnum;
use strata_blocks::meta::{self, Facing, WaterState};
use strata_blocks::types::Block;
use strata_blocks::BlockRegistry;
use strata_chunk::{ChunkBuf, ChunkCoord};

pub const SX: usize = 16;
pub const SY: usize = 32;
pub const SZ: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scene {
    /// Stone basin with a source pool, a flowing spill and a waterfall.
    Pool,
    /// Stair rings with inner and outer corners, and slab steps.
    Stairs,
    /// A fenced yard touching a wall and a chest.
    Fences,
    /// Everything at once on a stone and dirt floor.
    Mixed,
    /// Alternating stone and air; nothing merges, so the budget is hit.
    Checker,
}

struct Palette<'r> {
    reg: &'r BlockRegistry,
}

impl Palette<'_> {
    fn block(&self, name: &str, state: u8) -> Result<Block, Box<dyn Error>> {
        self.reg
            .make_block(name, state)
            .ok_or_else(|| format!("block '{name}' is not defined in the registry").into())
    }

    fn stairs(&self, facing: Facing) -> Result<Block, Box<dyn Error>> {
        self.block("plank_stairs", meta::pack(facing.bits(), false, None))
    }

    fn water(&self, w: WaterState) -> Result<Block, Box<dyn Error>> {
        self.block("water", w.encode())
    }
}

// Fills the half-open box `from..to` with `b`.
fn fill(
    buf: &mut ChunkBuf,
    (x0, y0, z0): (usize, usize, usize),
    (x1, y1, z1): (usize, usize, usize),
    b: Block,
) {
    for y in y0..y1 {
        for z in z0..z1 {
            for x in x0..x1 {
                buf.set_local(x, y, z, b);
            }
        }
    }
}

pub fn build(scene: Scene, reg: &BlockRegistry) -> Result<ChunkBuf, Box<dyn Error>> {
    let p = Palette { reg };
    let mut buf = ChunkBuf::new_air(ChunkCoord::new(0, 0, 0), SX, SY, SZ);
    match scene {
        Scene::Pool => pool(&p, &mut buf)?,
        Scene::Stairs => stairs(&p, &mut buf)?,
        Scene::Fences => fences(&p, &mut buf)?,
        Scene::Mixed => {
            fill(&mut buf, (0, 0, 0), (SX, 1, SZ), p.block("stone", 0)?);
            fill(&mut buf, (0, 1, 0), (SX, 2, SZ), p.block("dirt", 0)?);
            pool(&p, &mut buf)?;
            stairs(&p, &mut buf)?;
            fences(&p, &mut buf)?;
            plants(&p, &mut buf)?;
        }
        Scene::Checker => {
            let stone = p.block("stone", 0)?;
            for y in 0..SY {
                for z in 0..SZ {
                    for x in 0..SX {
                        if (x + y + z) % 2 == 0 {
                            buf.set_local(x, y, z, stone);
                        }
                    }
                }
            }
        }
    }
    Ok(buf)
}

// Basin in the north-west quarter.
fn pool(p: &Palette, buf: &mut ChunkBuf) -> Result<(), Box<dyn Error>> {
    let stone = p.block("stone", 0)?;
    fill(buf, (0, 2, 0), (8, 3, 8), stone);
    fill(buf, (0, 3, 0), (8, 4, 1), stone);
    fill(buf, (0, 3, 0), (1, 4, 8), stone);
    fill(buf, (1, 3, 1), (6, 4, 6), p.water(WaterState::SOURCE)?);
    // Spill running east along z = 3, one level lower per cell.
    for (i, x) in (6..8).enumerate() {
        buf.set_local(x, 3, 3, p.water(WaterState::flowing(i as u32 + 1))?);
    }
    // Waterfall fed from a ledge.
    fill(buf, (5, 10, 10), (8, 11, 12), stone);
    buf.set_local(6, 11, 11, p.water(WaterState::SOURCE)?);
    for y in 3..11 {
        buf.set_local(6, y, 12, p.water(WaterState::falling(0))?);
    }
    buf.set_local(6, 11, 12, p.water(WaterState::flowing(1))?);
    Ok(())
}

// Stair ring in the south-east quarter plus a slab walkway.
fn stairs(p: &Palette, buf: &mut ChunkBuf) -> Result<(), Box<dyn Error>> {
    let y = 2;
    let (x0, z0, x1, z1) = (9, 9, 14, 14);
    for x in x0..=x1 {
        buf.set_local(x, y, z0, p.stairs(Facing::South)?);
        buf.set_local(x, y, z1, p.stairs(Facing::North)?);
    }
    for z in z0 + 1..z1 {
        buf.set_local(x0, y, z, p.stairs(Facing::East)?);
        buf.set_local(x1, y, z, p.stairs(Facing::West)?);
    }
    let bottom = p.block("plank_slab", 0)?;
    let top = p.block("plank_slab", meta::pack(0, true, None))?;
    fill(buf, (9, y, 6), (15, y + 1, 7), bottom);
    fill(buf, (9, y + 1, 7), (15, y + 2, 8), top);
    Ok(())
}

// Yard in the north-east quarter with a gap on the south side.
fn fences(p: &Palette, buf: &mut ChunkBuf) -> Result<(), Box<dyn Error>> {
    let y = 2;
    let fence = p.block("oak_fence", 0)?;
    for x in 9..15 {
        buf.set_local(x, y, 0, fence);
        if x != 12 {
            buf.set_local(x, y, 4, fence);
        }
    }
    for z in 1..4 {
        buf.set_local(9, y, z, fence);
        buf.set_local(14, y, z, fence);
    }
    let log = p.block("log", meta::pack(Facing::East.bits(), false, None))?;
    fill(buf, (15, y, 0), (16, y + 2, 5), log);
    buf.set_local(11, y, 2, p.block("chest", 0)?);
    buf.set_local(10, y, 2, fence);
    Ok(())
}

fn plants(p: &Palette, buf: &mut ChunkBuf) -> Result<(), Box<dyn Error>> {
    let lower = p.block("tall_grass", 0)?;
    let upper = p.block("tall_grass", meta::pack(0, true, None))?;
    for (x, z) in [(2, 11), (3, 13), (4, 10)] {
        buf.set_local(x, 2, z, lower);
        buf.set_local(x, 3, z, upper);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_registry() -> BlockRegistry {
        let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let vox = root.join("assets/voxels");
        BlockRegistry::load_from_paths(vox.join("textures.toml"), vox.join("blocks.toml")).unwrap()
    }

    #[test]
    fn every_scene_builds_from_the_shipped_registry() {
        let reg = load_registry();
        for scene in Scene::value_variants() {
            let buf = build(*scene, &reg).unwrap();
            assert!(buf.has_non_air(), "{scene:?}");
        }
    }

    #[test]
    fn missing_blocks_are_reported() {
        let reg = BlockRegistry::new();
        let err = build(Scene::Pool, &reg).unwrap_err();
        assert!(err.to_string().contains("stone"));
    }
}
