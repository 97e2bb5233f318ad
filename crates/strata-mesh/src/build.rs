use std::time::Instant;

use rayon::prelude::*;
use strata_blocks::BlockRegistry;
use strata_chunk::{ChunkCoord, ChunkNeighborhood, ChunkView};

use crate::config::MeshConfig;
use crate::emit::BudgetController;
use crate::primitive::Primitive;
use crate::shapes::{cross, fence, slab, stairs};
use crate::solid::mesh_solids;
use crate::util::MeshCtx;
use crate::water::mesh_water;

/// Output and time of one mesher pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub primitives: usize,
    pub ms: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub solid: PassStats,
    pub stairs: PassStats,
    pub slabs: PassStats,
    pub fences: PassStats,
    pub cross: PassStats,
    pub water: PassStats,
    pub total_ms: u32,
    /// Set when the primitive budget cut the output short.
    pub budget_exhausted: bool,
}

impl MeshStats {
    pub fn primitives(&self) -> usize {
        self.passes().iter().map(|(_, p)| p.primitives).sum()
    }

    /// Passes in the order they run.
    pub fn passes(&self) -> [(&'static str, PassStats); 6] {
        let p = [self.solid, self.stairs, self.slabs, self.fences, self.cross, self.water];
        std::array::from_fn(|i| (PASS_NAMES[i], p[i]))
    }
}

pub struct ChunkPrimitives {
    pub coord: ChunkCoord,
    pub primitives: Vec<Primitive>,
    pub stats: MeshStats,
}

fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

type Pass = fn(&MeshCtx, &mut BudgetController);

const PASS_NAMES: [&str; 6] = ["solid", "stairs", "slabs", "fences", "cross", "water"];

const PASSES: [Pass; 6] = [
    |ctx, out| mesh_solids(ctx, out),
    |ctx, out| stairs::mesh_stairs(ctx, out),
    |ctx, out| slab::mesh_slabs(ctx, out),
    |ctx, out| fence::mesh_fences(ctx, out),
    |ctx, out| cross::mesh_cross(ctx, out),
    |ctx, out| mesh_water(ctx, out),
];

/// Meshes one chunk into an ordered primitive list: solids, stairs, slabs, fences, cross plants,
/// then water. All passes share one budget of `cfg.max_primitives_per_chunk`; once it is spent
/// the remaining passes are skipped.
pub fn build_chunk_primitives(
    view: &ChunkView,
    reg: &BlockRegistry,
    cfg: &MeshConfig,
) -> ChunkPrimitives {
    let coord = view.coord();
    let (sx, sy, sz) = view.dims();
    if cfg.skip_empty_chunks && view.is_empty() {
        return ChunkPrimitives {
            coord,
            primitives: Vec::new(),
            stats: MeshStats::default(),
        };
    }

    let total_start = Instant::now();
    let ctx = MeshCtx::new(view, reg, cfg);
    let mut out = BudgetController::new(cfg.max_primitives_per_chunk);
    let mut pass_stats = [PassStats::default(); 6];
    for ((pass, name), slot) in PASSES.iter().zip(PASS_NAMES).zip(pass_stats.iter_mut()) {
        if out.exhausted() {
            break;
        }
        let start = Instant::now();
        let before = out.len();
        pass(&ctx, &mut out);
        *slot = PassStats {
            primitives: out.len() - before,
            ms: elapsed_ms(start),
        };
        log::info!(
            target: "perf",
            "ms={} mesher_{} prims={} dims=({}, {}, {}) cx={} cy={} cz={}",
            slot.ms,
            name,
            slot.primitives,
            sx,
            sy,
            sz,
            coord.cx,
            coord.cy,
            coord.cz
        );
    }
    let [solid, stairs, slabs, fences, cross, water] = pass_stats;
    let stats = MeshStats {
        solid,
        stairs,
        slabs,
        fences,
        cross,
        water,
        total_ms: elapsed_ms(total_start),
        budget_exhausted: out.exhausted(),
    };
    ChunkPrimitives {
        coord,
        primitives: out.into_primitives(),
        stats,
    }
}

/// Meshes a batch of chunks from one neighborhood snapshot on the rayon pool.
///
/// Results come back in the order of `coords`; coordinates with no loaded chunk yield `None`.
pub fn mesh_chunks_parallel(
    hood: &ChunkNeighborhood,
    coords: &[ChunkCoord],
    reg: &BlockRegistry,
    cfg: &MeshConfig,
) -> Vec<Option<ChunkPrimitives>> {
    coords
        .par_iter()
        .map(|&coord| {
            let view = hood.view(coord)?;
            Some(build_chunk_primitives(&view, reg, cfg))
        })
        .collect()
}
