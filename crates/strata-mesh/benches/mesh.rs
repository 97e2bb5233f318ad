use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use strata_blocks::BlockRegistry;
use strata_blocks::meta::WaterState;
use strata_blocks::types::Block;
use strata_chunk::{ChunkBuf, ChunkCoord, ChunkNeighborhood, ChunkView, NoNeighbors};
use strata_mesh::{MeshConfig, build_chunk_primitives, mesh_chunks_parallel};

const SX: usize = 16;
const SY: usize = 64;
const SZ: usize = 16;

fn load_registry() -> BlockRegistry {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let vox = root.join("../../assets/voxels");
    BlockRegistry::load_from_paths(vox.join("textures.toml"), vox.join("blocks.toml")).unwrap()
}

// Stone floor, dirt layer and a shallow pool on top.
fn terrain(reg: &BlockRegistry, coord: ChunkCoord) -> ChunkBuf {
    let stone = reg.make_block("stone", 0).unwrap();
    let dirt = reg.make_block("dirt", 0).unwrap();
    let water = reg.make_block("water", WaterState::SOURCE.encode()).unwrap();
    let mut buf = ChunkBuf::new_air(coord, SX, SY, SZ);
    for z in 0..SZ {
        for x in 0..SX {
            for y in 0..24 {
                buf.set_local(x, y, z, stone);
            }
            buf.set_local(x, 24, z, dirt);
            if (4..12).contains(&x) && (4..12).contains(&z) {
                buf.set_local(x, 24, z, water);
            }
        }
    }
    buf
}

// Alternating stone and air: nothing merges.
fn checker(reg: &BlockRegistry) -> ChunkBuf {
    let stone = reg.make_block("stone", 0).unwrap();
    let mut buf = ChunkBuf::new_air(ChunkCoord::new(0, 0, 0), SX, SY, SZ);
    for y in 0..SY {
        for z in 0..SZ {
            for x in 0..SX {
                if (x + y + z) % 2 == 0 {
                    buf.set_local(x, y, z, stone);
                }
            }
        }
    }
    buf
}

fn bench_build_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_primitives");
    let reg = load_registry();
    let cfg = MeshConfig::default();
    let unbounded = MeshConfig {
        max_primitives_per_chunk: usize::MAX,
        ..MeshConfig::default()
    };

    let flat = terrain(&reg, ChunkCoord::new(0, 0, 0));
    group.bench_function("terrain_16x64x16", |b| {
        b.iter(|| {
            let view = ChunkView::new(&flat, &NoNeighbors);
            black_box(build_chunk_primitives(&view, &reg, &cfg));
        })
    });

    let noisy = checker(&reg);
    group.bench_function("checker_budgeted", |b| {
        b.iter(|| {
            let view = ChunkView::new(&noisy, &NoNeighbors);
            black_box(build_chunk_primitives(&view, &reg, &cfg));
        })
    });
    group.bench_function("checker_unbounded", |b| {
        b.iter(|| {
            let view = ChunkView::new(&noisy, &NoNeighbors);
            black_box(build_chunk_primitives(&view, &reg, &unbounded));
        })
    });
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_chunks_parallel");
    group.measurement_time(Duration::from_secs(8));
    let reg = load_registry();
    let cfg = MeshConfig::default();
    let mut hood = ChunkNeighborhood::new(SX, SY, SZ);
    let mut coords = Vec::new();
    for cz in -2..2 {
        for cx in -2..2 {
            let coord = ChunkCoord::new(cx, 0, cz);
            let _ = hood.insert(terrain(&reg, coord));
            coords.push(coord);
        }
    }
    group.bench_function("terrain_4x4_chunks", |b| {
        b.iter(|| black_box(mesh_chunks_parallel(&hood, &coords, &reg, &cfg)))
    });
    group.finish();
}

criterion_group!(benches, bench_build_chunk, bench_parallel);
criterion_main!(benches);
