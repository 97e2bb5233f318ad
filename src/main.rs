mod scenes;

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use strata_blocks::BlockRegistry;
use strata_chunk::{ChunkView, NoNeighbors};
use strata_geom::Aabb;
use strata_mesh::{
    ChunkPrimitives, FencePart, MeshConfig, Primitive, PrimitiveKind, StairPart,
    build_chunk_primitives,
};

use crate::scenes::Scene;

#[derive(Parser, Debug)]
#[command(author, version, about = "Voxel chunk mesh compaction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a demo chunk, mesh it and print what came out
    Mesh(MeshArgs),
}

#[derive(Args, Debug)]
struct MeshArgs {
    /// Demo chunk to mesh
    #[arg(long, value_enum, default_value_t = Scene::Mixed)]
    scene: Scene,

    /// Block definitions
    #[arg(long, default_value = "assets/voxels/blocks.toml")]
    blocks: PathBuf,

    /// Texture catalog
    #[arg(long, default_value = "assets/voxels/textures.toml")]
    textures: PathBuf,

    /// Mesher options (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the per-chunk primitive budget
    #[arg(long)]
    budget: Option<usize>,

    /// Print every primitive
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Mesh(args) => run_mesh(&args),
    }
}

fn run_mesh(args: &MeshArgs) -> Result<(), Box<dyn Error>> {
    let reg = BlockRegistry::load_from_paths(&args.textures, &args.blocks)?;
    let mut cfg = match &args.config {
        Some(path) => MeshConfig::from_toml_str(&fs::read_to_string(path)?)?,
        None => MeshConfig::default(),
    };
    if let Some(budget) = args.budget {
        cfg.max_primitives_per_chunk = budget;
    }
    log::info!(
        "loaded {} block types, {} textures",
        reg.blocks.len(),
        reg.textures.len()
    );

    let buf = scenes::build(args.scene, &reg)?;
    let solid_voxels = buf.blocks.iter().filter(|b| !b.is_air()).count();
    let view = ChunkView::new(&buf, &NoNeighbors);
    let out = build_chunk_primitives(&view, &reg, &cfg);

    print_summary(args.scene, solid_voxels, &cfg, &out);
    if args.dump {
        for p in &out.primitives {
            println!("{}", describe(&reg, p));
        }
    }
    Ok(())
}

fn kind_label(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Box => "box",
        PrimitiveKind::Wedge { .. } => "wedge",
        PrimitiveKind::CornerWedge { .. } => "corner_wedge",
        PrimitiveKind::Stair(StairPart::Base) => "stair_base",
        PrimitiveKind::Stair(StairPart::Step) => "stair_step",
        PrimitiveKind::Fence(FencePart::Post) => "fence_post",
        PrimitiveKind::Fence(_) => "fence_rail",
        PrimitiveKind::CrossBillboard => "cross",
    }
}

fn print_summary(scene: Scene, voxels: usize, cfg: &MeshConfig, out: &ChunkPrimitives) {
    println!(
        "scene {:?}: {} voxels -> {} primitives (budget {})",
        scene,
        voxels,
        out.primitives.len(),
        cfg.max_primitives_per_chunk
    );
    let mut by_kind: BTreeMap<&'static str, usize> = BTreeMap::new();
    for p in &out.primitives {
        *by_kind.entry(kind_label(p.kind)).or_default() += 1;
    }
    for (kind, n) in &by_kind {
        println!("  {kind:<13} {n}");
    }
    for (pass, s) in out.stats.passes() {
        println!("  pass {pass:<7} {:>5} prims {:>4} ms", s.primitives, s.ms);
    }
    let faces: usize = out.primitives.iter().map(|p| p.faces.visible_count()).sum();
    let colliders = out.primitives.iter().filter(|p| p.collision).count();
    println!("  visible faces {faces}, colliders {colliders}");
    if let Some(bounds) = out
        .primitives
        .iter()
        .map(Primitive::aabb)
        .reduce(|a, b| a.union(&b))
    {
        print_bounds(&bounds);
    }
    if out.stats.budget_exhausted {
        println!("  budget exhausted: output truncated");
    }
}

fn print_bounds(b: &Aabb) {
    println!(
        "  bounds ({}, {}, {})..({}, {}, {})",
        b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
    );
}

fn describe(reg: &BlockRegistry, p: &Primitive) -> String {
    let name = reg.resolve(p.block).debug_name();
    format!(
        "{:<13} {:<14} min=({}, {}, {}) size=({}, {}, {}) facing={} faces={} collision={}",
        kind_label(p.kind),
        name,
        p.min.x,
        p.min.y,
        p.min.z,
        p.size.x,
        p.size.y,
        p.size.z,
        p.facing.name(),
        p.faces.visible_count(),
        p.collision
    )
}
