use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::{BlockDef, BlocksConfig, TextureSelector, TexturesDef};
use crate::meta::{self, WaterState};
use crate::texture::TextureCatalog;
use crate::types::{Block, BlockId, BlockState, FaceRole, Shape, TextureId};

const STATES: usize = 256;
const DEPTH_NAMES: [&str; 8] = ["0", "1", "2", "3", "4", "5", "6", "7"];

#[derive(Default, Clone, Debug)]
pub struct CompiledTextures {
    pub all: Option<ResolvedSelector>,
    pub top: Option<ResolvedSelector>,
    pub bottom: Option<ResolvedSelector>,
    pub side: Option<ResolvedSelector>,
}

#[derive(Clone, Debug)]
pub enum ResolvedSelector {
    Fixed(TextureId),
    By {
        by: String,
        map: HashMap<String, TextureId>,
    },
}

impl CompiledTextures {
    pub fn texture_for(&self, role: FaceRole, state: BlockState, ty: &BlockType) -> Option<TextureId> {
        let pick = match role {
            FaceRole::Top => self.top.as_ref().or(self.all.as_ref()),
            FaceRole::Bottom => self.bottom.as_ref().or(self.all.as_ref()),
            FaceRole::Side => self.side.as_ref().or(self.all.as_ref()),
            FaceRole::All => self.all.as_ref(),
        }?;
        match pick {
            ResolvedSelector::Fixed(id) => Some(*id),
            ResolvedSelector::By { by, map } => {
                let val = ty.state_prop_value(state, by)?;
                map.get(val).copied()
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub transparent: bool,
    pub interactive: bool,
    pub shape: Shape,
    pub color: [u8; 4],
    pub textures: CompiledTextures,
    // Precomputed role->texture lookup per state (fast path for the meshers)
    pub pre_tex_top: Vec<TextureId>,
    pub pre_tex_bottom: Vec<TextureId>,
    pub pre_tex_side: Vec<TextureId>,
    defined: bool,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            transparent: true,
            interactive: false,
            shape: Shape::None,
            color: [255, 255, 255, 255],
            textures: CompiledTextures::default(),
            pre_tex_top: vec![TextureId(0)],
            pre_tex_bottom: vec![TextureId(0)],
            pre_tex_side: vec![TextureId(0)],
            defined: false,
        }
    }

    fn builtin_unknown(texture: TextureId) -> Self {
        BlockType {
            id: BlockId::MAX,
            name: "unknown".into(),
            solid: true,
            transparent: false,
            interactive: false,
            shape: Shape::Cube,
            color: [255, 0, 255, 255],
            textures: CompiledTextures {
                all: Some(ResolvedSelector::Fixed(texture)),
                ..CompiledTextures::default()
            },
            pre_tex_top: vec![texture],
            pre_tex_bottom: vec![texture],
            pre_tex_side: vec![texture],
            defined: true,
        }
    }

    /// Solid, opaque and a full cube: hides whatever face touches it.
    #[inline]
    pub fn is_occluder(&self) -> bool {
        self.solid && !self.transparent && self.shape.is_full_cube()
    }

    /// Full cubes a fence attaches a rail stub to.
    #[inline]
    pub fn connects_fences(&self) -> bool {
        self.is_occluder() && !self.interactive
    }

    /// Named properties decoded from the metadata byte for this type's shape.
    pub fn state_prop_value(&self, state: BlockState, prop: &str) -> Option<&'static str> {
        match (self.shape, prop) {
            (Shape::Oriented | Shape::Stairs, "facing") => Some(meta::facing(state).name()),
            (Shape::Slab | Shape::Stairs, "half") => {
                Some(if meta::vertical(state) { "top" } else { "bottom" })
            }
            (Shape::Cross, "half") => Some(if meta::vertical(state) { "upper" } else { "lower" }),
            (Shape::Stairs, "shape") => meta::stored_stair_shape(state).map(|s| s.name()),
            (Shape::Water, "depth") => Some(DEPTH_NAMES[WaterState::decode(state).depth as usize]),
            (Shape::Water, "falling") => {
                Some(if WaterState::decode(state).falling { "true" } else { "false" })
            }
            _ => None,
        }
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    #[inline]
    pub fn texture_for_cached(&self, role: FaceRole, state: BlockState) -> TextureId {
        let table = match role {
            FaceRole::Top => &self.pre_tex_top,
            FaceRole::Bottom => &self.pre_tex_bottom,
            FaceRole::Side | FaceRole::All => &self.pre_tex_side,
        };
        table[state as usize % table.len()]
    }

    pub fn debug_name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub textures: TextureCatalog,
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
    unknown: BlockType,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            textures: TextureCatalog::new(),
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
            unknown: BlockType::builtin_unknown(TextureId(0)),
        }
    }

    /// Defined block type for `id`; `None` for ids with no definition.
    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).filter(|t| t.defined)
    }

    /// Like [`get`](Self::get) but unmapped ids resolve to the opaque fallback type.
    #[inline]
    pub fn resolve(&self, id: BlockId) -> &BlockType {
        self.get(id).unwrap_or(&self.unknown)
    }

    /// The opaque cube used for ids the registry does not know.
    pub fn unknown(&self) -> &BlockType {
        &self.unknown
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn make_block(&self, name: &str, state: BlockState) -> Option<Block> {
        let id = self.id_by_name(name)?;
        Some(Block { id, state })
    }

    pub fn load_from_paths(
        textures_path: impl AsRef<Path>,
        blocks_path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn Error>> {
        let textures = TextureCatalog::from_path(textures_path)?;
        let blocks_toml = fs::read_to_string(blocks_path)?;
        let blocks_cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_configs(textures, blocks_cfg)
    }

    pub fn from_toml_strs(textures_toml: &str, blocks_toml: &str) -> Result<Self, Box<dyn Error>> {
        let textures = TextureCatalog::from_toml_str(textures_toml)?;
        let blocks_cfg: BlocksConfig = toml::from_str(blocks_toml)?;
        Self::from_configs(textures, blocks_cfg)
    }

    pub fn from_configs(
        textures: TextureCatalog,
        cfg: BlocksConfig,
    ) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry {
            unknown: BlockType::builtin_unknown(textures.get_id("unknown").unwrap_or(TextureId(0))),
            textures,
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        };
        let mut missing: BTreeSet<String> = BTreeSet::new();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            if reg.get(id).is_some() {
                log::warn!("block id {} defined twice; keeping '{}'", id, def.name);
            }
            let ty = compile_block(&reg.textures, id, def, &mut missing);
            while reg.blocks.len() <= id as usize {
                let gap = reg.blocks.len() as BlockId;
                reg.blocks.push(BlockType::placeholder(gap));
            }
            reg.blocks[id as usize] = ty;
        }
        if !missing.is_empty() {
            log::warn!(
                "{} texture key(s) not in catalog, using fallback: {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| t.defined)
            .map(|t| (t.name.clone(), t.id))
            .collect();

        if let Some(name) = cfg.unknown_block {
            match reg.id_by_name(&name).and_then(|id| reg.get(id)) {
                Some(ty) => {
                    // Unknown ids always mesh as opaque cubes, whatever the chosen block's shape.
                    let mut fallback = ty.clone();
                    fallback.solid = true;
                    fallback.transparent = false;
                    fallback.shape = Shape::Cube;
                    reg.unknown_block_id = Some(ty.id);
                    reg.unknown = fallback;
                }
                None => log::warn!("unknown_block '{}' is not a defined block", name),
            }
        }
        Ok(reg)
    }
}

fn compile_block(
    catalog: &TextureCatalog,
    id: BlockId,
    def: BlockDef,
    missing: &mut BTreeSet<String>,
) -> BlockType {
    let shape = match def.shape.as_deref() {
        None => Shape::Cube,
        Some(key) => Shape::from_key(key).unwrap_or_else(|| {
            log::warn!("block '{}': unknown shape '{}', treating as none", def.name, key);
            Shape::None
        }),
    };
    let solid = def
        .solid
        .unwrap_or(!matches!(shape, Shape::Water | Shape::Cross | Shape::None));
    let transparent = def
        .transparent
        .unwrap_or(matches!(shape, Shape::Water | Shape::Cross | Shape::None));
    let [r, g, b] = def.color.unwrap_or([255, 255, 255]);
    let mut ty = BlockType {
        id,
        name: def.name,
        solid,
        transparent,
        interactive: def.interactive.unwrap_or(false),
        shape,
        color: [r, g, b, 255],
        textures: compile_textures(catalog, def.textures, missing),
        pre_tex_top: Vec::new(),
        pre_tex_bottom: Vec::new(),
        pre_tex_side: Vec::new(),
        defined: true,
    };
    let fallback = catalog.get_id("unknown").unwrap_or(TextureId(0));
    let fill_role = |role: FaceRole| -> Vec<TextureId> {
        (0..STATES)
            .map(|s| {
                ty.textures
                    .texture_for(role, s as BlockState, &ty)
                    .unwrap_or(fallback)
            })
            .collect()
    };
    let (top, bottom, side) = (
        fill_role(FaceRole::Top),
        fill_role(FaceRole::Bottom),
        fill_role(FaceRole::Side),
    );
    ty.pre_tex_top = top;
    ty.pre_tex_bottom = bottom;
    ty.pre_tex_side = side;
    ty
}

fn compile_textures(
    catalog: &TextureCatalog,
    defs: Option<TexturesDef>,
    missing: &mut BTreeSet<String>,
) -> CompiledTextures {
    let mut resolve_key = |k: &str| -> Option<TextureId> {
        let id = catalog.get_id(k);
        if id.is_none() {
            missing.insert(k.to_string());
        }
        id
    };
    let mut resolve_selector = |sel: &TextureSelector| -> Option<ResolvedSelector> {
        match sel {
            TextureSelector::Key(k) => resolve_key(k).map(ResolvedSelector::Fixed),
            TextureSelector::By { by, map } => {
                let mut out: HashMap<String, TextureId> = HashMap::new();
                for (k, v) in map.iter() {
                    if let Some(id) = resolve_key(v) {
                        out.insert(k.clone(), id);
                    }
                }
                Some(ResolvedSelector::By {
                    by: by.clone(),
                    map: out,
                })
            }
        }
    };
    let mut out = CompiledTextures::default();
    if let Some(t) = defs {
        out.all = t.all.as_ref().and_then(&mut resolve_selector);
        out.top = t.top.as_ref().and_then(&mut resolve_selector);
        out.bottom = t.bottom.as_ref().and_then(&mut resolve_selector);
        out.side = t.side.as_ref().and_then(&mut resolve_selector);
    }
    out
}
