use serde::Deserialize;
use std::collections::HashMap;

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    // Name of the block whose textures and color are used for ids the registry does not know.
    #[serde(default)]
    pub unknown_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub transparent: Option<bool>,
    // Containers and other usable blocks; fences never attach to them.
    #[serde(default)]
    pub interactive: Option<bool>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub textures: Option<TexturesDef>,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

// Textures mapping: all/top/bottom/side, each a key or a by-property map
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TexturesDef {
    #[serde(default)]
    pub all: Option<TextureSelector>,
    #[serde(default)]
    pub top: Option<TextureSelector>,
    #[serde(default)]
    pub bottom: Option<TextureSelector>,
    #[serde(default)]
    pub side: Option<TextureSelector>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TextureSelector {
    Key(String),
    By {
        by: String,
        #[serde(default)]
        map: HashMap<String, String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_property_maps() {
        let cfg: BlocksConfig = toml::from_str(
            r#"
            unknown_block = "unknown"

            [[blocks]]
            name = "tall_grass"
            id = 9
            solid = false
            shape = "cross"
            textures = { all = { by = "half", map = { lower = "grass_lower", upper = "grass_upper" } } }

            [[blocks]]
            name = "stone"
            textures = { all = "stone" }
            color = [120, 120, 120]
        "#,
        )
        .unwrap();
        assert_eq!(cfg.unknown_block.as_deref(), Some("unknown"));
        assert_eq!(cfg.blocks.len(), 2);
        let grass = &cfg.blocks[0];
        assert_eq!(grass.id, Some(9));
        assert_eq!(grass.shape.as_deref(), Some("cross"));
        match grass.textures.as_ref().and_then(|t| t.all.as_ref()) {
            Some(TextureSelector::By { by, map }) => {
                assert_eq!(by, "half");
                assert_eq!(map.get("upper").map(String::as_str), Some("grass_upper"));
            }
            other => panic!("unexpected selector {other:?}"),
        }
        assert_eq!(cfg.blocks[1].color, Some([120, 120, 120]));
        assert!(cfg.blocks[1].solid.is_none());
    }
}
