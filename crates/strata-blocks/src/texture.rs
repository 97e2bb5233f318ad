use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::TextureId;

#[derive(Clone, Debug)]
pub struct Texture {
    pub id: TextureId,
    pub key: String,
    pub path: Option<PathBuf>,
}

/// Texture keys known to the registry. Index 0 is the empty-key sentinel meaning "untextured".
#[derive(Clone, Debug)]
pub struct TextureCatalog {
    pub textures: Vec<Texture>,
    pub by_key: HashMap<String, TextureId>,
}

impl Default for TextureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCatalog {
    pub fn new() -> Self {
        Self {
            textures: vec![Texture {
                id: TextureId(0),
                key: String::new(),
                path: None,
            }],
            by_key: HashMap::new(),
        }
    }

    /// Builds a catalog from bare keys, in the given order.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut catalog = Self::new();
        for k in keys {
            catalog.insert(k, None);
        }
        catalog
    }

    /// Adds `key` (or returns its existing id).
    pub fn insert(&mut self, key: &str, path: Option<PathBuf>) -> TextureId {
        if let Some(id) = self.get_id(key) {
            return id;
        }
        let id = TextureId(self.textures.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.textures.push(Texture {
            id,
            key: key.to_string(),
            path,
        });
        id
    }

    pub fn get_id(&self, key: &str) -> Option<TextureId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0 as usize)
    }

    pub fn key(&self, id: TextureId) -> &str {
        self.get(id).map(|t| t.key.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.textures.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: TexturesConfig = toml::from_str(toml_str)?;
        let mut entries: Vec<(String, String)> = cfg.textures.into_iter().collect();
        // Sorted so ids do not depend on HashMap iteration order.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut catalog = TextureCatalog::new();
        for (key, path) in entries {
            catalog.insert(&key, Some(PathBuf::from(path)));
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Deserialize)]
pub struct TexturesConfig {
    pub textures: HashMap<String, String>,
}
