//! Map layout loader.
//!
//! A layout lists impassable tiles; everything else inside the playable area
//! is open ground. Map size itself comes from `RealmConfig::map`.

use std::path::Path;

use realm_core::config::MapConfig;
use realm_core::{OpenMap, Position};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Layout file format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MapLayoutToml {
    /// `[row, col]` pairs.
    blocked: Vec<(i32, i32)>,
}

/// Loader for map layouts from TOML files.
pub struct MapLoader;

impl MapLoader {
    /// Load a layout file and build an [`OpenMap`] sized by `config`.
    pub fn load(path: &Path, config: &MapConfig) -> LoadResult<OpenMap> {
        let content = read_file(path)?;
        Self::from_toml_str(&content, config)
    }

    pub fn from_toml_str(content: &str, config: &MapConfig) -> LoadResult<OpenMap> {
        let layout: MapLayoutToml = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map TOML: {}", e))?;

        let blocked: Vec<Position> = layout
            .blocked
            .into_iter()
            .map(|(row, col)| Position::new(row, col))
            .collect();
        if let Some(outside) = blocked.iter().find(|position| !config.contains(**position)) {
            anyhow::bail!(
                "Blocked tile ({}, {}) lies outside the playable area",
                outside.row,
                outside.col
            );
        }

        Ok(OpenMap::new(config).with_blocked(blocked))
    }
}
