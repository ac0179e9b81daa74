//! Realm configuration loader.

use std::path::Path;

use realm_core::RealmConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for realm configuration from TOML files.
///
/// Every table and field is optional; anything omitted keeps its default.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`RealmConfig`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<RealmConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse and validate a [`RealmConfig`] from TOML text.
    pub fn from_toml_str(content: &str) -> LoadResult<RealmConfig> {
        let config: RealmConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid realm config: {}", e))?;
        Ok(config)
    }
}
