use anyhow::{Context, Result};
use confinames_core::{GameConfig, Palette, SheetLayout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything a config file can override, missing tables keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    pub game: GameConfig,
    pub layout: SheetLayout,
    pub palette: Palette,
}

impl AppConfig {
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.game.validate()?;
        config.layout.validate()?;
        config.palette.validate()?;
        Ok(config)
    }
}
