use anyhow::{Context, Result};
use floodit_core::{Color, Coord, GameConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Host-side game settings, kept in a TOML file next to the saved game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board_size: Coord,
    pub num_colors: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: GameConfig::DEFAULT.size,
            num_colors: GameConfig::DEFAULT.num_colors,
        }
    }
}

impl Settings {
    /// Reads the settings file, writing the defaults out when it does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            log::info!("No settings at {}, writing defaults", path.display());
            settings.save(path)?;
            return Ok(settings);
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string(self).context("encoding settings")?;
        fs::write(path, text).with_context(|| format!("writing settings to {}", path.display()))
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        GameConfig::new(self.board_size, self.num_colors)
            .with_context(|| format!("invalid settings {self:?}"))
    }

    /// Applies any overrides, returning whether anything actually changed.
    pub fn update(&mut self, board_size: Option<Coord>, num_colors: Option<Color>) -> bool {
        let before = *self;
        if let Some(board_size) = board_size {
            self.board_size = board_size;
        }
        if let Some(num_colors) = num_colors {
            self.num_colors = num_colors;
        }
        *self != before
    }
}
