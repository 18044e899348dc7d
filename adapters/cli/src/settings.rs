//! Configuration file loading and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use snake_pilot_core::GameConfig;
use snake_pilot_rendering::Palette;

/// Everything the binary reads from a `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Board dimensions, starting body and food seed.
    pub(crate) game: GameConfig,
    /// Colors used by the window.
    pub(crate) palette: Palette,
}

/// Values given on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) seed: Option<u64>,
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no file is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        Ok(settings)
    }

    /// Applies command-line values and checks that the result is playable.
    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(columns) = overrides.columns {
            self.game.columns = columns;
        }
        if let Some(rows) = overrides.rows {
            self.game.rows = rows;
        }
        if let Some(seed) = overrides.seed {
            self.game.food_seed = seed;
        }

        self.game
            .validate()
            .context("game configuration is not playable")?;
        Ok(self)
    }
}
