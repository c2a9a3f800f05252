//! TOML scenario files accepted by the command-line adapter.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use nature_lovers_core::{Config, ConfigError, Layout};
use nature_lovers_world::World;
use serde::Deserialize;

/// Simulation parameters plus an optional explicit layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Scenario {
    pub(crate) simulation: Config,
    pub(crate) layout: Option<Layout>,
}

impl Scenario {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Builds the world, placing the layout verbatim when one is present.
    pub(crate) fn build(&self) -> Result<World, ConfigError> {
        match &self.layout {
            Some(layout) => World::from_layout(self.simulation.clone(), layout),
            None => World::new(self.simulation.clone()),
        }
    }
}
