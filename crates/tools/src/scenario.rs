//! Scenario files for the headless simulator.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use prowl_core::{AgentConfig, GridMap, Pos, TileGrid};
use serde::Deserialize;

pub const BUILTIN_SCENARIO: &str = include_str!("../scenarios/arena.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    pub map: Vec<String>,
    pub target: TargetSpec,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    /// Tiles visited in order, looping back to the first.
    pub route: Vec<Pos>,
    #[serde(default = "default_target_speed")]
    pub speed: f32,
    /// Reaching this tile ends the run.
    #[serde(default)]
    pub goal: Option<Pos>,
    /// An agent stepping onto the target's tile ends the run.
    #[serde(default = "default_true")]
    pub catchable: bool,
}

fn default_seed() -> u64 {
    42
}

fn default_ticks() -> u32 {
    600
}

fn default_dt() -> f32 {
    0.1
}

fn default_tile_size() -> f32 {
    1.0
}

fn default_target_speed() -> f32 {
    0.8
}

fn default_true() -> bool {
    true
}

impl Scenario {
    pub fn parse(text: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(text).context("Failed to parse scenario TOML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid scenario: {}", path.display()))
    }

    pub fn build_map(&self) -> Result<TileGrid> {
        let map = TileGrid::from_rows(&self.map)?.with_tile_size(self.tile_size)?;
        for tile in &self.target.route {
            if !map.is_walkable(*tile) {
                bail!("target route tile {tile:?} is not walkable");
            }
        }
        if let Some(goal) = self.target.goal
            && !map.is_walkable(goal)
        {
            bail!("target goal {goal:?} is not walkable");
        }
        Ok(map)
    }

    fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            bail!("dt must be positive, got {}", self.dt);
        }
        if self.target.route.is_empty() {
            bail!("target route needs at least one tile");
        }
        if !(self.target.speed.is_finite() && self.target.speed > 0.0) {
            bail!("target speed must be positive, got {}", self.target.speed);
        }
        if self.agents.is_empty() {
            bail!("scenario declares no agents");
        }
        for (index, agent) in self.agents.iter().enumerate() {
            agent.validate().with_context(|| format!("agent #{index}"))?;
        }
        Ok(())
    }
}
